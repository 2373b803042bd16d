//! Game Module
//!
//! Placement systems that build on top of the engine's geometry helpers.

pub mod types;
pub mod scene;
pub mod config;
pub mod builder;
pub mod building;

pub use types::{
    EdgeDirection, EdgeMarker, EdgeTemplate, ObjectId, ObjectType, PlacedObject, Pose, Prefab,
    yaw_degrees,
};
pub use scene::{ObjectLifecycle, Scene, SpatialQuery};
pub use config::{ConfigError, FloorLevel, PlacementConfig};
pub use builder::{PlacementError, PlacementRule, PreviewState, RuleTable, Snapper};
pub use building::{GridSpec, RoomDrag, RoomGroup, generate_grid};
