//! Blueprint Engine Library
//!
//! Snap-to-edge object placement and grid room generation for level editing.
//! The library is host-agnostic: anything that implements
//! [`game::SpatialQuery`] and [`game::ObjectLifecycle`] can drive it, and an
//! in-memory [`game::Scene`] is provided.
//!
//! # Modules
//!
//! - [`physics`] - Bounds, overlap boxes and ray-box tests
//! - [`world`] - Room grid lattice math
//! - [`game`] - Object types, placement rules, snapping and room building
//!
//! # Example
//!
//! ```ignore
//! use blueprint_engine::game::building::prefabs;
//! use blueprint_engine::game::{ObjectLifecycle, Pose, Scene, Snapper};
//! use glam::Vec3;
//!
//! let mut scene = Scene::new();
//! scene.instantiate(&prefabs::floor(), Pose::default(), 1.0);
//!
//! let mut snapper = Snapper::default();
//! snapper.create_preview(prefabs::wall(), Vec3::ZERO, false);
//!
//! // Every frame: feed the cursor, draw the returned pose
//! if let Some((pose, snapped)) = snapper.resolve_preview(Vec3::new(0.3, 0.0, 2.05), &scene) {
//!     println!("preview at {:?} (snapped: {snapped})", pose.position);
//! }
//!
//! // On click
//! let id = snapper.commit_placement(&mut scene)?;
//! ```

pub mod physics;
pub mod world;

// Placement systems (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export the placement entry points at crate level for convenience
pub use game::{PlacementConfig, RuleTable, Scene, Snapper, generate_grid};
pub use physics::{Bounds, Geometry};
pub use world::GridLattice;
