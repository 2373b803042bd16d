//! Building System - Prefabs and room generation
//!
//! Features:
//! - Built-in prefab set with edge markers for every placement type
//! - Click-and-drag rooms: a floor lattice ringed by walls

pub mod prefabs;
pub mod room_builder;

pub use prefabs::{find_prefab, standard_prefabs};
pub use room_builder::{DragState, GridSpec, ObjectGroup, RoomDrag, RoomGroup, generate_grid};
