//! Physics module for the Blueprint engine
//!
//! Geometry helpers the placement engine is built on. No simulation lives
//! here; placed objects are static boxes.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, Y is up, X/Z span the ground plane.
//!
//! # Submodules
//!
//! - [`bounds`] - Axis-aligned bounds and bound computation from geometry
//! - [`collision`] - Ray-box and overlap-box queries

pub mod bounds;
pub mod collision;

pub use bounds::{Bounds, Geometry, compute_bounds, height_ignored};
pub use collision::{OverlapBox, occupancy_volume, ray_bounds_intersect};
