//! World Module
//!
//! World-space layout helpers shared by the room generator.

pub mod grid;

pub use grid::{GridLattice, GridSide, PerimeterSlot};
