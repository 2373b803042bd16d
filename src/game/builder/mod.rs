//! Builder Module
//!
//! Placement of single objects: per-type rules, edge discovery, snap
//! resolution for the preview, and validation before anything is created.

pub mod rules;
pub mod preview;
pub mod raycast;
pub mod snapper;
pub mod placement;

pub use rules::{
    EdgeSearch, FrontShiftDirection, PlacementRule, RotationPolicy, RuleTable, ShiftAxis,
    ShiftDistance, TargetShift,
};
pub use preview::PreviewState;
pub use raycast::{overlapping_candidates, search_volume, wall_hole_candidate};
pub use snapper::{SnapCandidate, Snapper, resolve_snap};
pub use placement::{PlacementError, is_volume_occupied, place_object};
