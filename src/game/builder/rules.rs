//! Placement Rules
//!
//! Per-type snapping policy: what a type may snap to, how far it shifts
//! relative to its own and its target's bounds, and how it is rotated.
//! One rule per [`ObjectType`], regenerated from a fixed built-in policy.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::config::ConfigError;
use crate::game::types::ObjectType;
use crate::physics::Bounds;

/// Unsnap distance every built-in rule starts with (world units at scale 1).
pub const DEFAULT_UNSNAP_DISTANCE: f32 = 2.0;

/// Yaw added to walls snapped onto an edge so they line up with it.
pub const WALL_EDGE_YAW_DEGREES: f32 = 90.0;

// ============================================================================
// SHIFT DISTANCES
// ============================================================================

/// Bound-relative shift magnitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftDistance {
    #[default]
    None,
    Half,
    Full,
    ShorterHalf,
    NegativeShorterHalf,
}

/// Which horizontal measure of a bound a shift is resolved against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftAxis {
    /// Across the face: the shorter horizontal side
    Front,
    /// Along the edge: the longer horizontal side
    Along,
}

impl ShiftDistance {
    /// Resolve to world units against `bounds`.
    ///
    /// `Half` and `Full` use the measure selected by `axis`; the shorter
    /// variants always use the shorter horizontal side.
    pub fn resolve(self, bounds: &Bounds, axis: ShiftAxis) -> f32 {
        let shorter = bounds.shorter_horizontal_side();
        let reference = match axis {
            ShiftAxis::Front => shorter,
            ShiftAxis::Along => bounds.longer_horizontal_side(),
        };
        match self {
            ShiftDistance::None => 0.0,
            ShiftDistance::Half => reference * 0.5,
            ShiftDistance::Full => reference,
            ShiftDistance::ShorterHalf => shorter * 0.5,
            ShiftDistance::NegativeShorterHalf => -shorter * 0.5,
        }
    }
}

/// Direction the forward shift is applied along the edge's forward vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrontShiftDirection {
    #[default]
    Forward,
    Backward,
    None,
}

impl FrontShiftDirection {
    pub fn sign(self) -> f32 {
        match self {
            FrontShiftDirection::Forward => 1.0,
            FrontShiftDirection::Backward => -1.0,
            FrontShiftDirection::None => 0.0,
        }
    }
}

/// Where the snapped rotation comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationPolicy {
    /// Keep the preview's current rotation
    None,
    /// Copy the target object's rotation
    TargetRoot,
    /// Copy the edge marker's rotation
    #[default]
    TargetEdge,
}

/// How candidate edges are discovered for a type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeSearch {
    /// Edges overlapping the preview's bounds, nearest first
    #[default]
    Overlap,
    /// Wall-hole marker straight above the preview
    WallHole,
}

/// Allowed target type and the target-bound contribution to the forward shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetShift {
    pub object_type: ObjectType,
    #[serde(default)]
    pub shift: ShiftDistance,
}

impl TargetShift {
    pub fn new(object_type: ObjectType, shift: ShiftDistance) -> Self {
        Self { object_type, shift }
    }
}

// ============================================================================
// PLACEMENT RULE
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementRule {
    pub object_type: ObjectType,
    /// Cursor travel (at scale 1) that releases a snapped preview
    pub unsnap_distance: f32,
    pub edge_search: EdgeSearch,
    pub targets: Vec<TargetShift>,

    pub front_shift_direction: FrontShiftDirection,
    /// Own-bound contribution to the forward shift
    pub own_front_shift: ShiftDistance,

    pub rotation: RotationPolicy,
    /// Extra yaw composed onto the copied rotation
    pub rotation_offset_degrees: f32,

    pub shift_sideways: bool,
    pub own_sideways_shift: ShiftDistance,
    pub target_sideways_shift: ShiftDistance,

    pub shift_down: bool,
    /// Explicit drop (at scale 1); the object's own height when absent
    pub drop_distance: Option<f32>,
}

impl Default for PlacementRule {
    fn default() -> Self {
        Self::empty(ObjectType::Floor)
    }
}

impl PlacementRule {
    /// Rule that snaps to nothing.
    pub fn empty(object_type: ObjectType) -> Self {
        Self {
            object_type,
            unsnap_distance: DEFAULT_UNSNAP_DISTANCE,
            edge_search: EdgeSearch::Overlap,
            targets: Vec::new(),
            front_shift_direction: FrontShiftDirection::Forward,
            own_front_shift: ShiftDistance::None,
            rotation: RotationPolicy::TargetEdge,
            rotation_offset_degrees: 0.0,
            shift_sideways: false,
            own_sideways_shift: ShiftDistance::None,
            target_sideways_shift: ShiftDistance::None,
            shift_down: false,
            drop_distance: None,
        }
    }

    /// Built-in policy for a type.
    pub fn defaults_for(object_type: ObjectType) -> Self {
        use ObjectType::*;
        use ShiftDistance as D;

        let mut rule = Self::empty(object_type);

        rule.targets = match object_type {
            Floor | Stairs => vec![
                TargetShift::new(Floor, D::Half),
                TargetShift::new(Wall, D::None),
                TargetShift::new(Stairs, D::Half),
            ],
            Wall => vec![TargetShift::new(Floor, D::Half), TargetShift::new(Wall, D::None)],
            Window | Door => vec![TargetShift::new(Wall, D::None)],
            Beam => vec![TargetShift::new(Wall, D::Half), TargetShift::new(Floor, D::Half)],
            SideRoof => vec![TargetShift::new(Beam, D::NegativeShorterHalf)],
            WallDecoration => vec![TargetShift::new(Wall, D::ShorterHalf)],
            Seam => Vec::new(),
        };

        rule.own_front_shift = match object_type {
            Floor | Stairs => D::Half,
            SideRoof => D::ShorterHalf,
            _ => D::None,
        };

        rule.rotation = match object_type {
            Floor => RotationPolicy::None,
            Window => RotationPolicy::TargetRoot,
            _ => RotationPolicy::TargetEdge,
        };
        if object_type == Wall {
            rule.rotation_offset_degrees = WALL_EDGE_YAW_DEGREES;
        }

        if object_type == Beam {
            rule.shift_sideways = true;
            rule.target_sideways_shift = D::Half;
        }

        rule.shift_down = matches!(object_type, Floor | Seam);

        if matches!(object_type, Window | Door) {
            rule.edge_search = EdgeSearch::WallHole;
        }

        rule
    }

    /// Target-bound contribution for `target`, or `None` if it is not an
    /// allowed target.
    pub fn target_shift(&self, target: ObjectType) -> Option<ShiftDistance> {
        self.targets
            .iter()
            .find(|t| t.object_type == target)
            .map(|t| t.shift)
    }

    pub fn allows(&self, target: ObjectType) -> bool {
        self.target_shift(target).is_some()
    }
}

// ============================================================================
// RULE TABLE
// ============================================================================

/// Rules keyed by type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    rules: BTreeMap<ObjectType, PlacementRule>,
}

impl RuleTable {
    /// Empty table: nothing snaps until rules are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the built-in rule for every type.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for object_type in ObjectType::ALL {
            table.regenerate_defaults(object_type);
        }
        table
    }

    /// Rule for a type. A missing rule is a configuration error; callers
    /// skip snapping for that type.
    pub fn get(&self, object_type: ObjectType) -> Option<&PlacementRule> {
        let rule = self.rules.get(&object_type);
        if rule.is_none() {
            log::debug!("No placement rule for {object_type}");
        }
        rule
    }

    pub fn contains(&self, object_type: ObjectType) -> bool {
        self.rules.contains_key(&object_type)
    }

    /// Rebuild one type's rule from the built-in policy.
    pub fn regenerate_defaults(&mut self, object_type: ObjectType) {
        self.rules
            .insert(object_type, PlacementRule::defaults_for(object_type));
    }

    /// Replace the rule for `rule.object_type`.
    pub fn set(&mut self, rule: PlacementRule) {
        self.rules.insert(rule.object_type, rule);
    }

    pub fn remove(&mut self, object_type: ObjectType) -> Option<PlacementRule> {
        self.rules.remove(&object_type)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let table: Self = serde_json::from_str(json)?;
        for (key, rule) in &table.rules {
            if *key != rule.object_type {
                return Err(ConfigError::Invalid(format!(
                    "rule stored under {key} describes {}",
                    rule.object_type
                )));
            }
            if !(rule.unsnap_distance >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "unsnap_distance for {key} must not be negative"
                )));
            }
        }
        Ok(table)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn wall_bounds() -> Bounds {
        Bounds::from_size(Vec3::ZERO, Vec3::new(0.2, 6.0, 4.0))
    }

    #[test]
    fn test_every_type_has_a_default_rule() {
        let table = RuleTable::with_defaults();
        assert_eq!(table.len(), ObjectType::ALL.len());
        for object_type in ObjectType::ALL {
            assert_eq!(table.get(object_type).map(|r| r.object_type), Some(object_type));
        }
    }

    #[test]
    fn test_floor_defaults() {
        let rule = PlacementRule::defaults_for(ObjectType::Floor);
        assert_eq!(rule.target_shift(ObjectType::Floor), Some(ShiftDistance::Half));
        assert_eq!(rule.target_shift(ObjectType::Wall), Some(ShiftDistance::None));
        assert_eq!(rule.target_shift(ObjectType::Stairs), Some(ShiftDistance::Half));
        assert_eq!(rule.own_front_shift, ShiftDistance::Half);
        assert_eq!(rule.rotation, RotationPolicy::None);
        assert!(rule.shift_down);
        assert!(!rule.allows(ObjectType::Beam));
    }

    #[test]
    fn test_beam_and_roof_defaults() {
        let beam = PlacementRule::defaults_for(ObjectType::Beam);
        assert!(beam.shift_sideways);
        assert_eq!(beam.target_sideways_shift, ShiftDistance::Half);
        assert_eq!(beam.target_shift(ObjectType::Wall), Some(ShiftDistance::Half));

        let roof = PlacementRule::defaults_for(ObjectType::SideRoof);
        assert_eq!(roof.own_front_shift, ShiftDistance::ShorterHalf);
        assert_eq!(roof.target_shift(ObjectType::Beam), Some(ShiftDistance::NegativeShorterHalf));
    }

    #[test]
    fn test_window_and_wall_rotation_defaults() {
        let window = PlacementRule::defaults_for(ObjectType::Window);
        assert_eq!(window.rotation, RotationPolicy::TargetRoot);
        assert_eq!(window.edge_search, EdgeSearch::WallHole);

        let wall = PlacementRule::defaults_for(ObjectType::Wall);
        assert_eq!(wall.rotation, RotationPolicy::TargetEdge);
        assert_eq!(wall.rotation_offset_degrees, 90.0);
        assert!(!wall.shift_down);
    }

    #[test]
    fn test_seam_snaps_to_nothing() {
        let seam = PlacementRule::defaults_for(ObjectType::Seam);
        assert!(seam.targets.is_empty());
        assert!(seam.shift_down);
    }

    #[test]
    fn test_shift_resolution_uses_shorter_side_across_faces() {
        let wall = wall_bounds();
        assert!((ShiftDistance::Half.resolve(&wall, ShiftAxis::Front) - 0.1).abs() < 1e-6);
        assert!((ShiftDistance::Full.resolve(&wall, ShiftAxis::Front) - 0.2).abs() < 1e-6);
        let inward = ShiftDistance::NegativeShorterHalf.resolve(&wall, ShiftAxis::Front);
        assert!((inward + 0.1).abs() < 1e-6);
        assert_eq!(ShiftDistance::None.resolve(&wall, ShiftAxis::Front), 0.0);
    }

    #[test]
    fn test_shift_resolution_along_edge_uses_longer_side() {
        let wall = wall_bounds();
        assert!((ShiftDistance::Half.resolve(&wall, ShiftAxis::Along) - 2.0).abs() < 1e-6);
        assert!((ShiftDistance::ShorterHalf.resolve(&wall, ShiftAxis::Along) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_regenerate_restores_edited_rule() {
        let mut table = RuleTable::with_defaults();
        let mut edited = PlacementRule::defaults_for(ObjectType::Wall);
        edited.targets.clear();
        table.set(edited);
        assert!(!table.get(ObjectType::Wall).unwrap().allows(ObjectType::Floor));

        table.regenerate_defaults(ObjectType::Wall);
        assert!(table.get(ObjectType::Wall).unwrap().allows(ObjectType::Floor));
    }

    #[test]
    fn test_missing_rule_is_none() {
        let mut table = RuleTable::with_defaults();
        table.remove(ObjectType::Door);
        assert!(table.get(ObjectType::Door).is_none());
    }

    #[test]
    fn test_json_round_trip_preserves_table() {
        let table = RuleTable::with_defaults();
        let json = table.to_json_string().unwrap();
        assert_eq!(RuleTable::from_json_str(&json).unwrap(), table);
    }

    #[test]
    fn test_mismatched_key_rejected() {
        let json = r#"{ "rules": { "Wall": { "object_type": "Floor" } } }"#;
        assert!(matches!(RuleTable::from_json_str(json), Err(ConfigError::Invalid(_))));
    }
}
