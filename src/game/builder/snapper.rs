//! Snap Resolution
//!
//! Per-tick resolution of the preview pose against nearby edge markers.
//!
//! ## States
//! - **Free**: the preview follows the raw cursor
//! - **Searching**: the nearest eligible edge is looked up
//! - **Snapped**: the resolved pose is locked until the cursor travels farther
//!   than the rule's unsnap distance from it
//!
//! The pose for a given edge is a pure function of the rule, the edge, its
//! parent and the preview's bounds ([`resolve_snap`]); [`Snapper`] owns the
//! state machine and the single preview around it.

use glam::{Quat, Vec3};

use super::placement::{PlacementError, place_object};
use super::preview::PreviewState;
use super::raycast::{overlapping_candidates, wall_hole_candidate};
use super::rules::{EdgeSearch, PlacementRule, RotationPolicy, RuleTable, ShiftAxis};
use crate::game::config::PlacementConfig;
use crate::game::scene::{ObjectLifecycle, SpatialQuery};
use crate::game::types::{EdgeMarker, ObjectId, PlacedObject, Pose, Prefab, yaw_degrees};
use crate::physics::{Bounds, height_ignored};

/// Inputs for resolving one candidate edge.
#[derive(Clone, Copy, Debug)]
pub struct SnapCandidate<'a> {
    pub edge: &'a EdgeMarker,
    pub target: &'a PlacedObject,
    /// Preview bounds at the raw pose
    pub preview_bounds: &'a Bounds,
    /// Raw cursor position
    pub raw: Vec3,
    /// Preview rotation before snapping
    pub rotation: Quat,
}

/// Resolve the snapped pose for one candidate edge.
///
/// `position = base + forward + sideways + vertical`, where `base` is the
/// target's horizontal position at the preview's height. Anchored edges
/// supply their own position instead of the target's.
pub fn resolve_snap(
    rule: &PlacementRule,
    config: &PlacementConfig,
    candidate: &SnapCandidate,
) -> Pose {
    let SnapCandidate {
        edge,
        target,
        preview_bounds,
        raw,
        rotation,
    } = *candidate;
    let scale = config.active_scale;

    let anchor = if edge.anchor { edge.pose.position } else { target.pose.position };
    let base = Vec3::new(anchor.x, raw.y, anchor.z);

    let target_shift = rule.target_shift(target.object_type).unwrap_or_default();
    let front = rule.own_front_shift.resolve(preview_bounds, ShiftAxis::Front)
        + target_shift.resolve(&target.bounds, ShiftAxis::Front);
    let forward = height_ignored(edge.pose.forward()).normalize_or_zero()
        * rule.front_shift_direction.sign()
        * front;

    let sideways = sideways_shift(rule, config, edge, preview_bounds, raw);

    let vertical = if rule.shift_down && raw.y != 0.0 {
        let drop = rule
            .drop_distance
            .map_or(preview_bounds.size().y, |distance| distance * scale);
        Vec3::Y * (config.vertical_epsilon * scale - drop)
    } else {
        Vec3::ZERO
    };

    let snapped_rotation = match rule.rotation {
        RotationPolicy::None => rotation,
        RotationPolicy::TargetRoot => target.pose.rotation,
        RotationPolicy::TargetEdge => edge.pose.rotation,
    };

    Pose::new(
        base + forward + sideways + vertical,
        (snapped_rotation * yaw_degrees(rule.rotation_offset_degrees)).normalize(),
    )
}

/// Slide toward the nearer end of an edge that is clearly longer than the
/// preview.
fn sideways_shift(
    rule: &PlacementRule,
    config: &PlacementConfig,
    edge: &EdgeMarker,
    preview_bounds: &Bounds,
    raw: Vec3,
) -> Vec3 {
    if !rule.shift_sideways {
        return Vec3::ZERO;
    }

    let edge_length = edge.bounds.longer_horizontal_side();
    let preview_length = preview_bounds.longer_horizontal_side();
    if edge_length - preview_length <= config.sideways_tolerance * config.active_scale {
        return Vec3::ZERO;
    }

    let size = edge.bounds.size();
    let axis = if size.x >= size.z { Vec3::X } else { Vec3::Z };
    let (min, max) = (edge.bounds.min().dot(axis), edge.bounds.max().dot(axis));
    let along = raw.dot(axis);
    let sign = if (along - min).abs() < (max - along).abs() { -1.0 } else { 1.0 };

    let magnitude = rule.target_sideways_shift.resolve(&edge.bounds, ShiftAxis::Along)
        - rule.own_sideways_shift.resolve(preview_bounds, ShiftAxis::Along);
    axis * sign * magnitude
}

// ============================================================================
// SNAPPER
// ============================================================================

/// Owns the rule table, the placement settings and the single preview.
#[derive(Debug, Clone)]
pub struct Snapper {
    rules: RuleTable,
    config: PlacementConfig,
    preview: Option<PreviewState>,
}

impl Default for Snapper {
    fn default() -> Self {
        Self::new(RuleTable::with_defaults(), PlacementConfig::default())
    }
}

impl Snapper {
    pub fn new(rules: RuleTable, config: PlacementConfig) -> Self {
        Self {
            rules,
            config,
            preview: None,
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleTable {
        &mut self.rules
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Replace the settings. A snapped preview is released, since its locked
    /// pose was resolved at the previous scale.
    pub fn set_config(&mut self, config: PlacementConfig) {
        self.config = config;
        if let Some(preview) = self.preview.as_mut() {
            let position = preview.pose().position;
            preview.release(position);
        }
    }

    /// Start previewing `prefab`, replacing any existing preview.
    pub fn create_preview(&mut self, prefab: Prefab, position: Vec3, ignore_snap: bool) {
        log::debug!("Previewing {}", prefab.name);
        if !ignore_snap && !self.rules.contains(prefab.object_type) {
            log::warn!(
                "No placement rule for {}; {} will not snap",
                prefab.object_type,
                prefab.name
            );
        }
        self.preview = Some(PreviewState::new(prefab, position, ignore_snap));
    }

    /// Discard the preview.
    pub fn clear_preview(&mut self) {
        if self.preview.take().is_some() {
            log::debug!("Preview cleared");
        }
    }

    pub fn preview(&self) -> Option<&PreviewState> {
        self.preview.as_ref()
    }

    pub fn rotate_preview(&mut self) {
        if let Some(preview) = self.preview.as_mut() {
            preview.rotate_quarter_turn();
        }
    }

    /// Advance the preview by one tick.
    ///
    /// # Arguments
    /// * `raw` - Cursor position on the build surface this tick
    /// * `scene` - Host spatial index
    ///
    /// # Returns
    /// The displayed pose and whether it is snapped, or `None` without a
    /// preview
    pub fn resolve_preview(
        &mut self,
        raw: Vec3,
        scene: &impl SpatialQuery,
    ) -> Option<(Pose, bool)> {
        let preview = self.preview.as_mut()?;

        if preview.ignores_snap() {
            preview.follow(raw);
            return Some((preview.pose(), false));
        }

        let Some(rule) = self.rules.get(preview.prefab().object_type) else {
            preview.release(raw);
            return Some((preview.pose(), false));
        };
        let scale = self.config.active_scale;
        let unsnap_distance = rule.unsnap_distance * scale;

        if preview.is_snapped() {
            if preview.update_hysteresis(raw, unsnap_distance) {
                log::debug!("{} unsnapped at {raw:?}", preview.prefab().name);
                return Some((preview.pose(), false));
            }
            return Some((preview.pose(), true));
        }

        preview.follow(raw);
        match find_snap(scene, &self.rules, rule, &self.config, preview, raw, unsnap_distance) {
            Some((pose, edge)) => {
                log::debug!(
                    "{} snapped to {} of object {} at {:?}",
                    preview.prefab().name,
                    edge.name,
                    edge.parent.0,
                    pose.position
                );
                preview.snap(pose, edge);
                Some((pose, true))
            }
            None => Some((preview.pose(), false)),
        }
    }

    /// Instantiate the preview at its current pose.
    ///
    /// On success the preview is consumed; on failure it is left untouched.
    pub fn commit_placement<S>(&mut self, scene: &mut S) -> Result<ObjectId, PlacementError>
    where
        S: SpatialQuery + ObjectLifecycle,
    {
        let preview = self.preview.as_ref().ok_or(PlacementError::NoPreview)?;
        let object_type = preview.prefab().object_type;
        if self.rules.get(object_type).is_none() {
            return Err(PlacementError::MissingRule(object_type));
        }

        let pose = preview.pose();
        let id = place_object(scene, preview.prefab(), pose, self.config.active_scale)?;
        log::info!(
            "Placed {} as object {} at {:?}",
            preview.prefab().name,
            id.0,
            pose.position
        );
        self.preview = None;
        Ok(id)
    }
}

/// Nearest candidate whose resolved pose stays within the release radius.
fn find_snap(
    scene: &impl SpatialQuery,
    rules: &RuleTable,
    rule: &PlacementRule,
    config: &PlacementConfig,
    preview: &PreviewState,
    raw: Vec3,
    unsnap_distance: f32,
) -> Option<(Pose, EdgeMarker)> {
    let scale = config.active_scale;
    let preview_bounds = preview.bounds_at(raw, scale);

    let candidates = match rule.edge_search {
        EdgeSearch::Overlap => overlapping_candidates(scene, rules, rule, &preview_bounds, raw),
        EdgeSearch::WallHole => {
            wall_hole_candidate(scene, rules, rule, raw, config.floor_height * scale)
                .into_iter()
                .collect()
        }
    };

    candidates.into_iter().find_map(|edge| {
        let target = scene.object(edge.parent)?;
        let pose = resolve_snap(
            rule,
            config,
            &SnapCandidate {
                edge: &edge,
                target,
                preview_bounds: &preview_bounds,
                raw,
                rotation: preview.free_rotation(),
            },
        );
        (pose.position.distance(raw) <= unsnap_distance).then_some((pose, edge))
    })
}
