//! Edge Discovery
//!
//! Finds the edge markers a preview may snap to. Two searches exist: an
//! overlap query around the preview's own bounds, and an upward ray for
//! openings in walls.

use glam::Vec3;

use super::rules::{PlacementRule, RuleTable};
use crate::game::scene::SpatialQuery;
use crate::game::types::{EdgeDirection, EdgeMarker, ObjectType};
use crate::physics::{Bounds, OverlapBox};

/// Query box for the overlap search: the preview's bounds at the raw pose,
/// moved so their base sits at the raw height.
pub fn search_volume(preview_bounds: &Bounds, raw: Vec3) -> OverlapBox {
    let lift = raw.y - preview_bounds.min().y;
    OverlapBox::axis_aligned(&preview_bounds.translated(Vec3::Y * lift))
}

/// Whether an edge on a `parent_type` object is eligible under `rule`.
///
/// The parent needs a rule of its own; otherwise nothing could ever snap
/// back onto the piece placed against it.
fn eligible_target(rules: &RuleTable, rule: &PlacementRule, parent_type: ObjectType) -> bool {
    rule.allows(parent_type) && rules.contains(parent_type)
}

/// Edges overlapping the preview, nearest first.
///
/// # Arguments
/// * `scene` - Host spatial index
/// * `rules` - Rule table (parents without a rule are skipped)
/// * `rule` - Rule of the preview's type
/// * `preview_bounds` - Preview bounds at the raw pose
/// * `raw` - Raw cursor position (the preview origin)
///
/// # Returns
/// Candidate edges sorted by distance from the edge to `raw`
pub fn overlapping_candidates(
    scene: &impl SpatialQuery,
    rules: &RuleTable,
    rule: &PlacementRule,
    preview_bounds: &Bounds,
    raw: Vec3,
) -> Vec<EdgeMarker> {
    if rule.targets.is_empty() {
        return Vec::new();
    }

    let query = search_volume(preview_bounds, raw);
    let filter = |parent_type: ObjectType| eligible_target(rules, rule, parent_type);
    let mut edges = scene.overlapping_edges(&query, &filter);

    edges.sort_by(|a, b| {
        a.pose
            .position
            .distance(raw)
            .total_cmp(&b.pose.position.distance(raw))
    });
    edges
}

/// Wall opening straight above the preview.
///
/// Casts a ray up from `raw` and accepts only the first marker hit, and only
/// when it is a [`EdgeDirection::WallHole`] on an eligible parent.
///
/// # Arguments
/// * `reach` - Maximum ray length in world units (one storey, scaled)
pub fn wall_hole_candidate(
    scene: &impl SpatialQuery,
    rules: &RuleTable,
    rule: &PlacementRule,
    raw: Vec3,
    reach: f32,
) -> Option<EdgeMarker> {
    let hit = scene.raycast_edge(raw, Vec3::Y, reach)?;
    if hit.direction != EdgeDirection::WallHole {
        return None;
    }

    let parent_type = scene.object(hit.parent)?.object_type;
    eligible_target(rules, rule, parent_type).then_some(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::building::prefabs;
    use crate::game::scene::{ObjectLifecycle, Scene};
    use crate::game::types::Pose;

    #[test]
    fn test_search_volume_rests_on_raw_height() {
        let window = prefabs::window().world_bounds(&Pose::default(), 1.0);
        let volume = search_volume(&window, Vec3::new(0.0, 3.0, 0.0)).enclosing_bounds();
        assert!((volume.min().y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_candidates_sorted_nearest_first() {
        let mut scene = Scene::new();
        scene.instantiate(&prefabs::floor(), Pose::default(), 1.0);
        let rules = RuleTable::with_defaults();
        let rule = rules.get(ObjectType::Floor).unwrap();

        // Near the north-east corner: overlaps North and East
        let raw = Vec3::new(3.5, 0.0, 3.0);
        let bounds = prefabs::floor().world_bounds(&Pose::at(raw), 1.0);
        let edges = overlapping_candidates(&scene, &rules, rule, &bounds, raw);

        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].name, "East");
        assert_eq!(edges[1].name, "North");
    }

    #[test]
    fn test_parent_without_rule_is_skipped() {
        let mut scene = Scene::new();
        scene.instantiate(&prefabs::floor(), Pose::default(), 1.0);
        let mut rules = RuleTable::with_defaults();
        rules.remove(ObjectType::Floor);
        let rule = PlacementRule::defaults_for(ObjectType::Wall);

        let raw = Vec3::new(2.05, 0.0, 0.0);
        let bounds = prefabs::wall().world_bounds(&Pose::at(raw), 1.0);
        assert!(overlapping_candidates(&scene, &rules, &rule, &bounds, raw).is_empty());
    }

    #[test]
    fn test_wall_hole_found_above_preview() {
        let mut scene = Scene::new();
        scene.instantiate(&prefabs::wall_window(), Pose::default(), 1.0);
        let rules = RuleTable::with_defaults();
        let rule = rules.get(ObjectType::Window).unwrap();

        let hit = wall_hole_candidate(&scene, &rules, rule, Vec3::new(0.0, 0.0, 0.4), 6.0);
        assert_eq!(hit.map(|e| e.direction), Some(EdgeDirection::WallHole));

        // Outside the opening the ray starts inside the front face marker
        let miss = wall_hole_candidate(&scene, &rules, rule, Vec3::new(0.1, 0.0, 1.5), 6.5);
        assert!(miss.is_none());
    }
}
