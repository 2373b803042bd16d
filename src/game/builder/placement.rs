//! Object Placement
//!
//! Validation and instantiation shared by single placements and room
//! generation. Only objects of the same type block each other.

use crate::game::scene::{ObjectLifecycle, SpatialQuery};
use crate::game::types::{ObjectId, ObjectType, Pose, Prefab};
use crate::physics::occupancy_volume;

/// Why a placement was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("no preview to place")]
    NoPreview,
    #[error("no placement rule for {0}")]
    MissingRule(ObjectType),
    #[error("volume already occupied by an object of the same type")]
    OccupiedVolume,
}

/// Check whether a candidate would overlap an existing object of its type.
///
/// The candidate's world bounds are shrunk to half their extents first, so
/// neighbours that only touch it are not counted.
///
/// # Arguments
/// * `scene` - Host spatial index
/// * `prefab` - Candidate prefab
/// * `pose` - Candidate pose
/// * `scale` - Uniform scale the candidate would be created with
///
/// # Returns
/// true if the volume is taken
pub fn is_volume_occupied(
    scene: &impl SpatialQuery,
    prefab: &Prefab,
    pose: &Pose,
    scale: f32,
) -> bool {
    let bounds = prefab.world_bounds(pose, scale);
    let volume = occupancy_volume(&bounds);
    let object_type = prefab.object_type;
    !scene
        .overlapping_objects(&volume, &|other| other == object_type)
        .is_empty()
}

/// Validate and instantiate one object.
pub fn place_object<S>(
    scene: &mut S,
    prefab: &Prefab,
    pose: Pose,
    scale: f32,
) -> Result<ObjectId, PlacementError>
where
    S: SpatialQuery + ObjectLifecycle,
{
    if is_volume_occupied(scene, prefab, &pose, scale) {
        log::debug!("{} at {:?} rejected: volume occupied", prefab.name, pose.position);
        return Err(PlacementError::OccupiedVolume);
    }

    let id = scene.instantiate(prefab, pose, scale);
    if scene.object(id).is_some_and(|o| o.edges.is_empty()) {
        log::warn!("{} placed without edge markers; nothing can snap to it", prefab.name);
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::building::prefabs;
    use crate::game::scene::Scene;
    use glam::Vec3;

    #[test]
    fn test_same_type_overlap_rejected() {
        let mut scene = Scene::new();
        place_object(&mut scene, &prefabs::floor(), Pose::default(), 1.0).unwrap();

        let nudged = Pose::at(Vec3::new(1.0, 0.0, 0.0));
        let result = place_object(&mut scene, &prefabs::floor(), nudged, 1.0);
        assert_eq!(result, Err(PlacementError::OccupiedVolume));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_touching_neighbour_accepted() {
        let mut scene = Scene::new();
        place_object(&mut scene, &prefabs::floor(), Pose::default(), 1.0).unwrap();
        let beside = Pose::at(Vec3::new(4.0, 0.0, 0.0));
        assert!(place_object(&mut scene, &prefabs::floor(), beside, 1.0).is_ok());
    }

    #[test]
    fn test_other_types_do_not_block() {
        let mut scene = Scene::new();
        place_object(&mut scene, &prefabs::floor(), Pose::default(), 1.0).unwrap();
        assert!(!is_volume_occupied(&scene, &prefabs::wall(), &Pose::default(), 1.0));
        assert!(place_object(&mut scene, &prefabs::wall(), Pose::default(), 1.0).is_ok());
    }
}
