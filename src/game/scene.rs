//! Scene Host
//!
//! Capabilities the placement engine needs from its host, and an in-memory
//! host that implements them with linear scans over placed objects.
//!
//! Any host (game engine, headless tool, web canvas) can implement
//! [`SpatialQuery`] and [`ObjectLifecycle`] over its own spatial index.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::game::types::{EdgeMarker, ObjectId, ObjectType, PlacedObject, Pose, Prefab};
use crate::physics::{Bounds, OverlapBox, ray_bounds_intersect};

/// Read-only spatial queries over placed objects.
///
/// Queries are side-effect free. Result order is unspecified; the engine
/// sorts candidates itself.
pub trait SpatialQuery {
    fn object(&self, id: ObjectId) -> Option<&PlacedObject>;

    /// Edge markers overlapping `query` whose parent type passes `filter`.
    fn overlapping_edges(
        &self,
        query: &OverlapBox,
        filter: &dyn Fn(ObjectType) -> bool,
    ) -> Vec<EdgeMarker>;

    /// Objects overlapping `query` whose type passes `filter`.
    fn overlapping_objects(
        &self,
        query: &OverlapBox,
        filter: &dyn Fn(ObjectType) -> bool,
    ) -> Vec<ObjectId>;

    /// First edge marker hit by a ray within `max_distance`.
    fn raycast_edge(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<EdgeMarker>;

    fn bounds(&self, id: ObjectId) -> Option<Bounds> {
        self.object(id).map(|o| o.bounds)
    }
}

/// Object creation and removal.
pub trait ObjectLifecycle {
    fn instantiate(&mut self, prefab: &Prefab, pose: Pose, scale: f32) -> ObjectId;

    /// Returns false when the id was not present.
    fn destroy(&mut self, id: ObjectId) -> bool;
}

/// In-memory host keeping placed objects in id order.
#[derive(Debug, Default)]
pub struct Scene {
    objects: BTreeMap<ObjectId, PlacedObject>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn objects(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.values()
    }

    pub fn count_of(&self, object_type: ObjectType) -> usize {
        self.objects
            .values()
            .filter(|o| o.object_type == object_type)
            .count()
    }
}

impl SpatialQuery for Scene {
    fn object(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.objects.get(&id)
    }

    fn overlapping_edges(
        &self,
        query: &OverlapBox,
        filter: &dyn Fn(ObjectType) -> bool,
    ) -> Vec<EdgeMarker> {
        let volume = query.enclosing_bounds();
        self.objects
            .values()
            .filter(|o| filter(o.object_type))
            .flat_map(|o| o.edges.iter())
            .filter(|edge| volume.intersects(&edge.bounds))
            .cloned()
            .collect()
    }

    fn overlapping_objects(
        &self,
        query: &OverlapBox,
        filter: &dyn Fn(ObjectType) -> bool,
    ) -> Vec<ObjectId> {
        let volume = query.enclosing_bounds();
        self.objects
            .values()
            .filter(|o| filter(o.object_type) && volume.intersects(&o.bounds))
            .map(|o| o.id)
            .collect()
    }

    fn raycast_edge(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<EdgeMarker> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        self.objects
            .values()
            .flat_map(|o| o.edges.iter())
            .filter_map(|edge| {
                ray_bounds_intersect(origin, direction, &edge.bounds)
                    .filter(|t| *t <= max_distance)
                    .map(|t| (t, edge))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, edge)| edge.clone())
    }
}

impl ObjectLifecycle for Scene {
    fn instantiate(&mut self, prefab: &Prefab, pose: Pose, scale: f32) -> ObjectId {
        self.next_id += 1;
        let id = ObjectId(self.next_id);

        let object = PlacedObject {
            id,
            prefab_name: prefab.name.clone(),
            object_type: prefab.object_type,
            pose,
            scale,
            bounds: prefab.world_bounds(&pose, scale),
            edges: prefab.world_edges(id, &pose, scale),
        };
        self.objects.insert(id, object);
        id
    }

    fn destroy(&mut self, id: ObjectId) -> bool {
        self.objects.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::building::prefabs;

    #[test]
    fn test_instantiate_assigns_increasing_ids() {
        let mut scene = Scene::new();
        let a = scene.instantiate(&prefabs::floor(), Pose::default(), 1.0);
        let b = scene.instantiate(&prefabs::floor(), Pose::at(Vec3::new(4.0, 0.0, 0.0)), 1.0);
        assert!(b > a);
        assert_eq!(scene.len(), 2);
        assert!(scene.destroy(a));
        assert!(!scene.destroy(a));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_overlapping_edges_respects_filter() {
        let mut scene = Scene::new();
        scene.instantiate(&prefabs::floor(), Pose::default(), 1.0);
        let query =
            OverlapBox::axis_aligned(&Bounds::new(Vec3::new(2.0, 0.0, 0.0), Vec3::splat(0.5)));

        let edges = scene.overlapping_edges(&query, &|t| t == ObjectType::Floor);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].name, "East");

        let none = scene.overlapping_edges(&query, &|t| t == ObjectType::Wall);
        assert!(none.is_empty());
    }

    #[test]
    fn test_raycast_finds_nearest_edge() {
        let mut scene = Scene::new();
        scene.instantiate(&prefabs::wall_window(), Pose::default(), 1.0);
        let hit = scene.raycast_edge(Vec3::ZERO, Vec3::Y, 6.0);
        assert_eq!(hit.map(|e| e.name), Some("Hole".to_string()));

        let too_short = scene.raycast_edge(Vec3::ZERO, Vec3::Y, 0.25);
        assert!(too_short.is_none());
    }
}
