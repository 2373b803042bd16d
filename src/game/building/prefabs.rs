//! Standard Prefabs
//!
//! Built-in prefab set with edge markers laid out for the snapping rules.
//!
//! Conventions (scale 1, origin at the base center):
//! - floor-like pieces span X/Z, their four side markers point outward
//! - walls run along their local Z axis and face local +X; snapping a wall
//!   onto a floor edge turns it a quarter turn so it lines up with that edge
//! - marker volumes use the marker's own frame: X along the edge, Z out of it
//! - anchored markers stand where the next piece goes; snaps onto them are
//!   based at the marker rather than at the piece that owns it

use glam::Vec3;

use crate::game::types::{EdgeDirection, EdgeTemplate, ObjectType, Pose, Prefab, yaw_degrees};
use crate::physics::{Bounds, Geometry};

/// Floor tile edge length; matches the default room cell pitch.
pub const FLOOR_SIZE: f32 = 4.0;
pub const FLOOR_THICKNESS: f32 = 0.2;
pub const WALL_HEIGHT: f32 = 6.0;
pub const WALL_THICKNESS: f32 = 0.2;

/// Outward side markers for a rectangular piece.
fn side_edges(size_x: f32, size_z: f32, y: f32, thickness: f32) -> Vec<EdgeTemplate> {
    let (hx, hz) = (size_x * 0.5, size_z * 0.5);
    let t = thickness * 0.5;
    vec![
        EdgeTemplate::new(
            "North",
            EdgeDirection::North,
            Pose::at(Vec3::new(0.0, y, hz)),
            Vec3::new(hx, t, t),
        ),
        EdgeTemplate::new(
            "South",
            EdgeDirection::South,
            Pose::new(Vec3::new(0.0, y, -hz), yaw_degrees(180.0)),
            Vec3::new(hx, t, t),
        ),
        EdgeTemplate::new(
            "East",
            EdgeDirection::East,
            Pose::new(Vec3::new(hx, y, 0.0), yaw_degrees(90.0)),
            Vec3::new(hz, t, t),
        ),
        EdgeTemplate::new(
            "West",
            EdgeDirection::West,
            Pose::new(Vec3::new(-hx, y, 0.0), yaw_degrees(-90.0)),
            Vec3::new(hz, t, t),
        ),
    ]
}

fn box_geometry(center: Vec3, size: Vec3) -> Geometry {
    Geometry::solid(Bounds::from_size(center, size))
}

pub fn floor() -> Prefab {
    Prefab {
        name: "Floor".to_string(),
        object_type: ObjectType::Floor,
        geometry: box_geometry(
            Vec3::new(0.0, FLOOR_THICKNESS * 0.5, 0.0),
            Vec3::new(FLOOR_SIZE, FLOOR_THICKNESS, FLOOR_SIZE),
        ),
        edges: side_edges(FLOOR_SIZE, FLOOR_SIZE, FLOOR_THICKNESS * 0.5, FLOOR_THICKNESS),
    }
}

pub fn stairs() -> Prefab {
    let height = WALL_HEIGHT * 0.5;
    Prefab {
        name: "Stairs".to_string(),
        object_type: ObjectType::Stairs,
        geometry: box_geometry(
            Vec3::new(0.0, height * 0.5, 0.0),
            Vec3::new(FLOOR_SIZE, height, FLOOR_SIZE),
        ),
        edges: side_edges(FLOOR_SIZE, FLOOR_SIZE, FLOOR_THICKNESS * 0.5, FLOOR_THICKNESS),
    }
}

/// Wall markers: a top strip per face, the two faces, and an anchored slot
/// past each end where the next wall in line goes.
fn wall_edges() -> Vec<EdgeTemplate> {
    let half_len = FLOOR_SIZE * 0.5;
    let half_thick = WALL_THICKNESS * 0.5;
    let mid_height = WALL_HEIGHT * 0.5;
    vec![
        EdgeTemplate::new(
            "TopFront",
            EdgeDirection::Top,
            Pose::new(Vec3::new(half_thick, WALL_HEIGHT, 0.0), yaw_degrees(90.0)),
            Vec3::new(half_len, 0.1, 0.05),
        ),
        EdgeTemplate::new(
            "TopBack",
            EdgeDirection::Top,
            Pose::new(Vec3::new(-half_thick, WALL_HEIGHT, 0.0), yaw_degrees(-90.0)),
            Vec3::new(half_len, 0.1, 0.05),
        ),
        EdgeTemplate::new(
            "FrontFace",
            EdgeDirection::East,
            Pose::new(Vec3::new(half_thick, mid_height, 0.0), yaw_degrees(90.0)),
            Vec3::new(half_len, mid_height, 0.05),
        ),
        EdgeTemplate::new(
            "BackFace",
            EdgeDirection::West,
            Pose::new(Vec3::new(-half_thick, mid_height, 0.0), yaw_degrees(-90.0)),
            Vec3::new(half_len, mid_height, 0.05),
        ),
        // Slots are one wall long; a wall snapped here lines up end to end
        EdgeTemplate::new(
            "NextNorth",
            EdgeDirection::VerticalSide,
            Pose::new(Vec3::new(0.0, mid_height, FLOOR_SIZE), yaw_degrees(-90.0)),
            Vec3::new(half_len, mid_height, half_thick),
        )
        .anchored(),
        EdgeTemplate::new(
            "NextSouth",
            EdgeDirection::VerticalSide,
            Pose::new(Vec3::new(0.0, mid_height, -FLOOR_SIZE), yaw_degrees(-90.0)),
            Vec3::new(half_len, mid_height, half_thick),
        )
        .anchored(),
    ]
}

pub fn wall() -> Prefab {
    Prefab {
        name: "Wall".to_string(),
        object_type: ObjectType::Wall,
        geometry: box_geometry(
            Vec3::new(0.0, WALL_HEIGHT * 0.5, 0.0),
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, FLOOR_SIZE),
        ),
        edges: wall_edges(),
    }
}

/// Wall with a 2x2 opening; its geometry is renderer-only, split around
/// the hole.
pub fn wall_window() -> Prefab {
    let t = WALL_THICKNESS;
    let piece = |min: Vec3, max: Vec3| Bounds::from_min_max(min, max);
    let renderers = vec![
        piece(Vec3::new(-t * 0.5, 0.0, -2.0), Vec3::new(t * 0.5, WALL_HEIGHT, -1.0)),
        piece(Vec3::new(-t * 0.5, 0.0, 1.0), Vec3::new(t * 0.5, WALL_HEIGHT, 2.0)),
        piece(Vec3::new(-t * 0.5, 0.0, -1.0), Vec3::new(t * 0.5, 0.5, 1.0)),
        piece(Vec3::new(-t * 0.5, 2.5, -1.0), Vec3::new(t * 0.5, WALL_HEIGHT, 1.0)),
    ];

    let mut edges = wall_edges();
    edges.push(EdgeTemplate::new(
        "Hole",
        EdgeDirection::WallHole,
        Pose::new(Vec3::new(0.0, 1.5, 0.0), yaw_degrees(90.0)),
        Vec3::new(1.0, 1.0, 0.6),
    ));

    Prefab {
        name: "WallWindow".to_string(),
        object_type: ObjectType::Wall,
        geometry: Geometry {
            collider: None,
            renderers,
        },
        edges,
    }
}

pub fn window() -> Prefab {
    Prefab {
        name: "Window".to_string(),
        object_type: ObjectType::Window,
        geometry: box_geometry(Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.1, 2.0, 2.0)),
        edges: Vec::new(),
    }
}

pub fn door() -> Prefab {
    Prefab {
        name: "Door".to_string(),
        object_type: ObjectType::Door,
        geometry: box_geometry(Vec3::new(0.0, 1.25, 0.0), Vec3::new(0.1, 2.5, 1.2)),
        edges: Vec::new(),
    }
}

pub fn beam() -> Prefab {
    let size = Vec3::new(0.3, 0.3, 1.0);
    Prefab {
        name: "Beam".to_string(),
        object_type: ObjectType::Beam,
        geometry: box_geometry(Vec3::new(0.0, size.y * 0.5, 0.0), size),
        edges: vec![
            EdgeTemplate::new(
                "East",
                EdgeDirection::East,
                Pose::new(Vec3::new(size.x * 0.5, size.y * 0.5, 0.0), yaw_degrees(90.0)),
                Vec3::new(size.z * 0.5, size.y * 0.5, 0.05),
            ),
            EdgeTemplate::new(
                "West",
                EdgeDirection::West,
                Pose::new(Vec3::new(-size.x * 0.5, size.y * 0.5, 0.0), yaw_degrees(-90.0)),
                Vec3::new(size.z * 0.5, size.y * 0.5, 0.05),
            ),
        ],
    }
}

pub fn side_roof() -> Prefab {
    Prefab {
        name: "SideRoof".to_string(),
        object_type: ObjectType::SideRoof,
        geometry: box_geometry(Vec3::new(0.0, 0.05, 0.0), Vec3::new(2.0, 0.1, 4.0)),
        edges: Vec::new(),
    }
}

pub fn seam() -> Prefab {
    Prefab {
        name: "Seam".to_string(),
        object_type: ObjectType::Seam,
        geometry: box_geometry(Vec3::new(0.0, 0.1, 0.0), Vec3::new(0.2, 0.2, FLOOR_SIZE)),
        edges: Vec::new(),
    }
}

pub fn wall_decoration() -> Prefab {
    Prefab {
        name: "WallDecoration".to_string(),
        object_type: ObjectType::WallDecoration,
        geometry: box_geometry(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.1, 1.0, 1.0)),
        edges: Vec::new(),
    }
}

/// Every built-in prefab.
pub fn standard_prefabs() -> Vec<Prefab> {
    vec![
        floor(),
        stairs(),
        wall(),
        wall_window(),
        window(),
        door(),
        beam(),
        side_roof(),
        seam(),
        wall_decoration(),
    ]
}

/// Look up a built-in prefab by name.
pub fn find_prefab(name: &str) -> Option<Prefab> {
    standard_prefabs().into_iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::ObjectId;

    #[test]
    fn test_floor_edges_point_outward() {
        let prefab = floor();
        let edges = prefab.world_edges(ObjectId(1), &Pose::default(), 1.0);
        assert_eq!(edges.len(), 4);
        for edge in &edges {
            let outward = edge.pose.position.normalize_or_zero();
            let forward = edge.pose.forward();
            assert!(
                forward.dot(Vec3::new(outward.x, 0.0, outward.z).normalize()) > 0.99,
                "{} edge should face away from the floor",
                edge.name
            );
        }
    }

    #[test]
    fn test_side_edge_volumes_run_along_the_side() {
        let edges = floor().world_edges(ObjectId(1), &Pose::default(), 1.0);
        let east = edges.iter().find(|e| e.name == "East").unwrap();
        assert!((east.bounds.size().z - FLOOR_SIZE).abs() < 1e-4);
        assert!(east.bounds.size().x < 0.5);
    }

    #[test]
    fn test_wall_top_has_a_marker_per_face() {
        let edges = wall().world_edges(ObjectId(1), &Pose::default(), 1.0);
        let tops: Vec<_> = edges.iter().filter(|e| e.direction == EdgeDirection::Top).collect();
        assert_eq!(tops.len(), 2);
        assert!(tops.iter().any(|e| e.pose.forward().x > 0.99));
        assert!(tops.iter().any(|e| e.pose.forward().x < -0.99));
    }

    #[test]
    fn test_wall_end_slots_are_anchored_past_the_ends() {
        let edges = wall().world_edges(ObjectId(1), &Pose::default(), 1.0);
        let slots: Vec<_> = edges.iter().filter(|e| e.anchor).collect();
        assert_eq!(slots.len(), 2);
        for slot in slots {
            // Clear of the wall itself, which spans z -2..2
            assert!(slot.bounds.min().z >= 2.0 - 1e-4 || slot.bounds.max().z <= -2.0 + 1e-4);
            assert!((slot.bounds.size().z - FLOOR_SIZE).abs() < 1e-4);
        }
    }

    #[test]
    fn test_window_wall_bounds_merge_renderer_pieces() {
        let bounds = wall_window().world_bounds(&Pose::default(), 1.0);
        let expected = Vec3::new(WALL_THICKNESS, WALL_HEIGHT, FLOOR_SIZE);
        assert!((bounds.size() - expected).length() < 1e-4);
    }

    #[test]
    fn test_find_prefab_by_name() {
        assert_eq!(find_prefab("Beam").map(|p| p.object_type), Some(ObjectType::Beam));
        assert!(find_prefab("Chimney").is_none());
    }
}
