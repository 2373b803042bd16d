//! Shared Types
//!
//! Object categories, poses, edge markers and prefabs used across the
//! placement engine and its hosts.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::physics::{Bounds, Geometry, compute_bounds};

// ============================================================================
// OBJECT TYPES
// ============================================================================

/// Placement category of an object. Identifies how it snaps, not how it looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectType {
    Floor,
    Wall,
    Window,
    Seam,
    Beam,
    SideRoof,
    Door,
    Stairs,
    WallDecoration,
}

impl ObjectType {
    pub const ALL: [ObjectType; 9] = [
        ObjectType::Floor,
        ObjectType::Wall,
        ObjectType::Window,
        ObjectType::Seam,
        ObjectType::Beam,
        ObjectType::SideRoof,
        ObjectType::Door,
        ObjectType::Stairs,
        ObjectType::WallDecoration,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ObjectType::Floor => "Floor",
            ObjectType::Wall => "Wall",
            ObjectType::Window => "Window",
            ObjectType::Seam => "Seam",
            ObjectType::Beam => "Beam",
            ObjectType::SideRoof => "SideRoof",
            ObjectType::Door => "Door",
            ObjectType::Stairs => "Stairs",
            ObjectType::WallDecoration => "WallDecoration",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which face of its parent an edge marker represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeDirection {
    North,
    South,
    East,
    West,
    Top,
    VerticalSide,
    /// Opening in a wall that windows and doors fill
    WallHole,
}

/// Handle of an object owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

// ============================================================================
// POSE
// ============================================================================

/// Position + rotation of an object or edge marker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Unrotated pose at a position
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Local +Z in world space; edge markers point it away from their parent.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Compose a child pose given in this pose's local space.
    pub fn compose(&self, local: &Pose, scale: f32) -> Pose {
        Pose {
            position: self.position + self.rotation * (local.position * scale),
            rotation: self.rotation * local.rotation,
        }
    }
}

/// Yaw rotation from degrees.
pub fn yaw_degrees(degrees: f32) -> Quat {
    Quat::from_rotation_y(degrees.to_radians())
}

// ============================================================================
// EDGE MARKERS
// ============================================================================

/// Attachment point on a placed object that other objects may snap to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeMarker {
    pub name: String,
    pub direction: EdgeDirection,
    /// World pose; `forward()` points away from the parent
    pub pose: Pose,
    /// World bounds of the marker volume
    pub bounds: Bounds,
    pub parent: ObjectId,
    /// Snaps are based on this marker's position instead of the parent's
    #[serde(default)]
    pub anchor: bool,
}

/// Edge marker as authored on a prefab, in the prefab's local space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeTemplate {
    pub name: String,
    pub direction: EdgeDirection,
    pub local: Pose,
    /// Half-size of the marker volume along the marker's own axes
    pub half_size: Vec3,
    #[serde(default)]
    pub anchor: bool,
}

impl EdgeTemplate {
    pub fn new(name: &str, direction: EdgeDirection, local: Pose, half_size: Vec3) -> Self {
        Self {
            name: name.to_string(),
            direction,
            local,
            half_size,
            anchor: false,
        }
    }

    /// Marker that anchors snaps at its own position, e.g. the slot a
    /// continuing piece occupies.
    pub fn anchored(mut self) -> Self {
        self.anchor = true;
        self
    }
}

// ============================================================================
// PREFABS
// ============================================================================

/// Instantiable object description: type, local geometry, edge markers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prefab {
    pub name: String,
    pub object_type: ObjectType,
    pub geometry: Geometry,
    pub edges: Vec<EdgeTemplate>,
}

impl Prefab {
    /// World bounds of this prefab placed at `pose` with uniform `scale`.
    pub fn world_bounds(&self, pose: &Pose, scale: f32) -> Bounds {
        let geometry = self.geometry.transformed(pose.position, pose.rotation, scale);
        compute_bounds(&self.name, pose.position, &geometry)
    }

    /// World edge markers of this prefab placed under `parent`.
    pub fn world_edges(&self, parent: ObjectId, pose: &Pose, scale: f32) -> Vec<EdgeMarker> {
        self.edges
            .iter()
            .map(|edge| {
                let world = pose.compose(&edge.local, scale);
                EdgeMarker {
                    name: edge.name.clone(),
                    direction: edge.direction,
                    pose: world,
                    bounds: Bounds::new(Vec3::ZERO, edge.half_size).transformed(
                        world.position,
                        world.rotation,
                        scale,
                    ),
                    parent,
                    anchor: edge.anchor,
                }
            })
            .collect()
    }
}

/// An instantiated prefab as the host tracks it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub id: ObjectId,
    pub prefab_name: String,
    pub object_type: ObjectType,
    pub pose: Pose,
    pub scale: f32,
    pub bounds: Bounds,
    pub edges: Vec<EdgeMarker>,
}
