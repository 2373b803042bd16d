//! Bounds Utility
//!
//! Axis-aligned bounds for placed objects, built from their collider or
//! renderer boxes, plus the horizontal measures the snapping rules work with.

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box stored as center + half-size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub center: Vec3,
    /// Half-size per axis, never negative
    pub extents: Vec3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::zero_at(Vec3::ZERO)
    }
}

impl Bounds {
    pub fn new(center: Vec3, extents: Vec3) -> Self {
        Self {
            center,
            extents: extents.abs(),
        }
    }

    /// Bounds from a full size instead of half-size.
    pub fn from_size(center: Vec3, size: Vec3) -> Self {
        Self::new(center, size * 0.5)
    }

    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        let lo = min.min(max);
        let hi = min.max(max);
        Self {
            center: (lo + hi) * 0.5,
            extents: (hi - lo) * 0.5,
        }
    }

    /// Zero-size bounds at a point (degenerate geometry)
    pub fn zero_at(point: Vec3) -> Self {
        Self {
            center: point,
            extents: Vec3::ZERO,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    pub fn size(&self) -> Vec3 {
        self.extents * 2.0
    }

    pub fn is_degenerate(&self) -> bool {
        self.extents == Vec3::ZERO
    }

    /// `max(size.x, size.z)`: height is ignored.
    pub fn longer_horizontal_side(&self) -> f32 {
        let size = self.size();
        size.x.max(size.z)
    }

    /// `min(size.x, size.z)`: the thin, front-facing dimension of walls.
    pub fn shorter_horizontal_side(&self) -> f32 {
        let size = self.size();
        size.x.min(size.z)
    }

    /// Grow to include another box.
    pub fn encapsulate(&mut self, other: &Bounds) {
        *self = Self::from_min_max(self.min().min(other.min()), self.max().max(other.max()));
    }

    /// Strict overlap test: boxes that only touch do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x
            && a_max.x > b_min.x
            && a_min.y < b_max.y
            && a_max.y > b_min.y
            && a_min.z < b_max.z
            && a_max.z > b_min.z
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        let (min, max) = (self.min(), self.max());
        point.cmpge(min).all() && point.cmple(max).all()
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            center: self.center + offset,
            extents: self.extents,
        }
    }

    /// Same center, extents multiplied by `factor`.
    pub fn scaled_extents(&self, factor: f32) -> Self {
        Self::new(self.center, self.extents * factor)
    }

    /// Move a local-space box into world space.
    ///
    /// The result is the axis-aligned box enclosing the rotated box, which is
    /// exact for quarter-turn rotations about the vertical axis.
    pub fn transformed(&self, position: Vec3, rotation: Quat, scale: f32) -> Self {
        let m = Mat3::from_quat(rotation);
        let e = self.extents * scale;
        let extents = m.x_axis.abs() * e.x + m.y_axis.abs() * e.y + m.z_axis.abs() * e.z;
        Self::new(position + rotation * (self.center * scale), extents)
    }
}

/// Collision and visual boxes describing an object's shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Explicit collision volume; preferred when present
    pub collider: Option<Bounds>,
    /// Boxes of every renderable sub-part
    pub renderers: Vec<Bounds>,
}

impl Geometry {
    /// Geometry with a single box used as both collider and renderer.
    pub fn solid(bounds: Bounds) -> Self {
        Self {
            collider: Some(bounds),
            renderers: vec![bounds],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.collider.is_none() && self.renderers.is_empty()
    }

    pub fn transformed(&self, position: Vec3, rotation: Quat, scale: f32) -> Self {
        Self {
            collider: self
                .collider
                .map(|b| b.transformed(position, rotation, scale)),
            renderers: self
                .renderers
                .iter()
                .map(|b| b.transformed(position, rotation, scale))
                .collect(),
        }
    }
}

/// Compute the bounds of an object from its world-space geometry.
///
/// # Arguments
/// * `name` - Object name, only used for the diagnostic
/// * `origin` - Object position, used when there is no geometry
/// * `geometry` - World-space collider/renderer boxes
///
/// # Returns
/// Collider box if present, else all renderer boxes merged, else a zero-size
/// box at `origin` (logged as an error, never a panic).
pub fn compute_bounds(name: &str, origin: Vec3, geometry: &Geometry) -> Bounds {
    if let Some(collider) = geometry.collider {
        return collider;
    }

    let mut parts = geometry.renderers.iter();
    if let Some(first) = parts.next() {
        let mut bounds = *first;
        for part in parts {
            bounds.encapsulate(part);
        }
        return bounds;
    }

    log::error!("Couldn't find bounds for {name}");
    Bounds::zero_at(origin)
}

/// Project a vector onto the ground plane.
pub fn height_ignored(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn test_horizontal_sides_ignore_height() {
        let wall = Bounds::from_size(Vec3::ZERO, Vec3::new(0.2, 6.0, 4.0));
        assert!((wall.longer_horizontal_side() - 4.0).abs() < 1e-6);
        assert!((wall.shorter_horizontal_side() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_collider_preferred_over_renderers() {
        let collider = Bounds::from_size(Vec3::ZERO, Vec3::ONE);
        let geometry = Geometry {
            collider: Some(collider),
            renderers: vec![Bounds::from_size(Vec3::ZERO, Vec3::splat(10.0))],
        };
        assert_eq!(compute_bounds("box", Vec3::ZERO, &geometry), collider);
    }

    #[test]
    fn test_renderers_are_merged() {
        let geometry = Geometry {
            collider: None,
            renderers: vec![
                Bounds::from_min_max(Vec3::ZERO, Vec3::ONE),
                Bounds::from_min_max(Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 2.0, 1.0)),
            ],
        };
        let bounds = compute_bounds("pair", Vec3::ZERO, &geometry);
        assert_eq!(bounds.min(), Vec3::ZERO);
        assert_eq!(bounds.max(), Vec3::new(3.0, 2.0, 1.0));
    }

    #[test]
    fn test_no_geometry_gives_zero_bounds_at_origin() {
        let origin = Vec3::new(5.0, 1.0, -2.0);
        let bounds = compute_bounds("empty", origin, &Geometry::default());
        assert!(bounds.is_degenerate());
        assert_eq!(bounds.center, origin);
    }

    #[test]
    fn test_touching_boxes_do_not_intersect() {
        let a = Bounds::from_min_max(Vec3::ZERO, Vec3::splat(4.0));
        let b = a.translated(Vec3::new(4.0, 0.0, 0.0));
        assert!(!a.intersects(&b));
        assert!(a.intersects(&a.translated(Vec3::new(3.9, 0.0, 0.0))));
    }

    #[test]
    fn test_quarter_turn_swaps_horizontal_extents() {
        let local = Bounds::from_size(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.2, 6.0, 4.0));
        let turn = Quat::from_rotation_y(FRAC_PI_2);
        let world = local.transformed(Vec3::new(1.0, 0.0, 0.0), turn, 2.0);
        assert!(approx(world.size(), Vec3::new(8.0, 12.0, 0.4)));
        assert!(approx(world.center, Vec3::new(1.0, 6.0, 0.0)));
    }

    #[test]
    fn test_height_ignored() {
        assert_eq!(height_ignored(Vec3::new(1.0, 7.0, 2.0)), Vec3::new(1.0, 0.0, 2.0));
    }
}
