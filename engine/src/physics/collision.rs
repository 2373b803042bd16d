//! Collision Queries
//!
//! Ray and box tests used for edge discovery and the occupied-volume check.
//!
//! The slab method is used for ray-box intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Example
//!
//! ```ignore
//! use blueprint_engine::physics::{Bounds, ray_bounds_intersect};
//! use glam::Vec3;
//!
//! let bounds = Bounds::new(Vec3::ZERO, Vec3::ONE);
//! if let Some(t) = ray_bounds_intersect(Vec3::new(0.0, -5.0, 0.0), Vec3::Y, &bounds) {
//!     println!("Hit at distance {}", t);
//! }
//! ```

use glam::{Quat, Vec3};

use super::bounds::Bounds;

/// Oriented query box handed to the host's overlap query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapBox {
    pub center: Vec3,
    /// Half-size in the box's own frame
    pub extents: Vec3,
    pub rotation: Quat,
}

impl OverlapBox {
    pub fn new(center: Vec3, extents: Vec3, rotation: Quat) -> Self {
        Self {
            center,
            extents: extents.abs(),
            rotation,
        }
    }

    /// Axis-aligned query box
    pub fn axis_aligned(bounds: &Bounds) -> Self {
        Self::new(bounds.center, bounds.extents, Quat::IDENTITY)
    }

    /// World-space box enclosing the oriented box.
    pub fn enclosing_bounds(&self) -> Bounds {
        Bounds::new(Vec3::ZERO, self.extents).transformed(self.center, self.rotation, 1.0)
    }

    pub fn overlaps(&self, bounds: &Bounds) -> bool {
        self.enclosing_bounds().intersects(bounds)
    }
}

/// Volume tested by the same-type occupancy check.
///
/// Half the object's extents, so neighbours that share a face or overlap by
/// a wall's thickness at a corner are not reported as occupying it.
pub fn occupancy_volume(bounds: &Bounds) -> OverlapBox {
    OverlapBox::axis_aligned(&bounds.scaled_extents(0.5))
}

/// Performs ray-box intersection test using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `bounds` - Box to test against
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_bounds_intersect(ray_origin: Vec3, ray_dir: Vec3, bounds: &Bounds) -> Option<f32> {
    let (aabb_min, aabb_max) = (bounds.min(), bounds.max());

    // Near-zero directions get large inverse values
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb_min.x - ray_origin.x) * inv_dir.x;
    let t2 = (aabb_max.x - ray_origin.x) * inv_dir.x;

    let mut t_min = t1.min(t2);
    let mut t_max = t1.max(t2);

    let t3 = (aabb_min.y - ray_origin.y) * inv_dir.y;
    let t4 = (aabb_max.y - ray_origin.y) * inv_dir.y;

    t_min = t_min.max(t3.min(t4));
    t_max = t_max.min(t3.max(t4));

    let t5 = (aabb_min.z - ray_origin.z) * inv_dir.z;
    let t6 = (aabb_max.z - ray_origin.z) * inv_dir.z;

    t_min = t_min.max(t5.min(t6));
    t_max = t_max.min(t5.max(t6));

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the box
            Some(0.0)
        }
    } else {
        None
    }
}
