//! Preview State
//!
//! The single ghost object that follows the cursor before it is committed.
//! Tracks the user's own rotation separately from the displayed pose, so a
//! snap that copies an edge's rotation is undone when the preview is released.

use glam::{Quat, Vec3};

use crate::game::types::{EdgeMarker, Pose, Prefab, yaw_degrees};
use crate::physics::Bounds;

#[derive(Clone, Debug)]
pub struct PreviewState {
    prefab: Prefab,
    /// Displayed pose: the raw cursor when free, the resolved pose when snapped
    pose: Pose,
    /// Rotation the user picked; used whenever the preview is free
    free_rotation: Quat,
    is_snapped: bool,
    snapped_edge: Option<EdgeMarker>,
    ignore_snap: bool,
}

impl PreviewState {
    pub fn new(prefab: Prefab, position: Vec3, ignore_snap: bool) -> Self {
        Self {
            prefab,
            pose: Pose::at(position),
            free_rotation: Quat::IDENTITY,
            is_snapped: false,
            snapped_edge: None,
            ignore_snap,
        }
    }

    pub fn prefab(&self) -> &Prefab {
        &self.prefab
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn free_rotation(&self) -> Quat {
        self.free_rotation
    }

    pub fn is_snapped(&self) -> bool {
        self.is_snapped
    }

    pub fn snapped_edge(&self) -> Option<&EdgeMarker> {
        self.snapped_edge.as_ref()
    }

    pub fn ignores_snap(&self) -> bool {
        self.ignore_snap
    }

    /// World bounds at an arbitrary position with the free rotation.
    pub fn bounds_at(&self, position: Vec3, scale: f32) -> Bounds {
        self.prefab
            .world_bounds(&Pose::new(position, self.free_rotation), scale)
    }

    /// Move a free preview to the cursor. No-op while snapped.
    pub fn follow(&mut self, raw: Vec3) {
        if !self.is_snapped {
            self.pose = Pose::new(raw, self.free_rotation);
        }
    }

    /// Lock onto a resolved pose.
    pub fn snap(&mut self, pose: Pose, edge: EdgeMarker) {
        self.pose = pose;
        self.is_snapped = true;
        self.snapped_edge = Some(edge);
    }

    /// Drop the lock and put the preview exactly at `raw`.
    pub fn release(&mut self, raw: Vec3) {
        self.is_snapped = false;
        self.snapped_edge = None;
        self.pose = Pose::new(raw, self.free_rotation);
    }

    /// Release the snap when the cursor has left the hysteresis radius.
    ///
    /// # Arguments
    /// * `raw` - Cursor position this tick
    /// * `unsnap_distance` - Release radius in world units (already scaled)
    ///
    /// # Returns
    /// true if the preview was released this call
    pub fn update_hysteresis(&mut self, raw: Vec3, unsnap_distance: f32) -> bool {
        if self.is_snapped && raw.distance(self.pose.position) > unsnap_distance {
            self.release(raw);
            return true;
        }
        false
    }

    /// Turn a quarter turn about the vertical axis. A snapped preview is
    /// released at its current position so the next tick re-resolves it.
    pub fn rotate_quarter_turn(&mut self) {
        self.free_rotation = (self.free_rotation * yaw_degrees(90.0)).normalize();
        let position = self.pose.position;
        self.release(position);
    }
}
