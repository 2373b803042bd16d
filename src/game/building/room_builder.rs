//! Room Builder - Drag out a rectangle of floors ringed by walls
//!
//! A drag from a start point to an end point is turned into a lattice of
//! cells on the room pitch (see [`GridLattice`]). Every cell gets a base
//! object, and every boundary cell gets one perimeter object per boundary it
//! touches. Placements go through the same validator as single placements;
//! a rejected cell is skipped and the rest of the room is still built.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::game::builder::{PreviewState, place_object};
use crate::game::config::PlacementConfig;
use crate::game::scene::{ObjectLifecycle, SpatialQuery};
use crate::game::types::{ObjectId, Pose, Prefab, yaw_degrees};
use crate::world::{GridLattice, GridSide};

/// Everything one room generation needs.
#[derive(Debug, Clone)]
pub struct GridSpec {
    pub start: Vec3,
    pub end: Vec3,
    /// Cell size in world units (already scaled)
    pub cell_pitch: f32,
    /// Height every object is placed at (already scaled)
    pub build_height: f32,
    pub base: Prefab,
    pub perimeter: Option<Prefab>,
    pub base_rotation: Quat,
    pub scale: f32,
}

impl GridSpec {
    /// Room between two drag points using the active settings.
    ///
    /// The perimeter prefab is dropped when the settings turn room perimeters
    /// off.
    pub fn from_config(
        start: Vec3,
        end: Vec3,
        base: Prefab,
        perimeter: Option<Prefab>,
        config: &PlacementConfig,
    ) -> Self {
        Self {
            start,
            end,
            cell_pitch: config.scaled_cell_pitch(),
            build_height: config.build_height(),
            base,
            perimeter: perimeter.filter(|_| config.add_perimeter_to_rooms),
            base_rotation: Quat::IDENTITY,
            scale: config.active_scale,
        }
    }

    /// Rotation of a perimeter object on `side`. Walls run along their local
    /// Z axis, so the boundaries that run along X turn a quarter.
    pub fn perimeter_rotation(&self, side: GridSide) -> Quat {
        if side.runs_along_x() {
            self.base_rotation * yaw_degrees(90.0)
        } else {
            self.base_rotation
        }
    }
}

/// Named set of created objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectGroup {
    pub name: String,
    pub objects: Vec<ObjectId>,
}

impl ObjectGroup {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            objects: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Result of one room generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomGroup {
    pub name: String,
    pub base_cells: ObjectGroup,
    pub perimeter: ObjectGroup,
    /// Placements the validator refused
    pub skipped: usize,
}

impl Default for RoomGroup {
    fn default() -> Self {
        Self {
            name: "Room".to_string(),
            base_cells: ObjectGroup::new("Floors"),
            perimeter: ObjectGroup::new("Walls"),
            skipped: 0,
        }
    }
}

impl RoomGroup {
    /// All created objects, base cells first.
    pub fn all_objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.base_cells
            .objects
            .iter()
            .chain(self.perimeter.objects.iter())
            .copied()
    }
}

/// Build a room.
///
/// # Arguments
/// * `spec` - Drag points, prefabs and placement settings
/// * `scene` - Host to create the objects in
///
/// # Returns
/// The created objects grouped into base cells and perimeter
pub fn generate_grid<S>(spec: &GridSpec, scene: &mut S) -> RoomGroup
where
    S: SpatialQuery + ObjectLifecycle,
{
    let lattice = GridLattice::from_drag(spec.start, spec.end, spec.cell_pitch, spec.build_height);
    let mut room = RoomGroup::default();

    for (x, z) in lattice.cells() {
        let pose = Pose::new(lattice.cell_position(x, z), spec.base_rotation);
        match place_object(scene, &spec.base, pose, spec.scale) {
            Ok(id) => room.base_cells.objects.push(id),
            Err(err) => {
                log::debug!("Room cell ({x}, {z}) skipped: {err}");
                room.skipped += 1;
            }
        }
    }

    if let Some(perimeter) = &spec.perimeter {
        for slot in lattice.perimeter_slots() {
            let pose = Pose::new(slot.position, spec.perimeter_rotation(slot.side));
            match place_object(scene, perimeter, pose, spec.scale) {
                Ok(id) => room.perimeter.objects.push(id),
                Err(err) => {
                    log::debug!("Perimeter at {:?} {:?} skipped: {err}", slot.cell, slot.side);
                    room.skipped += 1;
                }
            }
        }
    }

    log::info!(
        "Room built: {}x{} cells, {} {}, {} {}, {} skipped",
        lattice.cells_x + 1,
        lattice.cells_z + 1,
        room.base_cells.len(),
        room.base_cells.name,
        room.perimeter.len(),
        room.perimeter.name,
        room.skipped
    );
    room
}

// ============================================================================
// DRAG TRACKING
// ============================================================================

/// State of a room drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// Not dragging
    #[default]
    Idle,
    /// Start recorded, end follows the cursor
    Dragging,
}

/// Tracks the start and end of a room drag between mouse down and mouse up.
#[derive(Debug, Clone, Default)]
pub struct RoomDrag {
    pub state: DragState,
    start: Option<Vec3>,
    end: Option<Vec3>,
}

impl RoomDrag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag. A snapped preview wins over the raw hit, so rooms can
    /// start flush against existing pieces.
    pub fn begin(&mut self, hit: Vec3, preview: Option<&PreviewState>) {
        let start = match preview {
            Some(preview) if preview.is_snapped() => preview.pose().position,
            _ => hit,
        };
        self.state = DragState::Dragging;
        self.start = Some(start);
        self.end = Some(start);
    }

    /// Move the end point (called while the mouse is held).
    pub fn update(&mut self, hit: Vec3) -> bool {
        if self.state == DragState::Idle {
            return false;
        }
        self.end = Some(hit);
        true
    }

    pub fn start(&self) -> Option<Vec3> {
        self.start
    }

    pub fn end(&self) -> Option<Vec3> {
        self.end
    }

    /// Corners of the dragged rectangle on the ground plane, in winding order.
    pub fn outline(&self) -> Option<[Vec3; 4]> {
        let (start, end) = (self.start?, self.end?);
        Some([
            Vec3::new(start.x, 0.0, start.z),
            Vec3::new(end.x, 0.0, start.z),
            Vec3::new(end.x, 0.0, end.z),
            Vec3::new(start.x, 0.0, end.z),
        ])
    }

    /// End the drag at `hit`.
    ///
    /// # Returns
    /// `(start, end)` of the finished drag, or `None` if no drag was active
    pub fn finish(&mut self, hit: Vec3) -> Option<(Vec3, Vec3)> {
        if self.state == DragState::Idle {
            return None;
        }
        let start = self.start?;
        self.reset();
        Some((start, hit))
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    pub fn is_active(&self) -> bool {
        self.state != DragState::Idle
    }

    fn reset(&mut self) {
        self.state = DragState::Idle;
        self.start = None;
        self.end = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::building::prefabs;
    use crate::game::scene::Scene;
    use crate::game::types::ObjectType;

    fn room_spec(start: Vec3, end: Vec3) -> GridSpec {
        GridSpec::from_config(
            start,
            end,
            prefabs::floor(),
            Some(prefabs::wall()),
            &PlacementConfig::default(),
        )
    }

    #[test]
    fn test_two_by_three_room() {
        let mut scene = Scene::new();
        let room = generate_grid(&room_spec(Vec3::ZERO, Vec3::new(8.0, 0.0, 4.0)), &mut scene);
        assert_eq!(room.base_cells.len(), 6);
        assert_eq!(room.perimeter.len(), 10);
        assert_eq!(room.skipped, 0);
        assert_eq!(scene.count_of(ObjectType::Floor), 6);
        assert_eq!(scene.count_of(ObjectType::Wall), 10);
    }

    #[test]
    fn test_perimeter_disabled_by_config() {
        let mut config = PlacementConfig::default();
        config.add_perimeter_to_rooms = false;
        let spec = GridSpec::from_config(
            Vec3::ZERO,
            Vec3::new(4.0, 0.0, 0.0),
            prefabs::floor(),
            Some(prefabs::wall()),
            &config,
        );
        let mut scene = Scene::new();
        let room = generate_grid(&spec, &mut scene);
        assert_eq!(room.base_cells.len(), 2);
        assert!(room.perimeter.is_empty());
    }

    #[test]
    fn test_occupied_cells_are_skipped() {
        let mut scene = Scene::new();
        scene.instantiate(&prefabs::floor(), Pose::default(), 1.0);

        let room = generate_grid(&room_spec(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)), &mut scene);
        assert_eq!(room.base_cells.len(), 1);
        assert_eq!(room.skipped, 1);
        assert_eq!(room.perimeter.len(), 6);
    }

    #[test]
    fn test_negative_drag_builds_backwards() {
        let mut scene = Scene::new();
        let room = generate_grid(&room_spec(Vec3::ZERO, Vec3::new(-4.0, 0.0, 0.0)), &mut scene);
        let xs: Vec<f32> = room
            .base_cells
            .objects
            .iter()
            .filter_map(|id| scene.object(*id))
            .map(|o| o.pose.position.x)
            .collect();
        assert_eq!(xs, vec![0.0, -4.0]);
    }

    #[test]
    fn test_perimeter_rotation_by_side() {
        let spec = room_spec(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(spec.perimeter_rotation(GridSide::XStart), Quat::IDENTITY);
        let turned = spec.perimeter_rotation(GridSide::ZEnd);
        assert!((turned * Vec3::Z - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut drag = RoomDrag::new();
        assert!(!drag.update(Vec3::ONE));
        assert!(drag.finish(Vec3::ONE).is_none());

        drag.begin(Vec3::new(1.0, 0.0, 1.0), None);
        assert!(drag.update(Vec3::new(9.0, 0.0, 5.0)));
        let outline = drag.outline().unwrap();
        assert_eq!(outline[2], Vec3::new(9.0, 0.0, 5.0));

        let (start, end) = drag.finish(Vec3::new(9.0, 0.0, 5.0)).unwrap();
        assert_eq!(start, Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(end, Vec3::new(9.0, 0.0, 5.0));
        assert!(!drag.is_active());
        assert!(drag.outline().is_none());
    }

    #[test]
    fn test_drag_starts_at_snapped_preview() {
        let mut preview = PreviewState::new(prefabs::floor(), Vec3::ZERO, false);
        let edge = prefabs::floor()
            .world_edges(ObjectId(1), &Pose::default(), 1.0)
            .remove(0);
        preview.snap(Pose::at(Vec3::new(4.0, 0.0, 0.0)), edge);

        let mut drag = RoomDrag::new();
        drag.begin(Vec3::new(3.3, 0.0, 0.2), Some(&preview));
        assert_eq!(drag.start(), Some(Vec3::new(4.0, 0.0, 0.0)));

        drag.cancel();
        assert!(!drag.is_active());
    }
}
