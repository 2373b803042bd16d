//! Room Grid Lattice
//!
//! Cell math for rectangular room generation: how a start/end drag maps to a
//! lattice of cells on a fixed pitch, and where perimeter objects sit around it.
//!
//! ## Axis convention
//! X/Z span the ground plane. A drag runs from `start` toward `end`; cells are
//! laid out from `start` in the drag's direction on each axis. Both ranges are
//! inclusive, so a drag shorter than half a pitch still yields one cell.

use glam::Vec3;

/// One of the four outer boundaries of a room lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridSide {
    /// Boundary at `x == 0`
    XStart,
    /// Boundary at `x == cells_x`
    XEnd,
    /// Boundary at `z == 0`
    ZStart,
    /// Boundary at `z == cells_z`
    ZEnd,
}

impl GridSide {
    /// Whether the boundary line runs along the X axis (constant Z).
    pub fn runs_along_x(self) -> bool {
        matches!(self, GridSide::ZStart | GridSide::ZEnd)
    }
}

/// A perimeter position produced for one boundary cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerimeterSlot {
    pub cell: (u32, u32),
    pub side: GridSide,
    pub position: Vec3,
}

/// Lattice spanned by a room drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLattice {
    /// World position of cell (0, 0) on the ground plane
    pub origin: Vec3,
    /// Distance between neighbouring cell centers
    pub pitch: f32,
    /// Height every cell is placed at
    pub height: f32,
    /// Highest cell index along X (inclusive)
    pub cells_x: u32,
    /// Highest cell index along Z (inclusive)
    pub cells_z: u32,
    /// Step direction along X (-1 or 1)
    pub sign_x: f32,
    /// Step direction along Z (-1 or 1)
    pub sign_z: f32,
}

impl GridLattice {
    /// Build the lattice for a drag from `start` to `end`.
    ///
    /// The normalized drag direction is rounded per axis to {-1, 0, 1}. An
    /// axis that rounds to 0 while the drag still spans it falls back to the
    /// drag's own sign, so diagonal drags fill their rectangle.
    ///
    /// # Arguments
    /// * `start` - Drag start (cell 0, 0)
    /// * `end` - Drag end
    /// * `pitch` - Cell size in world units (must be positive)
    /// * `height` - Build height for every cell
    pub fn from_drag(start: Vec3, end: Vec3, pitch: f32, height: f32) -> Self {
        let delta = end - start;
        let direction = delta.normalize_or_zero().round();

        let (cells_x, cells_z) = if pitch > 0.0 {
            (
                (delta.x.abs() / pitch).round_ties_even() as u32,
                (delta.z.abs() / pitch).round_ties_even() as u32,
            )
        } else {
            log::warn!("Room grid pitch must be positive, got {pitch}");
            (0, 0)
        };

        Self {
            origin: Vec3::new(start.x, 0.0, start.z),
            pitch,
            height,
            cells_x,
            cells_z,
            sign_x: axis_sign(direction.x, delta.x),
            sign_z: axis_sign(direction.z, delta.z),
        }
    }

    /// Number of cells (both ranges inclusive).
    pub fn cell_count(&self) -> usize {
        (self.cells_x as usize + 1) * (self.cells_z as usize + 1)
    }

    /// World position of a cell.
    pub fn cell_position(&self, x: u32, z: u32) -> Vec3 {
        Vec3::new(
            self.origin.x + self.pitch * x as f32 * self.sign_x,
            self.height,
            self.origin.z + self.pitch * z as f32 * self.sign_z,
        )
    }

    /// Iterate all cells row by row.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..=self.cells_x).flat_map(move |x| (0..=self.cells_z).map(move |z| (x, z)))
    }

    /// Boundaries a cell touches (a corner cell touches two, a single-cell
    /// lattice touches all four).
    pub fn sides_of(&self, x: u32, z: u32) -> Vec<GridSide> {
        let mut sides = Vec::with_capacity(4);
        if x == 0 {
            sides.push(GridSide::XStart);
        }
        if x == self.cells_x {
            sides.push(GridSide::XEnd);
        }
        if z == 0 {
            sides.push(GridSide::ZStart);
        }
        if z == self.cells_z {
            sides.push(GridSide::ZEnd);
        }
        sides
    }

    /// Perimeter positions, half a pitch beyond each touched boundary.
    pub fn perimeter_slots(&self) -> Vec<PerimeterSlot> {
        let half = self.pitch * 0.5;
        let mut slots = Vec::new();

        for (x, z) in self.cells() {
            let cell = self.cell_position(x, z);
            for side in self.sides_of(x, z) {
                let offset = match side {
                    GridSide::XStart => Vec3::new(-half * self.sign_x, 0.0, 0.0),
                    GridSide::XEnd => Vec3::new(half * self.sign_x, 0.0, 0.0),
                    GridSide::ZStart => Vec3::new(0.0, 0.0, -half * self.sign_z),
                    GridSide::ZEnd => Vec3::new(0.0, 0.0, half * self.sign_z),
                };
                slots.push(PerimeterSlot {
                    cell: (x, z),
                    side,
                    position: cell + offset,
                });
            }
        }

        slots
    }
}

fn axis_sign(rounded: f32, delta: f32) -> f32 {
    if rounded != 0.0 {
        rounded.signum()
    } else if delta != 0.0 {
        delta.signum()
    } else {
        1.0
    }
}
