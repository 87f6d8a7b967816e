//! Room and corridor carving for partition layouts.

use rand_chacha::rand_core::Rng;
use tracing::trace;

use crate::types::{CellKind, Coord, Direction};

use super::grid::Grid;
use super::seed::unit_f32;

/// Grid-space rectangle of one layout slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Partition {
    pub(super) origin: Coord,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl Partition {
    pub(super) fn at_slot(column: usize, row: usize, width: usize, height: usize) -> Self {
        let origin = Coord { y: (row * height) as i32, x: (column * width) as i32 };
        Self { origin, width, height }
    }

    pub(super) fn center(self) -> Coord {
        self.origin.offset((self.width / 2) as i32, (self.height / 2) as i32)
    }

    pub(super) fn area(self) -> usize {
        self.width * self.height
    }

    /// Room rectangle after the wall offset, as `(top_left, width, height)`.
    pub(super) fn inset(self, wall_offset: usize) -> (Coord, usize, usize) {
        let offset = wall_offset as i32;
        (
            self.origin.offset(offset, offset),
            self.width.saturating_sub(2 * wall_offset),
            self.height.saturating_sub(2 * wall_offset),
        )
    }
}

pub(super) fn carve_regular_room(grid: &mut Grid, partition: Partition, wall_offset: usize) {
    let (top_left, width, height) = partition.inset(wall_offset);
    for dy in 0..height as i32 {
        for dx in 0..width as i32 {
            grid.set(top_left.offset(dx, dy), CellKind::Room);
        }
    }
}

/// Randomized flood from the inset centre. Each accepted cell pushes its four
/// neighbours with the acceptance probability scaled by `decay`; a failed draw
/// ends that branch.
pub(super) fn carve_irregular_room<R: Rng + ?Sized>(
    grid: &mut Grid,
    partition: Partition,
    wall_offset: usize,
    decay: f32,
    rng: &mut R,
) {
    let (top_left, width, height) = partition.inset(wall_offset);
    let inside = |pos: Coord| {
        pos.x >= top_left.x
            && pos.y >= top_left.y
            && pos.x < top_left.x + width as i32
            && pos.y < top_left.y + height as i32
    };

    let center = top_left.offset((width / 2) as i32, (height / 2) as i32);
    let mut pending = vec![(center, 1.0_f32)];
    let mut accepted = 0_usize;
    while let Some((pos, probability)) = pending.pop() {
        if !inside(pos) || grid.cell_at(pos) == CellKind::Room {
            continue;
        }
        if unit_f32(rng) >= probability {
            continue;
        }
        grid.set(pos, CellKind::Room);
        accepted += 1;
        // Reverse push order so the stack visits right, left, down, up.
        for next in [pos.offset(0, -1), pos.offset(0, 1), pos.offset(-1, 0), pos.offset(1, 0)] {
            pending.push((next, probability * decay));
        }
    }
    trace!(origin = ?partition.origin, accepted, "flooded irregular room");
}

/// Carves a corridor from `from` toward the partition one step away in
/// `direction`, stopping before the parent's centre. Only wall cells are
/// converted, so rooms are never downgraded.
pub(super) fn carve_corridor(
    grid: &mut Grid,
    from: Coord,
    direction: Direction,
    partition_width: usize,
    partition_height: usize,
    corridor_width: usize,
) {
    let (dx, dy) = direction.delta();
    let target = from.offset(dx * partition_width as i32, dy * partition_height as i32);
    let low = -(((corridor_width - 1) / 2) as i32);
    let high = (corridor_width / 2) as i32;

    let mut current = from;
    while current != target {
        let step_x = (target.x - current.x).signum();
        let step_y = (target.y - current.y).signum();
        for offset in low..=high {
            if step_x != 0 {
                carve_corridor_cell(grid, current.offset(0, offset));
            }
            if step_y != 0 {
                carve_corridor_cell(grid, current.offset(offset, 0));
            }
        }
        current = current.offset(step_x, step_y);
    }
}

fn carve_corridor_cell(grid: &mut Grid, pos: Coord) {
    if grid.cell_at(pos) == CellKind::Wall {
        grid.set(pos, CellKind::Corridor);
    }
}
