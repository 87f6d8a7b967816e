//! Cell array carved in place by the room and corridor passes.

use serde::{Deserialize, Serialize};

use crate::types::{CellKind, Coord};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// A fresh all-wall grid.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns, cells: vec![CellKind::Wall; rows * columns] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    pub fn in_bounds(&self, pos: Coord) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.columns && (pos.y as usize) < self.rows
    }

    /// Cell kind at `pos`; anything outside the grid reads as wall.
    pub fn cell_at(&self, pos: Coord) -> CellKind {
        if !self.in_bounds(pos) {
            return CellKind::Wall;
        }
        self.cells[self.index(pos)]
    }

    pub(super) fn set(&mut self, pos: Coord, kind: CellKind) {
        if self.in_bounds(pos) {
            let index = self.index(pos);
            self.cells[index] = kind;
        }
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }

    pub fn positions(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |y| {
            (0..self.columns).map(move |x| Coord { y: y as i32, x: x as i32 })
        })
    }

    fn index(&self, pos: Coord) -> usize {
        (pos.y as usize) * self.columns + (pos.x as usize)
    }
}
