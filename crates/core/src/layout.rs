//! Input boundary: the partition layout handed over by the layout-tree stage.

use serde::{Deserialize, Serialize};

use crate::types::Direction;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomRole {
    #[default]
    Normal,
    Start,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub difficulty: f32,
    pub reward: f32,
    #[serde(default)]
    pub role: RoomRole,
}

impl RoomType {
    pub fn new(difficulty: f32, reward: f32) -> Self {
        Self { difficulty, reward, role: RoomRole::Normal }
    }

    pub fn start() -> Self {
        Self { difficulty: 0.0, reward: 0.0, role: RoomRole::Start }
    }

    pub fn exit() -> Self {
        Self { difficulty: 0.0, reward: 0.0, role: RoomRole::Exit }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutCell {
    pub room_type: RoomType,
    #[serde(default)]
    pub parent: Option<Direction>,
}

impl LayoutCell {
    pub fn new(room_type: RoomType, parent: Option<Direction>) -> Self {
        Self { room_type, parent }
    }
}

/// Row-major grid of optional partitions; `None` leaves the partition as solid wall.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    rows: Vec<Vec<Option<LayoutCell>>>,
}

impl Layout {
    pub fn new(rows: Vec<Vec<Option<LayoutCell>>>) -> Self {
        Self { rows }
    }

    /// An empty `width x height` layout.
    pub fn empty(width: usize, height: usize) -> Self {
        Self { rows: vec![vec![None; width]; height] }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Vec<Option<LayoutCell>>] {
        &self.rows
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&LayoutCell> {
        self.rows.get(row).and_then(|cells| cells.get(column)).and_then(Option::as_ref)
    }

    /// Returns `false` and leaves the layout untouched when `(column, row)` lies outside it.
    pub fn set(&mut self, column: usize, row: usize, cell: Option<LayoutCell>) -> bool {
        match self.rows.get_mut(row).and_then(|cells| cells.get_mut(column)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Occupied cells in row-major order, as `(column, row, cell)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &LayoutCell)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(column, cell)| cell.as_ref().map(|cell| (column, row, cell)))
        })
    }
}
