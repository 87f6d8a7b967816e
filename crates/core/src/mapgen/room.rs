//! Per-room geometry read back from the carved grid.

use std::collections::BTreeSet;

use crate::types::{CellKind, Coord};

use super::carve::Partition;
use super::grid::Grid;

#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    /// Top-left corner with the wall offset already applied.
    pub origin: Coord,
    pub width: usize,
    pub height: usize,
    pub difficulty: f32,
    pub reward: f32,
    tiles: BTreeSet<Coord>,
    entrances: BTreeSet<Coord>,
}

impl Room {
    /// An empty room over the given footprint; tiles are read in separately.
    pub fn new(origin: Coord, width: usize, height: usize, difficulty: f32, reward: f32) -> Self {
        Self {
            origin,
            width,
            height,
            difficulty,
            reward,
            tiles: BTreeSet::new(),
            entrances: BTreeSet::new(),
        }
    }

    pub(super) fn from_partition(
        grid: &Grid,
        partition: Partition,
        wall_offset: usize,
        difficulty: f32,
        reward: f32,
    ) -> Self {
        let (origin, width, height) = partition.inset(wall_offset);
        let mut room = Self::new(origin, width, height, difficulty, reward);
        room.read_tiles(grid);
        room
    }

    /// A fully filled rectangular room, independent of any grid.
    pub fn rectangular(
        origin: Coord,
        width: usize,
        height: usize,
        difficulty: f32,
        reward: f32,
    ) -> Self {
        let mut room = Self::new(origin, width, height, difficulty, reward);
        room.tiles = room.footprint().collect();
        room
    }

    /// Replaces the tile set with every room cell inside the footprint.
    pub fn read_tiles(&mut self, grid: &Grid) {
        self.tiles = self
            .footprint()
            .filter(|&pos| grid.cell_at(pos) == CellKind::Room)
            .collect();
    }

    /// A tile is an entrance when one of its orthogonal neighbours is corridor.
    pub fn detect_entrances(&mut self, grid: &Grid) {
        self.entrances = self
            .tiles
            .iter()
            .copied()
            .filter(|tile| {
                tile.neighbors().iter().any(|&next| grid.cell_at(next) == CellKind::Corridor)
            })
            .collect();
    }

    /// Marks `tile` as an entrance regardless of the grid. Ignored for non-tiles.
    pub fn add_entrance(&mut self, tile: Coord) {
        if self.tiles.contains(&tile) {
            self.entrances.insert(tile);
        }
    }

    pub fn tiles(&self) -> &BTreeSet<Coord> {
        &self.tiles
    }

    pub fn entrances(&self) -> &BTreeSet<Coord> {
        &self.entrances
    }

    pub fn contains(&self, pos: Coord) -> bool {
        self.tiles.contains(&pos)
    }

    /// Tiles of `pos`'s orthogonal neighbours that belong to this room.
    pub fn tile_neighbors(&self, pos: Coord) -> impl Iterator<Item = Coord> + '_ {
        pos.neighbors().into_iter().filter(|next| self.tiles.contains(next))
    }

    fn footprint(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height as i32)
            .flat_map(move |dy| (0..self.width as i32).map(move |dx| self.origin.offset(dx, dy)))
    }
}
