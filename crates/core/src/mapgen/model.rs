//! Public output of a generation run.

use std::collections::BTreeMap;

use xxhash_rust::xxh3::xxh3_64;

use crate::types::{CellKind, Coord, DangerKind, RewardKind};

use super::grid::Grid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridDefinition {
    pub grid: Grid,
    pub player_start: Coord,
    pub exit: Coord,
    pub dangers: BTreeMap<Coord, DangerKind>,
    pub rewards: BTreeMap<Coord, RewardKind>,
}

impl GridDefinition {
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn cell_at(&self, pos: Coord) -> CellKind {
        self.grid.cell_at(pos)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.rows() as u32).to_le_bytes());
        bytes.extend((self.columns() as u32).to_le_bytes());
        for cell in self.grid.cells() {
            bytes.push(match cell {
                CellKind::Wall => 0,
                CellKind::Room => 1,
                CellKind::Corridor => 2,
            });
        }
        for pos in [self.player_start, self.exit] {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
        }

        bytes.extend((self.dangers.len() as u32).to_le_bytes());
        for (pos, kind) in &self.dangers {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
            bytes.push(match kind {
                DangerKind::FireTrap => 0,
                DangerKind::PatrolHorizontal => 1,
                DangerKind::PatrolVertical => 2,
            });
        }

        bytes.extend((self.rewards.len() as u32).to_le_bytes());
        for (pos, kind) in &self.rewards {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
            bytes.push(match kind {
                RewardKind::Coin => 0,
                RewardKind::Potion => 1,
            });
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    /// One character per cell: entities over cells, `@` for the start and `>`
    /// for the exit.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.columns() + 1) * self.rows());
        for y in 0..self.rows() as i32 {
            for x in 0..self.columns() as i32 {
                let pos = Coord { y, x };
                let glyph = if pos == self.player_start {
                    '@'
                } else if pos == self.exit {
                    '>'
                } else if let Some(danger) = self.dangers.get(&pos) {
                    danger.glyph()
                } else if let Some(reward) = self.rewards.get(&pos) {
                    reward.glyph()
                } else {
                    self.cell_at(pos).glyph()
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_rendering_layers_entities_over_cells() {
        let definition = GridDefinition {
            grid: Grid::new(2, 3),
            player_start: Coord::new(0, 0),
            exit: Coord::new(2, 1),
            dangers: BTreeMap::from([(Coord::new(1, 0), DangerKind::FireTrap)]),
            rewards: BTreeMap::from([(Coord::new(0, 1), RewardKind::Coin)]),
        };

        assert_eq!(definition.render_ascii(), "@^#\n$#>\n");
    }

    #[test]
    fn fingerprint_tracks_placements() {
        let mut definition = GridDefinition {
            grid: Grid::new(2, 2),
            player_start: Coord::new(0, 0),
            exit: Coord::new(1, 1),
            dangers: BTreeMap::new(),
            rewards: BTreeMap::new(),
        };
        let before = definition.fingerprint();
        definition.rewards.insert(Coord::new(1, 0), RewardKind::Potion);
        assert_ne!(before, definition.fingerprint());
    }
}
