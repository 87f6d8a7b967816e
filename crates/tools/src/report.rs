use dungeon_core::{Coord, DangerKind, GridDefinition, RewardKind};
use serde::Serialize;

/// JSON-friendly view of a generated grid.
#[derive(Debug, Serialize)]
pub struct GridReport {
    pub seed: u64,
    pub rows: usize,
    pub columns: usize,
    pub fingerprint: String,
    pub player_start: Coord,
    pub exit: Coord,
    /// One string per row, using the ASCII glyphs.
    pub map: Vec<String>,
    pub dangers: Vec<Placement<DangerKind>>,
    pub rewards: Vec<Placement<RewardKind>>,
}

#[derive(Debug, Serialize)]
pub struct Placement<K> {
    pub x: i32,
    pub y: i32,
    pub kind: K,
}

impl GridReport {
    pub fn new(seed: u64, generated: &GridDefinition) -> Self {
        Self {
            seed,
            rows: generated.rows(),
            columns: generated.columns(),
            fingerprint: format!("{:016x}", generated.fingerprint()),
            player_start: generated.player_start,
            exit: generated.exit,
            map: generated.render_ascii().lines().map(str::to_owned).collect(),
            dangers: generated
                .dangers
                .iter()
                .map(|(pos, &kind)| Placement { x: pos.x, y: pos.y, kind })
                .collect(),
            rewards: generated
                .rewards
                .iter()
                .map(|(pos, &kind)| Placement { x: pos.x, y: pos.y, kind })
                .collect(),
        }
    }
}
