//! Classification of placeable tiles into overlapping placement zones.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::PopulationPolicy;
use crate::types::{Axis, Coord};

use super::super::room::Room;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ZoneMap {
    /// Reachable tiles off the safe path and away from entrances.
    pub(crate) placeable: Vec<Coord>,
    pub(crate) deep: Vec<Coord>,
    pub(crate) ambush: Vec<Coord>,
    pub(crate) chokepoint: Vec<Coord>,
    pub(crate) corner: Vec<Coord>,
    pub(crate) horizontal: Vec<Coord>,
    pub(crate) vertical: Vec<Coord>,
    pub(crate) open: Vec<Coord>,
}

impl ZoneMap {
    pub(crate) fn lane(&self, axis: Axis) -> &[Coord] {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }
}

pub(crate) fn classify(
    room: &Room,
    distances: &BTreeMap<Coord, u32>,
    safe_path: &BTreeSet<Coord>,
    policy: &PopulationPolicy,
) -> ZoneMap {
    let placeable: BTreeSet<Coord> = distances
        .keys()
        .copied()
        .filter(|tile| !safe_path.contains(tile) && !room.entrances().contains(tile))
        .collect();

    let max_distance = distances.values().copied().max().unwrap_or(0);
    let mut zones = ZoneMap::default();

    for &tile in &placeable {
        if max_distance > 0 {
            let normalized = distances[&tile] as f32 / max_distance as f32;
            if normalized > policy.deep_threshold {
                zones.deep.push(tile);
            }
        }

        let near_traffic = safe_path
            .iter()
            .any(|&safe_tile| tile.manhattan(safe_tile) <= policy.ambush_radius);
        if near_traffic {
            zones.ambush.push(tile);
        }

        let neighbors: Vec<Coord> = room.tile_neighbors(tile).collect();
        match neighbors.as_slice() {
            [a, b] if a.x == b.x || a.y == b.y => zones.chokepoint.push(tile),
            [_, _] => zones.corner.push(tile),
            _ if neighbors.len() >= 3 => zones.open.push(tile),
            _ => {}
        }

        if run_length(&placeable, tile, Axis::Horizontal) >= policy.min_patrol_run {
            zones.horizontal.push(tile);
        }
        if run_length(&placeable, tile, Axis::Vertical) >= policy.min_patrol_run {
            zones.vertical.push(tile);
        }
    }

    zones.placeable = placeable.into_iter().collect();
    zones
}

/// Length of the contiguous run through `tile` along `axis`.
fn run_length(placeable: &BTreeSet<Coord>, tile: Coord, axis: Axis) -> usize {
    let (dx, dy) = axis.unit();
    let mut length = 1;
    for sign in [1, -1] {
        let mut next = tile.offset(dx * sign, dy * sign);
        while placeable.contains(&next) {
            length += 1;
            next = next.offset(dx * sign, dy * sign);
        }
    }
    length
}
