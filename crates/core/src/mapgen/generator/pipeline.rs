//! Three-pass construction: carve every room, then every corridor, then
//! populate each room against the finished grid.

use std::collections::BTreeMap;

use slotmap::SlotMap;
use tracing::{debug, info, trace};

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::layout::{Layout, RoomRole};
use crate::types::RoomId;

use super::super::carve::{Partition, carve_corridor, carve_irregular_room, carve_regular_room};
use super::super::grid::Grid;
use super::super::model::GridDefinition;
use super::super::populate::populate_with_summary;
use super::super::room::Room;
use super::super::seed::{CARVING_STREAM, room_rng, stream_rng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct PartitionSize {
    pub(super) width: usize,
    pub(super) height: usize,
}

struct PlacedRoom {
    /// Row-major index of the layout cell, used to key the room's random stream.
    slot: usize,
    room: Room,
}

pub(super) fn generate_grid(
    config: &GeneratorConfig,
    seed: u64,
    layout: &Layout,
    size: PartitionSize,
) -> Result<GridDefinition, GenerationError> {
    let grid_config = &config.grid;
    let mut grid = Grid::new(grid_config.rows, grid_config.columns);
    let mut carving_rng = stream_rng(seed, CARVING_STREAM);

    let mut rooms: SlotMap<RoomId, PlacedRoom> = SlotMap::with_key();
    let mut player_start = None;
    let mut exit = None;

    for (column, row, cell) in layout.cells() {
        let partition = Partition::at_slot(column, row, size.width, size.height);
        let irregular = partition.area() >= grid_config.irregular_room_threshold;
        if irregular {
            carve_irregular_room(
                &mut grid,
                partition,
                grid_config.wall_offset,
                grid_config.flood_decay,
                &mut carving_rng,
            );
        } else {
            carve_regular_room(&mut grid, partition, grid_config.wall_offset);
        }

        match cell.room_type.role {
            RoomRole::Start => player_start = Some(partition.center()),
            RoomRole::Exit => exit = Some(partition.center()),
            RoomRole::Normal => {}
        }

        let room = Room::from_partition(
            &grid,
            partition,
            grid_config.wall_offset,
            cell.room_type.difficulty,
            cell.room_type.reward,
        );
        trace!(column, row, tiles = room.tiles().len(), irregular, "carved room");
        rooms.insert(PlacedRoom { slot: row * layout.width() + column, room });
    }

    for (column, row, cell) in layout.cells() {
        let Some(direction) = cell.parent else {
            continue;
        };
        let partition = Partition::at_slot(column, row, size.width, size.height);
        carve_corridor(
            &mut grid,
            partition.center(),
            direction,
            size.width,
            size.height,
            grid_config.corridor_width,
        );
    }

    let mut dangers = BTreeMap::new();
    let mut rewards = BTreeMap::new();
    for (room_id, placed) in &mut rooms {
        placed.room.detect_entrances(&grid);
        let mut rng = room_rng(seed, placed.slot);
        let (contents, summary) =
            populate_with_summary(&placed.room, &config.population, &mut rng);
        debug!(?room_id, slot = placed.slot, ?summary, "room contents ready");

        let (room_dangers, room_rewards) = contents.into_parts();
        dangers.extend(room_dangers);
        rewards.extend(room_rewards);
    }

    let definition = GridDefinition {
        grid,
        player_start: player_start.ok_or(GenerationError::MissingStart)?,
        exit: exit.ok_or(GenerationError::MissingExit)?,
        dangers,
        rewards,
    };
    info!(
        seed,
        rooms = rooms.len(),
        dangers = definition.dangers.len(),
        rewards = definition.rewards.len(),
        fingerprint = definition.fingerprint(),
        "generated grid"
    );
    Ok(definition)
}
