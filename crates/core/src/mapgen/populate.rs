//! Room population: hazards and rewards placed from distance fields, safe
//! paths and zone classification, with an optional influence pass that adds
//! risk-weighted bonus coins.

mod distance;
mod influence;
mod placement;
mod zones;

use rand_chacha::rand_core::Rng;
use tracing::debug;

use crate::config::PopulationPolicy;

use super::contents::RoomContents;
use super::room::Room;

pub use distance::{distance_field, safe_path_network};
pub use influence::DiffusionReport;

/// Counts gathered while populating one room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PopulationSummary {
    pub placeable: usize,
    pub traps: usize,
    pub patrollers: usize,
    pub coins: usize,
    pub potion: bool,
    pub bonus_coins: usize,
    pub diffusion: Option<DiffusionReport>,
}

/// Places dangers and rewards inside `room`. Rooms without entrances or tiles
/// come back empty.
pub fn populate<R: Rng + ?Sized>(
    room: &Room,
    policy: &PopulationPolicy,
    rng: &mut R,
) -> RoomContents {
    populate_with_summary(room, policy, rng).0
}

pub fn populate_with_summary<R: Rng + ?Sized>(
    room: &Room,
    policy: &PopulationPolicy,
    rng: &mut R,
) -> (RoomContents, PopulationSummary) {
    let mut contents = RoomContents::new();
    let mut summary = PopulationSummary::default();
    if room.entrances().is_empty() || room.tiles().is_empty() {
        debug!(origin = ?room.origin, "room has no tiles or entrances; leaving it empty");
        return (contents, summary);
    }

    let distances = distance::distance_field(room);
    let safe_path = distance::safe_path_network(room);
    let zones = zones::classify(room, &distances, &safe_path, policy);
    let budgets =
        placement::Budgets::for_room(room.difficulty, room.reward, zones.placeable.len(), policy);
    summary.placeable = zones.placeable.len();

    summary.traps = placement::place_traps(&mut contents, &zones, budgets.traps, rng);
    summary.patrollers =
        placement::place_patrollers(&mut contents, &zones, budgets.patrollers, rng);
    summary.coins = placement::place_coins(&mut contents, &zones, budgets.coins, policy, rng);
    summary.potion =
        placement::place_potion(&mut contents, &zones, &distances, room.reward, policy, rng);

    if policy.influence.enabled {
        let mut field = influence::build_influence(room, &contents, &policy.influence);
        summary.diffusion = Some(influence::diffuse(&mut field, room, &policy.influence));
        summary.bonus_coins = influence::place_bonus_coins(
            &mut contents,
            &field,
            |pos| distances.contains_key(&pos),
            room.reward,
            &policy.influence,
        );
    }

    debug!(
        origin = ?room.origin,
        tiles = room.tiles().len(),
        entrances = room.entrances().len(),
        placeable = summary.placeable,
        traps = summary.traps,
        patrollers = summary.patrollers,
        coins = summary.coins,
        bonus_coins = summary.bonus_coins,
        "populated room"
    );
    (contents, summary)
}
