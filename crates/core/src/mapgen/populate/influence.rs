//! Danger influence field used to push bonus coins into risky tiles.

use std::collections::{BTreeMap, VecDeque};

use crate::config::InfluencePolicy;
use crate::types::{Axis, Coord, RewardKind};

use super::super::contents::RoomContents;
use super::super::room::Room;

pub(crate) type InfluenceMap = BTreeMap<Coord, f32>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffusionReport {
    pub iterations: usize,
    /// Tiles updated by the final pass; zero means the field settled.
    pub last_changed: usize,
}

impl DiffusionReport {
    pub fn converged(self) -> bool {
        self.last_changed == 0
    }
}

pub(crate) fn build_influence(
    room: &Room,
    contents: &RoomContents,
    policy: &InfluencePolicy,
) -> InfluenceMap {
    let base = room.difficulty * policy.base_factor;
    let mut influence: InfluenceMap = room.tiles().iter().map(|&tile| (tile, base)).collect();

    for (&pos, &kind) in contents.dangers() {
        match kind.patrol_axis() {
            Some(axis) => add_patrol_influence(&mut influence, room, pos, axis, policy),
            None => add_trap_influence(&mut influence, room, pos, policy),
        }
    }
    influence
}

fn raise(influence: &mut InfluenceMap, pos: Coord, value: f32) {
    if let Some(current) = influence.get_mut(&pos) {
        *current = current.max(value);
    }
}

/// Radial falloff: `strength * hop_decay^hops` out to `trap_radius` hops.
fn add_trap_influence(
    influence: &mut InfluenceMap,
    room: &Room,
    trap: Coord,
    policy: &InfluencePolicy,
) {
    raise(influence, trap, policy.trap_strength);
    let mut hops = BTreeMap::from([(trap, 0_u32)]);
    let mut open = VecDeque::from([trap]);

    while let Some(pos) = open.pop_front() {
        let distance = hops[&pos];
        if distance >= policy.trap_radius {
            continue;
        }
        for next in room.tile_neighbors(pos) {
            if hops.contains_key(&next) {
                continue;
            }
            hops.insert(next, distance + 1);
            open.push_back(next);
            let falloff = policy.trap_strength * policy.hop_decay.powi((distance + 1) as i32);
            raise(influence, next, falloff);
        }
    }
}

/// Full strength along the uninterrupted patrol line, spilling one tile to
/// either side at a reduced strength.
fn add_patrol_influence(
    influence: &mut InfluenceMap,
    room: &Room,
    start: Coord,
    axis: Axis,
    policy: &InfluencePolicy,
) {
    let (dx, dy) = axis.unit();
    let (sx, sy) = axis.perpendicular().unit();
    let spill = policy.patroller_strength * policy.perpendicular_spill;

    for tile in patrol_line(room, start, dx, dy) {
        raise(influence, tile, policy.patroller_strength);
        for side in [tile.offset(sx, sy), tile.offset(-sx, -sy)] {
            if room.contains(side) {
                raise(influence, side, spill);
            }
        }
    }
}

fn patrol_line(room: &Room, start: Coord, dx: i32, dy: i32) -> Vec<Coord> {
    let mut line = vec![start];
    for sign in [1, -1] {
        let mut next = start.offset(dx * sign, dy * sign);
        while room.contains(next) {
            line.push(next);
            next = next.offset(dx * sign, dy * sign);
        }
    }
    line
}

/// Bounded relaxation: each tile moves toward `self_weight * self +
/// (1 - self_weight) * hop_decay * neighbour_mean`. Updates smaller than
/// `epsilon` are dropped, and the loop stops early once a pass changes nothing.
pub(crate) fn diffuse(
    influence: &mut InfluenceMap,
    room: &Room,
    policy: &InfluencePolicy,
) -> DiffusionReport {
    let mut report = DiffusionReport::default();
    let neighbor_weight = (1.0 - policy.self_weight) * policy.hop_decay;

    for _ in 0..policy.max_iterations {
        let mut next = influence.clone();
        let mut changed = 0;

        for (&tile, &current) in influence.iter() {
            let (total, count) = room
                .tile_neighbors(tile)
                .filter_map(|neighbor| influence.get(&neighbor))
                .fold((0.0_f32, 0_u32), |(total, count), value| (total + value, count + 1));
            if count == 0 {
                continue;
            }
            let blended = current * policy.self_weight + (total / count as f32) * neighbor_weight;
            if (blended - current).abs() > policy.epsilon {
                next.insert(tile, blended);
                changed += 1;
            }
        }

        *influence = next;
        report.iterations += 1;
        report.last_changed = changed;
        if changed == 0 {
            break;
        }
    }
    report
}

/// Drops up to `reward * bonus_coin_factor` coins on the most influenced free
/// tiles, stopping at the first tile at or below `bonus_threshold`.
pub(crate) fn place_bonus_coins(
    contents: &mut RoomContents,
    influence: &InfluenceMap,
    reachable: impl Fn(Coord) -> bool,
    reward: f32,
    policy: &InfluencePolicy,
) -> usize {
    let budget = (reward * policy.bonus_coin_factor).floor() as usize;
    let mut ranked: Vec<(Coord, f32)> =
        influence.iter().map(|(&pos, &value)| (pos, value)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut placed = 0;
    for (pos, value) in ranked {
        if placed >= budget || value <= policy.bonus_threshold {
            break;
        }
        if reachable(pos) && contents.add_reward(pos, RewardKind::Coin) {
            placed += 1;
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DangerKind;

    fn room_with(width: usize, height: usize, difficulty: f32) -> Room {
        Room::rectangular(Coord::new(0, 0), width, height, difficulty, 1.0)
    }

    #[test]
    fn trap_influence_decays_per_hop_and_stops_at_the_radius() {
        let room = room_with(9, 1, 0.0);
        let mut contents = RoomContents::new();
        contents.add_danger(Coord::new(0, 0), DangerKind::FireTrap);
        let policy = InfluencePolicy::default();

        let influence = build_influence(&room, &contents, &policy);

        assert!((influence[&Coord::new(0, 0)] - 0.8).abs() < 1e-6);
        assert!((influence[&Coord::new(1, 0)] - 0.48).abs() < 1e-6);
        assert!((influence[&Coord::new(3, 0)] - 0.8 * 0.6_f32.powi(3)).abs() < 1e-6);
        assert_eq!(influence[&Coord::new(4, 0)], 0.0);
    }

    #[test]
    fn patrollers_cover_their_whole_line_and_spill_sideways() {
        let room = room_with(7, 3, 0.0);
        let mut contents = RoomContents::new();
        contents.add_danger(Coord::new(3, 1), DangerKind::PatrolHorizontal);

        let influence = build_influence(&room, &contents, &InfluencePolicy::default());

        for x in 0..7 {
            assert_eq!(influence[&Coord::new(x, 1)], 1.0);
            assert!((influence[&Coord::new(x, 0)] - 0.7).abs() < 1e-6);
            assert!((influence[&Coord::new(x, 2)] - 0.7).abs() < 1e-6);
        }
    }

    #[test]
    fn base_influence_follows_difficulty() {
        let room = room_with(2, 2, 0.5);
        let influence = build_influence(&room, &RoomContents::new(), &InfluencePolicy::default());
        assert!(influence.values().all(|&value| (value - 0.05).abs() < 1e-6));
    }

    #[test]
    fn diffusion_is_a_no_op_on_a_single_tile() {
        let room = room_with(1, 1, 1.0);
        let mut contents = RoomContents::new();
        contents.add_danger(Coord::new(0, 0), DangerKind::FireTrap);
        let policy = InfluencePolicy::default();
        let mut influence = build_influence(&room, &contents, &policy);
        let before = influence.clone();

        let report = diffuse(&mut influence, &room, &policy);

        assert_eq!(report, DiffusionReport { iterations: 1, last_changed: 0 });
        assert_eq!(influence, before);
    }

    #[test]
    fn diffusion_respects_the_iteration_cap() {
        let room = room_with(30, 30, 1.0);
        let mut contents = RoomContents::new();
        contents.add_danger(Coord::new(15, 15), DangerKind::PatrolVertical);
        let policy =
            InfluencePolicy { max_iterations: 3, epsilon: 0.0, ..InfluencePolicy::default() };
        let mut influence = build_influence(&room, &contents, &policy);

        let report = diffuse(&mut influence, &room, &policy);

        assert_eq!(report.iterations, 3);
        assert!(!report.converged());
    }

    #[test]
    fn diffusion_settles_well_before_the_default_cap() {
        let room = room_with(12, 8, 0.8);
        let mut contents = RoomContents::new();
        contents.add_danger(Coord::new(3, 3), DangerKind::FireTrap);
        contents.add_danger(Coord::new(8, 5), DangerKind::PatrolHorizontal);
        let policy = InfluencePolicy::default();
        let mut influence = build_influence(&room, &contents, &policy);

        let report = diffuse(&mut influence, &room, &policy);

        assert!(report.converged());
        assert!(report.iterations <= policy.max_iterations);
    }

    #[test]
    fn bonus_coins_take_the_hottest_free_tiles_above_threshold() {
        let room = room_with(5, 1, 0.0);
        let mut influence: InfluenceMap = room.tiles().iter().map(|&tile| (tile, 0.1)).collect();
        influence.insert(Coord::new(0, 0), 0.9);
        influence.insert(Coord::new(1, 0), 0.8);
        influence.insert(Coord::new(2, 0), 0.7);
        let mut contents = RoomContents::new();
        contents.add_danger(Coord::new(0, 0), DangerKind::FireTrap);

        let placed = place_bonus_coins(
            &mut contents,
            &influence,
            |_| true,
            1.0,
            &InfluencePolicy::default(),
        );

        assert_eq!(placed, 2);
        assert!(contents.rewards().contains_key(&Coord::new(1, 0)));
        assert!(contents.rewards().contains_key(&Coord::new(2, 0)));
        assert!(!contents.rewards().contains_key(&Coord::new(3, 0)));
    }
}
