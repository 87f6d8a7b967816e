//! Budgeted placement of traps, patrolling creatures, coins and potions.

use std::collections::{BTreeMap, BTreeSet};

use rand_chacha::rand_core::Rng;

use crate::config::PopulationPolicy;
use crate::types::{Axis, Coord, DangerKind, RewardKind};

use super::super::contents::RoomContents;
use super::super::seed::{index_below, unit_f32};
use super::zones::ZoneMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Budgets {
    pub(crate) traps: usize,
    pub(crate) patrollers: usize,
    pub(crate) coins: usize,
}

impl Budgets {
    pub(crate) fn for_room(
        difficulty: f32,
        reward: f32,
        placeable: usize,
        policy: &PopulationPolicy,
    ) -> Self {
        Self {
            traps: budget(difficulty, placeable, policy.trap_coefficient, policy.min_traps),
            patrollers: budget(
                difficulty,
                placeable,
                policy.patroller_coefficient,
                policy.min_patrollers,
            ),
            coins: budget(reward, placeable, policy.coin_coefficient, policy.min_coins),
        }
    }
}

fn budget(scalar: f32, placeable: usize, coefficient: f32, floor: usize) -> usize {
    if scalar <= 0.0 {
        return 0;
    }
    let scaled = (scalar * placeable as f32 * coefficient).floor() as usize;
    scaled.max(floor)
}

/// Candidate list drawn from uniformly without replacement, skipping tiles
/// that an earlier draw already filled.
struct Pool {
    candidates: Vec<Coord>,
}

impl Pool {
    fn new(candidates: &[Coord]) -> Self {
        Self { candidates: candidates.to_vec() }
    }

    fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R, contents: &RoomContents) -> Option<Coord> {
        while !self.candidates.is_empty() {
            let index = index_below(rng, self.candidates.len());
            let candidate = self.candidates.swap_remove(index);
            if !contents.is_occupied(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

fn draw_from_pools<R: Rng + ?Sized>(
    pools: &mut [Pool],
    rng: &mut R,
    contents: &RoomContents,
) -> Option<Coord> {
    pools.iter_mut().find_map(|pool| pool.draw(rng, contents))
}

/// Traps go to deep tiles first, then ambush spots, then chokepoints, and
/// finally anywhere placeable.
pub(crate) fn place_traps<R: Rng + ?Sized>(
    contents: &mut RoomContents,
    zones: &ZoneMap,
    budget: usize,
    rng: &mut R,
) -> usize {
    let mut pools = [
        Pool::new(&zones.deep),
        Pool::new(&zones.ambush),
        Pool::new(&zones.chokepoint),
        Pool::new(&zones.placeable),
    ];
    let mut placed = 0;
    while placed < budget {
        let Some(pos) = draw_from_pools(&mut pools, rng, contents) else {
            break;
        };
        contents.add_danger(pos, DangerKind::FireTrap);
        placed += 1;
    }
    placed
}

/// Splits the patroller budget across both axes, handing an odd creature to
/// the axis with more lane candidates.
pub(crate) fn place_patrollers<R: Rng + ?Sized>(
    contents: &mut RoomContents,
    zones: &ZoneMap,
    budget: usize,
    rng: &mut R,
) -> usize {
    let mut horizontal = budget / 2;
    if budget % 2 == 1 && zones.horizontal.len() > zones.vertical.len() {
        horizontal += 1;
    }
    let vertical = budget - horizontal;

    place_spread(contents, zones, Axis::Horizontal, horizontal, rng)
        + place_spread(contents, zones, Axis::Vertical, vertical, rng)
}

/// Places `count` patrollers on `axis`. The first pick is random; each later
/// pick maximizes the smallest perpendicular gap to patrollers already on
/// the same axis so lanes are not shared.
fn place_spread<R: Rng + ?Sized>(
    contents: &mut RoomContents,
    zones: &ZoneMap,
    axis: Axis,
    count: usize,
    rng: &mut R,
) -> usize {
    let kind = DangerKind::patrolling(axis);
    let across = axis.perpendicular();
    let mut lanes: Vec<i32> = Vec::with_capacity(count);

    for candidates in [zones.lane(axis), zones.open.as_slice(), zones.placeable.as_slice()] {
        while lanes.len() < count {
            let free: Vec<Coord> =
                candidates.iter().copied().filter(|&pos| !contents.is_occupied(pos)).collect();
            if free.is_empty() {
                break;
            }

            let pick = if lanes.is_empty() {
                free[index_below(rng, free.len())]
            } else {
                let gap = |pos: Coord| {
                    lanes.iter().map(|&lane| pos.along(across).abs_diff(lane)).min().unwrap_or(0)
                };
                let mut best = free[0];
                for &pos in &free[1..] {
                    if gap(pos) > gap(best) {
                        best = pos;
                    }
                }
                best
            };

            contents.add_danger(pick, kind);
            lanes.push(pick.along(across));
        }
    }
    lanes.len()
}

/// Coins come in three tiers: near hazards, deep or cornered tiles, and a
/// scatter over every placeable tile that also absorbs any shortfall from the
/// first two.
pub(crate) fn place_coins<R: Rng + ?Sized>(
    contents: &mut RoomContents,
    zones: &ZoneMap,
    budget: usize,
    policy: &PopulationPolicy,
    rng: &mut R,
) -> usize {
    let near_target = (budget as f32 * policy.coin_near_hazard_fraction).floor() as usize;
    let deep_target = (budget as f32 * policy.coin_deep_fraction).floor() as usize;

    let hazards: Vec<Coord> = contents.dangers().keys().copied().collect();
    let near_hazard: Vec<Coord> = zones
        .placeable
        .iter()
        .copied()
        .filter(|&pos| {
            hazards.iter().any(|&hazard| pos.manhattan(hazard) <= policy.coin_hazard_radius)
        })
        .collect();
    let exploration: Vec<Coord> = zones
        .deep
        .iter()
        .chain(&zones.corner)
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut placed = 0;
    for (candidates, target) in [(&near_hazard, near_target), (&exploration, deep_target)] {
        let mut pool = Pool::new(candidates);
        let mut tier_placed = 0;
        while tier_placed < target {
            let Some(pos) = pool.draw(rng, contents) else {
                break;
            };
            contents.add_reward(pos, RewardKind::Coin);
            tier_placed += 1;
        }
        placed += tier_placed;
    }

    let mut scatter = Pool::new(&zones.placeable);
    while placed < budget {
        let Some(pos) = scatter.draw(rng, contents) else {
            break;
        };
        contents.add_reward(pos, RewardKind::Coin);
        placed += 1;
    }
    placed
}

/// With probability `reward * potion_chance`, puts one potion on the free
/// placeable tile farthest from every entrance.
pub(crate) fn place_potion<R: Rng + ?Sized>(
    contents: &mut RoomContents,
    zones: &ZoneMap,
    distances: &BTreeMap<Coord, u32>,
    reward: f32,
    policy: &PopulationPolicy,
    rng: &mut R,
) -> bool {
    if unit_f32(rng) >= reward * policy.potion_chance {
        return false;
    }
    let mut deepest: Option<(u32, Coord)> = None;
    for &pos in &zones.placeable {
        if contents.is_occupied(pos) {
            continue;
        }
        let distance = distances.get(&pos).copied().unwrap_or(0);
        if deepest.is_none_or(|(best, _)| distance > best) {
            deepest = Some((distance, pos));
        }
    }
    deepest.is_some_and(|(_, pos)| contents.add_reward(pos, RewardKind::Potion))
}
