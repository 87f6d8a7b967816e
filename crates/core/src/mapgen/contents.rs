//! Per-room entity placements.

use std::collections::BTreeMap;

use crate::types::{Coord, DangerKind, RewardKind};

/// Dangers and rewards placed in one room. A position is held by at most one
/// entity across both maps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomContents {
    dangers: BTreeMap<Coord, DangerKind>,
    rewards: BTreeMap<Coord, RewardKind>,
}

impl RoomContents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_occupied(&self, pos: Coord) -> bool {
        self.dangers.contains_key(&pos) || self.rewards.contains_key(&pos)
    }

    /// Returns `false` and leaves the contents untouched when `pos` is taken.
    pub fn add_danger(&mut self, pos: Coord, kind: DangerKind) -> bool {
        if self.is_occupied(pos) {
            return false;
        }
        self.dangers.insert(pos, kind);
        true
    }

    pub fn add_reward(&mut self, pos: Coord, kind: RewardKind) -> bool {
        if self.is_occupied(pos) {
            return false;
        }
        self.rewards.insert(pos, kind);
        true
    }

    pub fn dangers(&self) -> &BTreeMap<Coord, DangerKind> {
        &self.dangers
    }

    pub fn rewards(&self) -> &BTreeMap<Coord, RewardKind> {
        &self.rewards
    }

    pub fn is_empty(&self) -> bool {
        self.dangers.is_empty() && self.rewards.is_empty()
    }

    pub fn count_rewards(&self, kind: RewardKind) -> usize {
        self.rewards.values().filter(|&&reward| reward == kind).count()
    }

    pub(super) fn into_parts(
        self,
    ) -> (BTreeMap<Coord, DangerKind>, BTreeMap<Coord, RewardKind>) {
        (self.dangers, self.rewards)
    }
}
