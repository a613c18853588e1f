//! Character state.
//!
//! [`CharacterState`] is the single place a committed status lands. It also
//! owns the inventory and equipped items the outfit reconciler reads, and the
//! goal list outfits are seeded into.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use statline_equipment::{EquippedView, GoalConditions, Inventory};
use statline_foundation::{EquipSlot, ItemId, Stat};
use statline_parser::{CharacterStatusSnapshot, ResultProcessor, StatValue, StatusJson, StatusStore};

/// One character's tracked state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterState {
    status: CharacterStatusSnapshot,
    inventory: BTreeMap<ItemId, u32>,
    equipped: BTreeMap<EquipSlot, ItemId>,
    goals: Vec<ItemId>,
    commits: u64,
}

impl CharacterState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last committed status.
    #[must_use]
    pub fn status(&self) -> &CharacterStatusSnapshot {
        &self.status
    }

    /// Number of full status commits so far.
    #[must_use]
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Owned count of `item`.
    #[must_use]
    pub fn item_count(&self, item: ItemId) -> u32 {
        self.inventory.get(&item).copied().unwrap_or(0)
    }

    /// Sets the owned count of `item`, returning the previous count.
    pub fn set_item_count(&mut self, item: ItemId, count: u32) -> u32 {
        let previous = if count == 0 {
            self.inventory.remove(&item)
        } else {
            self.inventory.insert(item, count)
        };
        previous.unwrap_or(0)
    }

    /// Adds `delta` (possibly negative) to the owned count of `item`.
    ///
    /// Counts never go below zero.
    pub fn adjust_item_count(&mut self, item: ItemId, delta: i64) -> u32 {
        let current = i64::from(self.item_count(item));
        let next = u32::try_from(current.saturating_add(delta).max(0)).unwrap_or(u32::MAX);
        self.set_item_count(item, next);
        next
    }

    /// Owned items and their counts, in id order.
    pub fn inventory(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.inventory.iter().map(|(item, count)| (*item, *count))
    }

    /// Puts `item` in `slot`, returning whatever was there.
    pub fn equip(&mut self, slot: EquipSlot, item: ItemId) -> Option<ItemId> {
        self.equipped.insert(slot, item)
    }

    /// Empties `slot`.
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<ItemId> {
        self.equipped.remove(&slot)
    }

    /// Pending "obtain this item" goals, oldest first.
    #[must_use]
    pub fn goals(&self) -> &[ItemId] {
        &self.goals
    }

    /// Drops every pending goal.
    pub fn clear_goals(&mut self) {
        self.goals.clear();
    }
}

impl StatusStore for CharacterState {
    fn adventures(&self) -> i64 {
        self.status.adventures
    }

    fn commit(&mut self, snapshot: CharacterStatusSnapshot) {
        self.status = snapshot;
        self.commits += 1;
    }

    fn commit_stat_values(&mut self, stats: &StatusJson) {
        for stat in Stat::ALL {
            let (value, base) = stats.stat(stat);
            let target = match stat {
                Stat::Muscle => &mut self.status.muscle,
                Stat::Mysticality => &mut self.status.mysticality,
                Stat::Moxie => &mut self.status.moxie,
            };
            *target = StatValue::new(value, base, target.subpoints);
        }
    }
}

impl Inventory for CharacterState {
    fn owns(&self, item: ItemId) -> bool {
        self.item_count(item) > 0
    }
}

impl EquippedView for CharacterState {
    fn equipped(&self, slot: EquipSlot) -> Option<ItemId> {
        self.equipped.get(&slot).copied()
    }
}

impl GoalConditions for CharacterState {
    fn add_condition(&mut self, item: ItemId) {
        self.goals.push(item);
    }
}

/// Running record of adventure gains and losses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventureLog {
    gained: i64,
    spent: i64,
    last_delta: Option<i64>,
}

impl AdventureLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total adventures gained across commits.
    #[must_use]
    pub fn gained(&self) -> i64 {
        self.gained
    }

    /// Total adventures spent across commits.
    #[must_use]
    pub fn spent(&self) -> i64 {
        self.spent
    }

    /// The delta reported by the most recent commit.
    #[must_use]
    pub fn last_delta(&self) -> Option<i64> {
        self.last_delta
    }
}

impl ResultProcessor for AdventureLog {
    fn adventures_changed(&mut self, delta: i64) {
        if delta > 0 {
            self.gained = self.gained.saturating_add(delta);
        } else {
            self.spent = self.spent.saturating_sub(delta);
        }
        self.last_delta = Some(delta);
        tracing::debug!(delta, gained = self.gained, spent = self.spent, "adventures changed");
    }
}
