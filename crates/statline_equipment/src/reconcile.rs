//! Outfit availability and worn checks.
//!
//! The reconciler owns the set of outfits the player has every piece of.
//! Each pass builds the next set from scratch and swaps it in whole, so a
//! reader holding a snapshot from [`OutfitReconciler::available`] never sees
//! a half-updated set.

use std::collections::{HashMap, HashSet};

use im::OrdSet;
use statline_foundation::{EquipSlot, ItemCatalog, ItemId, OutfitId, SlotCategory};

use crate::outfit::{OutfitRecord, OutfitRegistry};

/// Read access to what the player owns.
pub trait Inventory {
    /// Returns true if at least one of `item` is owned.
    fn owns(&self, item: ItemId) -> bool;
}

/// Read access to what the player is wearing.
pub trait EquippedView {
    /// Returns the item in `slot`, if any.
    fn equipped(&self, slot: EquipSlot) -> Option<ItemId>;
}

impl Inventory for HashSet<ItemId> {
    fn owns(&self, item: ItemId) -> bool {
        self.contains(&item)
    }
}

impl Inventory for HashMap<ItemId, u32> {
    fn owns(&self, item: ItemId) -> bool {
        self.get(&item).is_some_and(|count| *count > 0)
    }
}

impl EquippedView for HashMap<EquipSlot, ItemId> {
    fn equipped(&self, slot: EquipSlot) -> Option<ItemId> {
        self.get(&slot).copied()
    }
}

/// What one reconciliation pass changed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReconcileReport {
    /// Outfits that became available, in id order.
    pub added: Vec<OutfitId>,
    /// Outfits that stopped being available, in id order.
    pub removed: Vec<OutfitId>,
}

impl ReconcileReport {
    /// Returns true if the pass changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Maintains the authoritative outfit availability set.
#[derive(Clone, Debug, Default)]
pub struct OutfitReconciler {
    available: OrdSet<OutfitId>,
}

impl OutfitReconciler {
    /// Creates a reconciler with nothing available.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes availability for every catalogued outfit.
    ///
    /// Re-running with unchanged ownership reports no changes.
    pub fn reconcile_all(
        &mut self,
        outfits: &OutfitRegistry,
        inventory: &impl Inventory,
    ) -> ReconcileReport {
        let next: OrdSet<OutfitId> = outfits
            .iter()
            .filter(|outfit| has_all_pieces(outfit, inventory))
            .map(|outfit| outfit.id)
            .collect();
        self.swap(next)
    }

    /// Recomputes availability only for outfits that include `item`.
    ///
    /// Use after a single item's owned count changes.
    pub fn reconcile_item(
        &mut self,
        item: ItemId,
        outfits: &OutfitRegistry,
        inventory: &impl Inventory,
    ) -> ReconcileReport {
        let mut next = self.available.clone();
        for outfit in outfits.containing(item) {
            if has_all_pieces(outfit, inventory) {
                next.insert(outfit.id);
            } else {
                next.remove(&outfit.id);
            }
        }
        self.swap(next)
    }

    fn swap(&mut self, next: OrdSet<OutfitId>) -> ReconcileReport {
        let report = ReconcileReport {
            added: next
                .iter()
                .filter(|id| !self.available.contains(*id))
                .copied()
                .collect(),
            removed: self
                .available
                .iter()
                .filter(|id| !next.contains(*id))
                .copied()
                .collect(),
        };
        self.available = next;

        if !report.is_empty() {
            tracing::debug!(
                added = ?report.added,
                removed = ?report.removed,
                available = self.available.len(),
                "outfit availability changed"
            );
        }
        report
    }

    /// A snapshot of the available outfits.
    #[must_use]
    pub fn available(&self) -> OrdSet<OutfitId> {
        self.available.clone()
    }

    /// Returns true if every piece of `id` was owned at the last pass.
    #[must_use]
    pub fn has_outfit(&self, id: OutfitId) -> bool {
        self.available.contains(&id)
    }

    /// Returns true if every piece of outfit `id` is equipped in its slot.
    ///
    /// Uncatalogued and custom outfits are never worn.
    #[must_use]
    pub fn is_worn(
        id: OutfitId,
        outfits: &OutfitRegistry,
        items: &impl ItemCatalog,
        equipped: &impl EquippedView,
    ) -> bool {
        outfits.get(id).is_some_and(|outfit| {
            outfit
                .pieces
                .iter()
                .all(|piece| piece_is_worn(*piece, items.slot_category(*piece), equipped))
        })
    }
}

fn has_all_pieces(outfit: &OutfitRecord, inventory: &impl Inventory) -> bool {
    outfit.pieces.iter().all(|piece| inventory.owns(*piece))
}

fn piece_is_worn(piece: ItemId, category: SlotCategory, equipped: &impl EquippedView) -> bool {
    let in_slot = |slot: EquipSlot| equipped.equipped(slot) == Some(piece);
    match category {
        SlotCategory::Weapon => in_slot(EquipSlot::Weapon),
        SlotCategory::Offhand => in_slot(EquipSlot::Offhand),
        SlotCategory::Hat => in_slot(EquipSlot::Hat),
        SlotCategory::Shirt => in_slot(EquipSlot::Shirt),
        SlotCategory::Pants => in_slot(EquipSlot::Pants),
        SlotCategory::Accessory => EquipSlot::ACCESSORIES.into_iter().any(in_slot),
        // Known gap: pieces outside the standard slots are not checked.
        SlotCategory::Unrecognized => true,
    }
}
