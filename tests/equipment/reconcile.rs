//! Outfit reconciliation and goal seeding tests

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use statline_equipment::{
    LOCATION_OUTFITS, OutfitReconciler, seed_conditions_for_location, seed_conditions_for_outfit,
};
use statline_foundation::{EquipSlot, ItemCatalog, ItemId, LocationId, OutfitId};

use crate::{items, outfits};

fn owned(names: &[&str]) -> HashSet<ItemId> {
    let items = items();
    names.iter().map(|name| items.item_id(name).unwrap()).collect()
}

// =============================================================================
// Availability
// =============================================================================

#[test]
fn availability_follows_ownership() {
    let outfits = outfits(&items());
    let mut reconciler = OutfitReconciler::new();

    let mut inventory = owned(&["knob goblin harem veil", "knob goblin harem pants", "eyepatch"]);
    let report = reconciler.reconcile_all(&outfits, &inventory);
    assert_eq!(report.added, vec![OutfitId(4)]);
    assert!(report.removed.is_empty());

    inventory.extend(owned(&["swashbuckling pants", "stuffed shoulder parrot"]));
    let report = reconciler.reconcile_all(&outfits, &inventory);
    assert_eq!(report.added, vec![OutfitId(2)]);

    inventory.remove(&items().item_id("knob goblin harem pants").unwrap());
    let report = reconciler.reconcile_all(&outfits, &inventory);
    assert_eq!(report.removed, vec![OutfitId(4)]);
    assert_eq!(reconciler.available().into_iter().collect::<Vec<_>>(), vec![OutfitId(2)]);
}

#[test]
fn item_pass_matches_full_pass() {
    let items = items();
    let outfits = outfits(&items);
    let mut full = OutfitReconciler::new();
    let mut incremental = OutfitReconciler::new();
    let mut inventory: HashMap<ItemId, u32> = HashMap::new();

    for name in ["miner's helmet", "7-Foot Dwarven mattock", "miner's pants", "eyepatch"] {
        let item = items.item_id(name).unwrap();
        inventory.insert(item, 1);
        incremental.reconcile_item(item, &outfits, &inventory);
        full.reconcile_all(&outfits, &inventory);
        assert_eq!(incremental.available(), full.available());
    }
    assert!(full.has_outfit(OutfitId(8)));

    let helmet = items.item_id("miner's helmet").unwrap();
    inventory.insert(helmet, 0);
    let report = incremental.reconcile_item(helmet, &outfits, &inventory);
    assert_eq!(report.removed, vec![OutfitId(8)]);
}

proptest! {
    #[test]
    fn reconcile_all_is_idempotent(owned_ids in prop::collection::hash_set(
        prop::sample::select(vec![222u32, 223, 224, 306, 307, 308, 309, 310, 311, 312, 360, 361, 362, 408, 409, 410]),
        0..16,
    )) {
        let outfits = outfits(&items());
        let inventory: HashSet<ItemId> = owned_ids.into_iter().map(ItemId).collect();
        let mut reconciler = OutfitReconciler::new();

        reconciler.reconcile_all(&outfits, &inventory);
        let first = reconciler.available();
        let second_report = reconciler.reconcile_all(&outfits, &inventory);

        prop_assert!(second_report.is_empty());
        prop_assert_eq!(reconciler.available(), first);
    }
}

// =============================================================================
// Worn checks
// =============================================================================

#[test]
fn worn_requires_every_piece_in_its_slot() {
    let items = items();
    let outfits = outfits(&items);
    let id = |name: &str| items.item_id(name).unwrap();

    let mut equipped: HashMap<EquipSlot, ItemId> = HashMap::new();
    equipped.insert(EquipSlot::Hat, id("eyepatch"));
    equipped.insert(EquipSlot::Pants, id("swashbuckling pants"));
    assert!(!OutfitReconciler::is_worn(OutfitId(2), &outfits, &items, &equipped));

    for slot in EquipSlot::ACCESSORIES {
        let mut with_parrot = equipped.clone();
        with_parrot.insert(slot, id("stuffed shoulder parrot"));
        assert!(OutfitReconciler::is_worn(OutfitId(2), &outfits, &items, &with_parrot));
    }

    // right item, wrong slot
    equipped.insert(EquipSlot::Shirt, id("stuffed shoulder parrot"));
    assert!(!OutfitReconciler::is_worn(OutfitId(2), &outfits, &items, &equipped));
}

#[test]
fn flipping_any_slot_breaks_the_outfit() {
    let items = items();
    let outfits = outfits(&items);
    let id = |name: &str| items.item_id(name).unwrap();

    let mut equipped: HashMap<EquipSlot, ItemId> = HashMap::new();
    equipped.insert(EquipSlot::Hat, id("knob goblin elite helm"));
    equipped.insert(EquipSlot::Weapon, id("knob goblin elite polearm"));
    equipped.insert(EquipSlot::Pants, id("knob goblin elite pants"));
    assert!(OutfitReconciler::is_worn(OutfitId(5), &outfits, &items, &equipped));

    for slot in [EquipSlot::Hat, EquipSlot::Weapon, EquipSlot::Pants] {
        let mut flipped = equipped.clone();
        flipped.insert(slot, id("seal-clubbing club"));
        assert!(!OutfitReconciler::is_worn(OutfitId(5), &outfits, &items, &flipped));
    }
}

#[test]
fn uncatalogued_outfits_are_never_worn() {
    let items = items();
    let outfits = outfits(&items);
    let equipped: HashMap<EquipSlot, ItemId> = HashMap::new();
    assert!(!OutfitReconciler::is_worn(OutfitId(99), &outfits, &items, &equipped));
    assert!(!OutfitReconciler::is_worn(OutfitId(-1), &outfits, &items, &equipped));
}

// =============================================================================
// Goal seeding
// =============================================================================

#[test]
fn mapped_locations_seed_every_piece() {
    let items = items();
    let outfits = outfits(&items);
    let mut goals: Vec<ItemId> = Vec::new();

    assert!(seed_conditions_for_location(LocationId(41), &outfits, &mut goals));
    let names: Vec<_> = goals.iter().map(|item| items.item_name(*item).unwrap()).collect();
    assert_eq!(
        names,
        vec!["knob goblin elite helm", "knob goblin elite polearm", "knob goblin elite pants"]
    );
}

#[test]
fn unmapped_locations_and_custom_outfits_add_nothing() {
    let outfits = outfits(&items());
    let mut goals: Vec<ItemId> = Vec::new();

    assert!(!seed_conditions_for_location(LocationId(9999), &outfits, &mut goals));
    assert_eq!(seed_conditions_for_outfit(OutfitId(0), &outfits, &mut goals), 0);
    assert_eq!(seed_conditions_for_outfit(OutfitId(-7), &outfits, &mut goals), 0);
    assert!(goals.is_empty());
}

#[test]
fn every_mapped_location_has_a_distinct_location_id() {
    let mut seen = HashSet::new();
    for (location, _) in LOCATION_OUTFITS {
        assert!(seen.insert(location));
    }
}
