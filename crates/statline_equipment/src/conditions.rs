//! Goal seeding from outfits.
//!
//! Some adventure locations are only reachable in disguise. When automation
//! targets one of them, every piece of the matching outfit becomes a goal.

use statline_foundation::{ItemId, LocationId, OutfitId};

use crate::outfit::OutfitRegistry;

/// An external list of goal conditions.
pub trait GoalConditions {
    /// Appends "obtain `item`" to the goal list.
    fn add_condition(&mut self, item: ItemId);
}

impl GoalConditions for Vec<ItemId> {
    fn add_condition(&mut self, item: ItemId) {
        self.push(item);
    }
}

/// Locations that require an outfit, and the outfit they require.
pub const LOCATION_OUTFITS: [(LocationId, OutfitId); 8] = [
    (LocationId(41), OutfitId(5)),
    (LocationId(42), OutfitId(4)),
    (LocationId(61), OutfitId(8)),
    (LocationId(63), OutfitId(7)),
    (LocationId(26), OutfitId(2)),
    (LocationId(27), OutfitId(3)),
    (LocationId(66), OutfitId(9)),
    (LocationId(85), OutfitId(23)),
];

/// The outfit required by `location`, if any.
#[must_use]
pub fn outfit_for_location(location: LocationId) -> Option<OutfitId> {
    LOCATION_OUTFITS
        .iter()
        .find(|(candidate, _)| *candidate == location)
        .map(|(_, outfit)| *outfit)
}

/// Adds every piece of the outfit `location` requires to `goals`.
///
/// Returns false for locations that need no outfit.
pub fn seed_conditions_for_location(
    location: LocationId,
    outfits: &OutfitRegistry,
    goals: &mut impl GoalConditions,
) -> bool {
    let Some(outfit) = outfit_for_location(location) else {
        return false;
    };
    seed_conditions_for_outfit(outfit, outfits, goals);
    true
}

/// Adds every piece of `outfit` to `goals`, returning how many were added.
///
/// Custom and uncatalogued outfits add nothing.
pub fn seed_conditions_for_outfit(
    outfit: OutfitId,
    outfits: &OutfitRegistry,
    goals: &mut impl GoalConditions,
) -> usize {
    let Some(record) = outfits.get(outfit) else {
        if !outfit.is_custom() {
            tracing::debug!(%outfit, "no definition for outfit");
        }
        return 0;
    };
    for piece in &record.pieces {
        goals.add_condition(*piece);
    }
    record.pieces.len()
}
