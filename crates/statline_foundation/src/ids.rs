//! Stable identities for items, skills, outfits, and locations.
//!
//! Names are resolved to these identities by the catalogs; everything
//! downstream compares identities, never names.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Item identity as assigned by the game.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemId(pub u32);

impl ItemId {
    /// Returns the raw numeric id.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item #{}", self.0)
    }
}

/// Skill identity as assigned by the game.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkillId(pub u32);

impl SkillId {
    /// Transcendent Olfaction, which carries its own gating rule.
    pub const OLFACTION: SkillId = SkillId(19);

    /// Returns the raw numeric id.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SkillId({})", self.0)
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skill #{}", self.0)
    }
}

/// Outfit identity.
///
/// Catalogued outfits have small positive ids. Ids below 1 denote custom
/// outfits assembled by the player; they are never looked up.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutfitId(pub i32);

impl OutfitId {
    /// Returns true if this id denotes a custom (uncatalogued) outfit.
    #[must_use]
    pub const fn is_custom(self) -> bool {
        self.0 < 1
    }
}

impl fmt::Debug for OutfitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OutfitId({})", self.0)
    }
}

impl fmt::Display for OutfitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "outfit #{}", self.0)
    }
}

/// Adventure location identity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocationId(pub u32);
