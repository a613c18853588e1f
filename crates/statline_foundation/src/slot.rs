//! Equipment slot model.
//!
//! [`SlotCategory`] is what an item *is* (weapon, hat, accessory, ...);
//! [`EquipSlot`] is where the character *wears* something. Accessories are
//! the only category that maps onto more than one slot.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The equip category of an item.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SlotCategory {
    /// Main-hand weapon.
    Weapon,
    /// Off-hand item.
    Offhand,
    /// Hat.
    Hat,
    /// Shirt.
    Shirt,
    /// Pants.
    Pants,
    /// Accessory; may be worn in any of the three accessory slots.
    Accessory,
    /// Anything else (familiar gear, containers, non-equipment).
    Unrecognized,
}

impl SlotCategory {
    /// Parses a slot name from a catalog row. Unknown names map to
    /// [`SlotCategory::Unrecognized`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "weapon" => SlotCategory::Weapon,
            "offhand" | "off-hand" => SlotCategory::Offhand,
            "hat" => SlotCategory::Hat,
            "shirt" => SlotCategory::Shirt,
            "pants" => SlotCategory::Pants,
            "accessory" => SlotCategory::Accessory,
            _ => SlotCategory::Unrecognized,
        }
    }

    /// The slots an item of this category can occupy.
    #[must_use]
    pub const fn slots(self) -> &'static [EquipSlot] {
        match self {
            SlotCategory::Weapon => &[EquipSlot::Weapon],
            SlotCategory::Offhand => &[EquipSlot::Offhand],
            SlotCategory::Hat => &[EquipSlot::Hat],
            SlotCategory::Shirt => &[EquipSlot::Shirt],
            SlotCategory::Pants => &[EquipSlot::Pants],
            SlotCategory::Accessory => &EquipSlot::ACCESSORIES,
            SlotCategory::Unrecognized => &[],
        }
    }

    /// Default number of hands for an item of this category when the
    /// equipment table does not say otherwise.
    #[must_use]
    pub const fn default_hands(self) -> u8 {
        match self {
            SlotCategory::Weapon => 1,
            _ => 0,
        }
    }
}

/// A slot the character can wear an item in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EquipSlot {
    /// Main hand.
    Weapon,
    /// Off hand.
    Offhand,
    /// Head.
    Hat,
    /// Torso.
    Shirt,
    /// Legs.
    Pants,
    /// First accessory slot.
    Accessory1,
    /// Second accessory slot.
    Accessory2,
    /// Third accessory slot.
    Accessory3,
}

impl EquipSlot {
    /// The three accessory slots.
    pub const ACCESSORIES: [EquipSlot; 3] = [
        EquipSlot::Accessory1,
        EquipSlot::Accessory2,
        EquipSlot::Accessory3,
    ];

    /// Every slot.
    pub const ALL: [EquipSlot; 8] = [
        EquipSlot::Weapon,
        EquipSlot::Offhand,
        EquipSlot::Hat,
        EquipSlot::Shirt,
        EquipSlot::Pants,
        EquipSlot::Accessory1,
        EquipSlot::Accessory2,
        EquipSlot::Accessory3,
    ];

    /// Parses a slot name (`weapon`, `acc1`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let slot = match name.trim().to_ascii_lowercase().as_str() {
            "weapon" => EquipSlot::Weapon,
            "offhand" | "off-hand" => EquipSlot::Offhand,
            "hat" => EquipSlot::Hat,
            "shirt" => EquipSlot::Shirt,
            "pants" => EquipSlot::Pants,
            "acc1" | "accessory1" => EquipSlot::Accessory1,
            "acc2" | "accessory2" => EquipSlot::Accessory2,
            "acc3" | "accessory3" => EquipSlot::Accessory3,
            _ => return None,
        };
        Some(slot)
    }
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EquipSlot::Weapon => "weapon",
            EquipSlot::Offhand => "offhand",
            EquipSlot::Hat => "hat",
            EquipSlot::Shirt => "shirt",
            EquipSlot::Pants => "pants",
            EquipSlot::Accessory1 => "acc1",
            EquipSlot::Accessory2 => "acc2",
            EquipSlot::Accessory3 => "acc3",
        };
        f.write_str(name)
    }
}
