//! Per-item equip metadata.
//!
//! Rows of the equipment table name an item, its power, an optional stat
//! gate, and optionally how many hands it needs:
//!
//! ```text
//! # name            power  requirement  hands
//! goofy sword       15     Mus: 5
//! spiked helmet     50     Mus:20
//! big rock          0      none         2
//! ```

use std::collections::HashMap;

use statline_foundation::catalog::rows;
use statline_foundation::{BaseStats, Error, ItemCatalog, ItemId, Result, Stat};

/// A minimum-statistic precondition for equipping an item.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StatRequirement {
    /// The gated statistic.
    pub stat: Stat,
    /// The base value the statistic must reach.
    pub minimum: i64,
}

impl StatRequirement {
    /// Creates a requirement.
    #[must_use]
    pub const fn new(stat: Stat, minimum: i64) -> Self {
        Self { stat, minimum }
    }

    /// Parses `Mus:N`, `Mys: N` or `Mox:N`. Empty text and `none` mean no gate.
    ///
    /// # Errors
    ///
    /// Returns an error message for anything else.
    pub fn parse(text: &str) -> std::result::Result<Option<Self>, String> {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        let (tag, minimum) = text
            .split_once(':')
            .ok_or_else(|| format!("invalid requirement '{text}'"))?;
        let stat = Stat::from_tag(tag.trim())
            .ok_or_else(|| format!("unknown requirement stat '{}'", tag.trim()))?;
        let minimum = minimum
            .trim()
            .parse()
            .map_err(|_| format!("invalid requirement threshold '{}'", minimum.trim()))?;
        Ok(Some(Self { stat, minimum }))
    }

    /// Returns true if `base` meets the gate.
    #[must_use]
    pub const fn is_met_by(&self, base: &BaseStats) -> bool {
        base.get(self.stat) >= self.minimum
    }
}

/// Equip metadata for one item.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EquipmentRecord {
    /// The item this record describes.
    pub item: ItemId,
    /// Power (damage or defence contribution).
    pub power: u32,
    /// Hands required; only meaningful for weapons.
    pub hands: u8,
    /// Optional stat gate.
    pub requirement: Option<StatRequirement>,
}

/// Read-only `item → equip metadata` table.
#[derive(Clone, Debug, Default)]
pub struct EquipmentRegistry {
    records: HashMap<ItemId, EquipmentRecord>,
}

impl EquipmentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from records.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = EquipmentRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.item, record))
                .collect(),
        }
    }

    /// Loads an equipment table, resolving item names through `items`.
    ///
    /// Rows naming an item the catalog does not know are skipped with a
    /// warning. The hands column defaults from the item's slot category.
    ///
    /// # Errors
    ///
    /// Returns a load error for rows with fewer than three fields, a bad
    /// power, a bad requirement, a second row for the same item, or a hands
    /// value outside 0..=2.
    pub fn load(table: &str, text: &str, items: &impl ItemCatalog) -> Result<Self> {
        let mut records = HashMap::new();
        let mut skipped = 0usize;

        for (line, fields) in rows(text) {
            let [name, power, requirement, rest @ ..] = fields.as_slice() else {
                return Err(Error::load(table, line, "expected name, power, requirement"));
            };
            let name = name.trim();

            let power = power
                .trim()
                .parse::<u32>()
                .map_err(|_| Error::load(table, line, format!("invalid power '{}'", power.trim())))?;
            let requirement = StatRequirement::parse(requirement)
                .map_err(|message| Error::load(table, line, message))?;

            let Some(item) = items.item_id(name) else {
                tracing::warn!(table, line, item = name, "equipment row names unknown item");
                skipped += 1;
                continue;
            };

            if records.contains_key(&item) {
                return Err(Error::load(table, line, format!("duplicate row for '{name}'")));
            }

            let hands = match rest.first().map(|field| field.trim()) {
                Some(hands) if !hands.is_empty() => match hands.parse::<u8>() {
                    Ok(hands @ 0..=2) => hands,
                    _ => return Err(Error::load(table, line, format!("invalid hands '{hands}'"))),
                },
                _ => items.slot_category(item).default_hands(),
            };

            records.insert(
                item,
                EquipmentRecord {
                    item,
                    power,
                    hands,
                    requirement,
                },
            );
        }

        tracing::debug!(table, records = records.len(), skipped, "loaded equipment table");
        Ok(Self { records })
    }

    /// Returns the record for an item.
    #[must_use]
    pub fn get(&self, item: ItemId) -> Option<&EquipmentRecord> {
        self.records.get(&item)
    }

    /// Returns true if the item has equip metadata.
    #[must_use]
    pub fn is_catalogued(&self, item: ItemId) -> bool {
        self.records.contains_key(&item)
    }

    /// Power of an item; 0 when absent.
    #[must_use]
    pub fn power(&self, item: ItemId) -> u32 {
        self.get(item).map_or(0, |record| record.power)
    }

    /// Hands an item requires; 0 when absent.
    #[must_use]
    pub fn hands_required(&self, item: ItemId) -> u8 {
        self.get(item).map_or(0, |record| record.hands)
    }

    /// Returns the stat gate of an item, if any.
    #[must_use]
    pub fn requirement(&self, item: ItemId) -> Option<StatRequirement> {
        self.get(item).and_then(|record| record.requirement)
    }

    /// Returns true if a character with `base` stats may equip `item`.
    ///
    /// Uncatalogued items answer false; catalogued items without a gate
    /// answer true.
    #[must_use]
    pub fn can_equip(&self, item: ItemId, base: &BaseStats) -> bool {
        self.get(item).is_some_and(|record| {
            record
                .requirement
                .is_none_or(|requirement| requirement.is_met_by(base))
        })
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
