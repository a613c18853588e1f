//! Name → identity registries for items and skills.
//!
//! The game identifies items and skills by number, while pages and static
//! tables mostly refer to them by name. The traits here are the lookup
//! capability the rest of the system depends on; [`ItemIndex`] and
//! [`SkillIndex`] are in-memory implementations loaded from tab-separated
//! tables.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::ids::{ItemId, SkillId};
use crate::slot::SlotCategory;

/// Item identity registry.
pub trait ItemCatalog {
    /// Resolves an item name to its identity.
    fn item_id(&self, name: &str) -> Option<ItemId>;

    /// Returns the display name of an item.
    fn item_name(&self, item: ItemId) -> Option<&str>;

    /// Returns the equip category of an item.
    fn slot_category(&self, item: ItemId) -> SlotCategory;
}

/// Skill identity registry.
pub trait SkillCatalog {
    /// Resolves a skill name to its identity.
    fn skill_id(&self, name: &str) -> Option<SkillId>;

    /// Returns the display name of a skill.
    fn skill_name(&self, skill: SkillId) -> Option<&str>;

    /// Returns true if the skill is granted by a bookshelf tome or libram.
    fn is_bookshelf(&self, skill: SkillId) -> bool;
}

/// Iterates the data rows of a tab-separated table.
///
/// Blank lines and lines starting with `#` are skipped. Yields the 1-indexed
/// line number and the tab-separated fields of each remaining line.
pub fn rows(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines().enumerate().filter_map(|(index, line)| {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            return None;
        }
        Some((index + 1, line.split('\t').collect()))
    })
}

fn parse_id(table: &str, line: usize, field: &str) -> Result<u32> {
    field
        .trim()
        .parse()
        .map_err(|_| Error::load(table, line, format!("invalid id '{}'", field.trim())))
}

/// In-memory item catalog.
#[derive(Clone, Debug, Default)]
pub struct ItemIndex {
    by_name: HashMap<String, ItemId>,
    names: HashMap<ItemId, String>,
    slots: HashMap<ItemId, SlotCategory>,
}

impl ItemIndex {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an item.
    pub fn insert(&mut self, id: ItemId, name: impl Into<String>, slot: SlotCategory) {
        let name = name.into();
        self.by_name.insert(name.to_lowercase(), id);
        self.names.insert(id, name);
        self.slots.insert(id, slot);
    }

    /// Builder-style [`ItemIndex::insert`].
    #[must_use]
    pub fn with_item(mut self, id: u32, name: &str, slot: SlotCategory) -> Self {
        self.insert(ItemId(id), name, slot);
        self
    }

    /// Loads an `id<TAB>name<TAB>slot` table.
    ///
    /// # Errors
    ///
    /// Returns a load error for rows with fewer than three fields or a
    /// non-numeric id.
    pub fn load(table: &str, text: &str) -> Result<Self> {
        let mut index = Self::new();
        for (line, fields) in rows(text) {
            let [id, name, slot, ..] = fields.as_slice() else {
                return Err(Error::load(table, line, "expected id, name, slot"));
            };
            let id = parse_id(table, line, id)?;
            index.insert(ItemId(id), name.trim(), SlotCategory::from_name(slot));
        }
        tracing::debug!(table, items = index.len(), "loaded item catalog");
        Ok(index)
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no items are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl ItemCatalog for ItemIndex {
    fn item_id(&self, name: &str) -> Option<ItemId> {
        self.by_name.get(&name.trim().to_lowercase()).copied()
    }

    fn item_name(&self, item: ItemId) -> Option<&str> {
        self.names.get(&item).map(String::as_str)
    }

    fn slot_category(&self, item: ItemId) -> SlotCategory {
        self.slots
            .get(&item)
            .copied()
            .unwrap_or(SlotCategory::Unrecognized)
    }
}

/// In-memory skill catalog.
#[derive(Clone, Debug, Default)]
pub struct SkillIndex {
    by_name: HashMap<String, SkillId>,
    names: HashMap<SkillId, String>,
    bookshelf: HashSet<SkillId>,
}

impl SkillIndex {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a skill.
    pub fn insert(&mut self, id: SkillId, name: impl Into<String>, bookshelf: bool) {
        let name = name.into();
        self.by_name.insert(name.to_lowercase(), id);
        self.names.insert(id, name);
        if bookshelf {
            self.bookshelf.insert(id);
        }
    }

    /// Builder-style [`SkillIndex::insert`].
    #[must_use]
    pub fn with_skill(mut self, id: u32, name: &str, bookshelf: bool) -> Self {
        self.insert(SkillId(id), name, bookshelf);
        self
    }

    /// Loads an `id<TAB>name[<TAB>bookshelf]` table.
    ///
    /// # Errors
    ///
    /// Returns a load error for rows with fewer than two fields or a
    /// non-numeric id.
    pub fn load(table: &str, text: &str) -> Result<Self> {
        let mut index = Self::new();
        for (line, fields) in rows(text) {
            let [id, name, rest @ ..] = fields.as_slice() else {
                return Err(Error::load(table, line, "expected id, name"));
            };
            let id = parse_id(table, line, id)?;
            let bookshelf = rest
                .first()
                .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("bookshelf"));
            index.insert(SkillId(id), name.trim(), bookshelf);
        }
        tracing::debug!(table, skills = index.len(), "loaded skill catalog");
        Ok(index)
    }

    /// Returns the number of skills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no skills are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl SkillCatalog for SkillIndex {
    fn skill_id(&self, name: &str) -> Option<SkillId> {
        self.by_name.get(&name.trim().to_lowercase()).copied()
    }

    fn skill_name(&self, skill: SkillId) -> Option<&str> {
        self.names.get(&skill).map(String::as_str)
    }

    fn is_bookshelf(&self, skill: SkillId) -> bool {
        self.bookshelf.contains(&skill)
    }
}
