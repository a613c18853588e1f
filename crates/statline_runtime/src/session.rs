//! A loaded session for one character.
//!
//! The session owns the static tables, the parse context, and the
//! character's state. Every update goes through it so the outfit
//! availability set always agrees with the inventory.

use std::fs;
use std::path::Path;

use statline_equipment::{
    EquipmentRegistry, OutfitReconciler, OutfitRegistry, ReconcileReport,
    seed_conditions_for_location, seed_conditions_for_outfit,
};
use statline_foundation::{
    EquipSlot, Error, ErrorKind, ItemCatalog, ItemId, ItemIndex, LocationId, OutfitId, Result,
    SkillIndex,
};
use statline_markup::Document;
use statline_parser::{
    CommitReport, ParseContext, SquareSubpoints, StatusJson, StatusSnapshotParser,
    SubpointFormula, commit_status_json, parse_and_commit,
};

use crate::config::{EQUIPMENT_TABLE, ITEMS_TABLE, OUTFITS_TABLE, RuntimeConfig, SKILLS_TABLE};
use crate::serialize::{self, SavedState};
use crate::state::{AdventureLog, CharacterState};

/// Tables, context, and state for one character.
pub struct Session<F = SquareSubpoints> {
    config: RuntimeConfig,
    context: ParseContext,
    formula: F,

    items: ItemIndex,
    skills: SkillIndex,
    equipment: EquipmentRegistry,
    outfits: OutfitRegistry,

    reconciler: OutfitReconciler,
    state: CharacterState,
    log: AdventureLog,
}

fn read_table(config: &RuntimeConfig, table: &str) -> Result<String> {
    let path = config.table_path(table);
    fs::read_to_string(&path).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to read table '{}': {e}",
            path.display()
        )))
    })
}

impl Session {
    /// Loads the four static tables from the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if a table cannot be read and `LoadError` if one is
    /// malformed.
    pub fn load(config: RuntimeConfig) -> Result<Self> {
        let items = ItemIndex::load(ITEMS_TABLE, &read_table(&config, ITEMS_TABLE)?)?;
        let skills = SkillIndex::load(SKILLS_TABLE, &read_table(&config, SKILLS_TABLE)?)?;
        let equipment =
            EquipmentRegistry::load(EQUIPMENT_TABLE, &read_table(&config, EQUIPMENT_TABLE)?, &items)?;
        let outfits =
            OutfitRegistry::load(OUTFITS_TABLE, &read_table(&config, OUTFITS_TABLE)?, &items)?;

        tracing::info!(
            data_dir = %config.data_dir.display(),
            items = items.len(),
            skills = skills.len(),
            equipment = equipment.len(),
            outfits = outfits.len(),
            "loaded static tables"
        );
        Ok(Self::from_tables(config, items, skills, equipment, outfits))
    }

    /// Builds a session around tables that are already loaded.
    #[must_use]
    pub fn from_tables(
        config: RuntimeConfig,
        items: ItemIndex,
        skills: SkillIndex,
        equipment: EquipmentRegistry,
        outfits: OutfitRegistry,
    ) -> Self {
        Self {
            context: config.parse_context(),
            config,
            formula: SquareSubpoints,
            items,
            skills,
            equipment,
            outfits,
            reconciler: OutfitReconciler::new(),
            state: CharacterState::new(),
            log: AdventureLog::new(),
        }
    }
}

impl<F: SubpointFormula> Session<F> {
    /// Swaps in a different subpoint formula.
    #[must_use]
    pub fn with_formula<G: SubpointFormula>(self, formula: G) -> Session<G> {
        Session {
            config: self.config,
            context: self.context,
            formula,
            items: self.items,
            skills: self.skills,
            equipment: self.equipment,
            outfits: self.outfits,
            reconciler: self.reconciler,
            state: self.state,
            log: self.log,
        }
    }

    /// The configuration this session was built from.
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The context used for status parses.
    #[must_use]
    pub fn context(&self) -> &ParseContext {
        &self.context
    }

    /// Mutable access to the parse context, for preferences and effects.
    pub fn context_mut(&mut self) -> &mut ParseContext {
        &mut self.context
    }

    /// The item catalog.
    #[must_use]
    pub fn items(&self) -> &ItemIndex {
        &self.items
    }

    /// The skill catalog.
    #[must_use]
    pub fn skills(&self) -> &SkillIndex {
        &self.skills
    }

    /// The equipment registry.
    #[must_use]
    pub fn equipment(&self) -> &EquipmentRegistry {
        &self.equipment
    }

    /// The outfit registry.
    #[must_use]
    pub fn outfits(&self) -> &OutfitRegistry {
        &self.outfits
    }

    /// The character's state.
    #[must_use]
    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    /// The adventure log.
    #[must_use]
    pub fn log(&self) -> &AdventureLog {
        &self.log
    }

    /// Resolves an item name.
    #[must_use]
    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.items.item_id(name)
    }

    /// Parses a character sheet and commits it.
    ///
    /// # Errors
    ///
    /// Returns the parse error; state is unchanged on failure.
    pub fn apply_status_page(&mut self, raw: &str) -> Result<CommitReport> {
        let document = Document::parse(raw);
        let parser = StatusSnapshotParser::new(&self.context, &self.skills, &self.formula);
        parse_and_commit(&parser, &document, &mut self.state, &mut self.log)
    }

    /// Commits the statistics from a status JSON object.
    ///
    /// # Errors
    ///
    /// Returns `MalformedJson`; state is unchanged on failure.
    pub fn apply_status_json(&mut self, text: &str) -> Result<StatusJson> {
        commit_status_json(text, &mut self.state)
    }

    /// Sets the owned count of `item` and updates outfits that use it.
    pub fn set_item_count(&mut self, item: ItemId, count: u32) -> ReconcileReport {
        self.state.set_item_count(item, count);
        self.reconciler.reconcile_item(item, &self.outfits, &self.state)
    }

    /// Adjusts the owned count of `item` and updates outfits that use it.
    pub fn adjust_item_count(&mut self, item: ItemId, delta: i64) -> ReconcileReport {
        self.state.adjust_item_count(item, delta);
        self.reconciler.reconcile_item(item, &self.outfits, &self.state)
    }

    /// Recomputes availability for every outfit.
    pub fn refresh_outfits(&mut self) -> ReconcileReport {
        self.reconciler.reconcile_all(&self.outfits, &self.state)
    }

    /// Outfits whose pieces are all owned.
    pub fn available_outfits(&self) -> impl Iterator<Item = OutfitId> {
        self.reconciler.available().into_iter()
    }

    /// Returns true if every piece of `outfit` is owned.
    #[must_use]
    pub fn has_outfit(&self, outfit: OutfitId) -> bool {
        self.reconciler.has_outfit(outfit)
    }

    /// Returns true if every piece of `outfit` is equipped.
    #[must_use]
    pub fn is_worn(&self, outfit: OutfitId) -> bool {
        OutfitReconciler::is_worn(outfit, &self.outfits, &self.items, &self.state)
    }

    /// Returns true if the character's base stats allow equipping `item`.
    #[must_use]
    pub fn can_equip(&self, item: ItemId) -> bool {
        self.equipment
            .can_equip(item, &self.state.status().base_stats())
    }

    /// Puts `item` in `slot`, returning whatever was there.
    pub fn equip(&mut self, slot: EquipSlot, item: ItemId) -> Option<ItemId> {
        self.state.equip(slot, item)
    }

    /// Empties `slot`.
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<ItemId> {
        self.state.unequip(slot)
    }

    /// Adds the pieces of the outfit `location` requires to the goals.
    pub fn seed_goals_for_location(&mut self, location: LocationId) -> bool {
        seed_conditions_for_location(location, &self.outfits, &mut self.state)
    }

    /// Adds the pieces of `outfit` to the goals.
    pub fn seed_goals_for_outfit(&mut self, outfit: OutfitId) -> usize {
        seed_conditions_for_outfit(outfit, &self.outfits, &mut self.state)
    }

    /// The state as it would be saved.
    #[must_use]
    pub fn saved(&self) -> SavedState {
        SavedState::new(self.state.clone(), self.log.clone())
    }

    /// Writes the state to `path`.
    ///
    /// # Errors
    ///
    /// See [`serialize::save_to_file`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        serialize::save_to_file(&self.saved(), path)
    }

    /// Replaces the state with a save read from `path`, then recomputes outfits.
    ///
    /// # Errors
    ///
    /// See [`serialize::load_from_file`]. State is unchanged on failure.
    pub fn restore(&mut self, path: impl AsRef<Path>) -> Result<ReconcileReport> {
        let saved = serialize::load_from_file(path)?;
        self.state = saved.state;
        self.log = saved.log;
        Ok(self.refresh_outfits())
    }
}
