//! Runtime configuration.
//!
//! Values come from defaults, then the environment, then command-line flags,
//! each layer overriding the last.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use statline_foundation::{Error, Result};
use statline_parser::{ParseContext, ResourceMode};

/// Environment variable naming the data directory.
pub const DATA_DIR_VAR: &str = "STATLINE_DATA";
/// Environment variable holding the log filter directive.
pub const LOG_FILTER_VAR: &str = "STATLINE_LOG";
/// Environment variable naming the resource mode.
pub const MODE_VAR: &str = "STATLINE_MODE";
/// Environment variable listing active run restrictions, comma separated.
pub const RESTRICTIONS_VAR: &str = "STATLINE_RESTRICTIONS";
/// Environment variable listing active effects, comma separated.
pub const EFFECTS_VAR: &str = "STATLINE_EFFECTS";
/// Environment variable holding the golden Mr. Accessory count.
pub const GOLDEN_MR_VAR: &str = "STATLINE_GOLDEN_MR";
/// Environment variable holding the Toggle Optimality level.
pub const TOGGLE_OPTIMALITY_VAR: &str = "STATLINE_TOGGLE_OPTIMALITY";
/// Environment variable saying whether birds can be sought.
pub const SEEK_BIRDS_VAR: &str = "STATLINE_SEEK_BIRDS";

/// Item table file name within the data directory.
pub const ITEMS_TABLE: &str = "items.txt";
/// Skill table file name within the data directory.
pub const SKILLS_TABLE: &str = "skills.txt";
/// Equipment table file name within the data directory.
pub const EQUIPMENT_TABLE: &str = "equipment.txt";
/// Outfit table file name within the data directory.
pub const OUTFITS_TABLE: &str = "outfits.txt";

/// Configuration for a runtime session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Directory holding the static tables.
    pub data_dir: PathBuf,
    /// `tracing` filter directive.
    pub log_filter: String,
    /// How the character's secondary resource works.
    pub mode: ResourceMode,
    /// Bad Moon restrictions are active.
    pub bad_moon: bool,
    /// Axecore restrictions are active.
    pub axecore: bool,
    /// The current run is over and its restrictions lifted.
    pub king_liberated: bool,
    /// Class skills are recalled this run.
    pub skills_recalled: bool,
    /// Golden Mr. Accessories owned.
    pub golden_mr_accessories: i64,
    /// Toggle Optimality level.
    pub toggle_optimality_level: i64,
    /// Birds can be sought this run.
    pub can_seek_birds: bool,
    /// Active effect names.
    pub active_effects: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_filter: "statline=info".to_string(),
            mode: ResourceMode::Mana,
            bad_moon: false,
            axecore: false,
            king_liberated: false,
            skills_recalled: false,
            golden_mr_accessories: 0,
            toggle_optimality_level: 0,
            can_seek_birds: false,
            active_effects: Vec::new(),
        }
    }
}

/// A run restriction that changes skill gating.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Restriction {
    /// Bad Moon.
    BadMoon,
    /// Axecore.
    Axecore,
    /// The run is over.
    KingLiberated,
    /// Class skills are recalled.
    SkillsRecalled,
}

impl FromStr for Restriction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "badmoon" | "bad-moon" => Ok(Restriction::BadMoon),
            "axecore" => Ok(Restriction::Axecore),
            "liberated" | "king-liberated" => Ok(Restriction::KingLiberated),
            "recalled" | "skills-recalled" => Ok(Restriction::SkillsRecalled),
            other => Err(Error::invalid_config(format!(
                "unknown restriction '{other}' (expected bad-moon, axecore, liberated, or recalled)"
            ))),
        }
    }
}

fn list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}

fn parse_count(var: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid_config(format!("{var} must be an integer, got '{value}'")))
}

fn parse_flag(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::invalid_config(format!("{var} must be true or false, got '{value}'"))),
    }
}

impl RuntimeConfig {
    /// Creates a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a variable holds an unusable value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads overrides through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a variable holds an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(dir) = lookup(DATA_DIR_VAR) {
            if dir.trim().is_empty() {
                return Err(Error::invalid_config(format!("{DATA_DIR_VAR} is empty")));
            }
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(filter) = lookup(LOG_FILTER_VAR) {
            config.log_filter = filter;
        }
        if let Some(mode) = lookup(MODE_VAR) {
            config.mode = mode.parse()?;
        }
        if let Some(restrictions) = lookup(RESTRICTIONS_VAR) {
            for restriction in list(&restrictions) {
                config = config.with_restriction(restriction.parse()?);
            }
        }
        if let Some(effects) = lookup(EFFECTS_VAR) {
            for effect in list(&effects) {
                config = config.with_effect(effect);
            }
        }
        if let Some(count) = lookup(GOLDEN_MR_VAR) {
            config.golden_mr_accessories = parse_count(GOLDEN_MR_VAR, &count)?;
        }
        if let Some(level) = lookup(TOGGLE_OPTIMALITY_VAR) {
            config.toggle_optimality_level = parse_count(TOGGLE_OPTIMALITY_VAR, &level)?;
        }
        if let Some(flag) = lookup(SEEK_BIRDS_VAR) {
            config.can_seek_birds = parse_flag(SEEK_BIRDS_VAR, &flag)?;
        }
        Ok(config)
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Sets the log filter directive.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Sets the resource mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ResourceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the Bad Moon and Axecore restrictions.
    #[must_use]
    pub fn with_restrictions(mut self, bad_moon: bool, axecore: bool) -> Self {
        self.bad_moon = bad_moon;
        self.axecore = axecore;
        self
    }

    /// Marks the run as finished.
    #[must_use]
    pub fn with_king_liberated(mut self, liberated: bool) -> Self {
        self.king_liberated = liberated;
        self
    }

    /// Marks class skills as recalled.
    #[must_use]
    pub fn with_skills_recalled(mut self, recalled: bool) -> Self {
        self.skills_recalled = recalled;
        self
    }

    /// Turns on one run restriction.
    #[must_use]
    pub fn with_restriction(mut self, restriction: Restriction) -> Self {
        match restriction {
            Restriction::BadMoon => self.bad_moon = true,
            Restriction::Axecore => self.axecore = true,
            Restriction::KingLiberated => self.king_liberated = true,
            Restriction::SkillsRecalled => self.skills_recalled = true,
        }
        self
    }

    /// Sets the golden Mr. Accessory count.
    #[must_use]
    pub fn with_golden_mr_accessories(mut self, count: i64) -> Self {
        self.golden_mr_accessories = count;
        self
    }

    /// Sets the Toggle Optimality level.
    #[must_use]
    pub fn with_toggle_optimality_level(mut self, level: i64) -> Self {
        self.toggle_optimality_level = level;
        self
    }

    /// Sets whether birds can be sought.
    #[must_use]
    pub fn with_can_seek_birds(mut self, can_seek: bool) -> Self {
        self.can_seek_birds = can_seek;
        self
    }

    /// Adds an active effect.
    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        let effect = effect.into();
        if !self.active_effects.contains(&effect) {
            self.active_effects.push(effect);
        }
        self
    }

    /// Path of a table within the data directory.
    #[must_use]
    pub fn table_path(&self, table: &str) -> PathBuf {
        Path::new(&self.data_dir).join(table)
    }

    /// The parse context these settings describe.
    #[must_use]
    pub fn parse_context(&self) -> ParseContext {
        let context = ParseContext::new(self.mode)
            .with_restrictions(self.bad_moon, self.axecore)
            .with_king_liberated(self.king_liberated)
            .with_skills_recalled(self.skills_recalled)
            .with_golden_mr_accessories(self.golden_mr_accessories)
            .with_toggle_optimality_level(self.toggle_optimality_level)
            .with_can_seek_birds(self.can_seek_birds);
        self.active_effects
            .iter()
            .fold(context, |context, effect| context.with_effect(effect.as_str()))
    }
}
