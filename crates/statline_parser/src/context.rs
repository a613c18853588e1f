//! Inputs a parse needs that the page itself does not carry.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use statline_foundation::Error;

/// Which resource block the character sheet shows under the hit points.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ResourceMode {
    /// Current / maximum mana, like hit points.
    #[default]
    Mana,
    /// A single zombie horde size used for all three mana values.
    ZombieHorde,
    /// No mana block at all.
    NoMana,
}

impl FromStr for ResourceMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mana" => Ok(ResourceMode::Mana),
            "zombie" | "zombiecore" => Ok(ResourceMode::ZombieHorde),
            "vampyre" | "nomana" | "no-mana" => Ok(ResourceMode::NoMana),
            other => Err(Error::invalid_config(format!(
                "unknown resource mode '{other}' (expected mana, zombie, or vampyre)"
            ))),
        }
    }
}

impl fmt::Display for ResourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceMode::Mana => "mana",
            ResourceMode::ZombieHorde => "zombie",
            ResourceMode::NoMana => "vampyre",
        })
    }
}

/// Turns a statistic's base value and the progress shown beside it into
/// total subpoints.
pub trait SubpointFormula {
    /// Computes accumulated subpoints.
    fn subpoints(&self, base: i64, progress: i64) -> i64;
}

impl<F> SubpointFormula for F
where
    F: Fn(i64, i64) -> i64,
{
    fn subpoints(&self, base: i64, progress: i64) -> i64 {
        self(base, progress)
    }
}

/// `base² - 1 + progress`, the game's usual subpoint curve.
#[derive(Copy, Clone, Debug, Default)]
pub struct SquareSubpoints;

impl SubpointFormula for SquareSubpoints {
    fn subpoints(&self, base: i64, progress: i64) -> i64 {
        base.saturating_mul(base).saturating_sub(1).saturating_add(progress)
    }
}

/// Game mode and preference inputs to a status parse.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseContext {
    /// Resource block shown under the hit points.
    pub mode: ResourceMode,
    /// Playing a Bad Moon run.
    pub bad_moon: bool,
    /// Playing an Axecore run.
    pub axecore: bool,
    /// The king has been liberated this run.
    pub king_liberated: bool,
    /// Skills have been recalled this run.
    pub skills_recalled: bool,
    /// Golden Mr. Accessories owned.
    pub golden_mr_accessories: i64,
    /// Level of the Toggle Optimality skill.
    pub toggle_optimality_level: i64,
    /// The bird calendar has been read today.
    pub can_seek_birds: bool,
    /// Names of active effects.
    pub active_effects: HashSet<String>,
}

impl ParseContext {
    /// A default context in the given mode.
    #[must_use]
    pub fn new(mode: ResourceMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Sets the resource mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ResourceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the Bad Moon and Axecore flags.
    #[must_use]
    pub fn with_restrictions(mut self, bad_moon: bool, axecore: bool) -> Self {
        self.bad_moon = bad_moon;
        self.axecore = axecore;
        self
    }

    /// Sets the king-liberated flag.
    #[must_use]
    pub fn with_king_liberated(mut self, liberated: bool) -> Self {
        self.king_liberated = liberated;
        self
    }

    /// Sets the skills-recalled flag.
    #[must_use]
    pub fn with_skills_recalled(mut self, recalled: bool) -> Self {
        self.skills_recalled = recalled;
        self
    }

    /// Sets the Golden Mr. Accessory count.
    #[must_use]
    pub fn with_golden_mr_accessories(mut self, count: i64) -> Self {
        self.golden_mr_accessories = count;
        self
    }

    /// Sets the Toggle Optimality skill level.
    #[must_use]
    pub fn with_toggle_optimality_level(mut self, level: i64) -> Self {
        self.toggle_optimality_level = level;
        self
    }

    /// Sets whether the bird calendar has been read.
    #[must_use]
    pub fn with_can_seek_birds(mut self, can_seek: bool) -> Self {
        self.can_seek_birds = can_seek;
        self
    }

    /// Marks an effect as active.
    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.active_effects.insert(effect.into());
        self
    }

    /// Returns true if an effect is active.
    #[must_use]
    pub fn has_effect(&self, effect: &str) -> bool {
        self.active_effects.contains(effect)
    }

    fn in_restricted_run(&self) -> bool {
        self.bad_moon || self.axecore
    }

    /// Returns true if bookshelf skills should be listed.
    #[must_use]
    pub fn allows_bookshelf_skills(&self) -> bool {
        !self.in_restricted_run() || self.king_liberated
    }

    /// Returns true if Transcendent Olfaction should be listed.
    #[must_use]
    pub fn allows_olfaction(&self) -> bool {
        !self.in_restricted_run() || self.skills_recalled
    }
}
