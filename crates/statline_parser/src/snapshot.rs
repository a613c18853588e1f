//! The parsed character status value.
//!
//! A [`CharacterStatusSnapshot`] is built in full by one parse and handed to
//! the state store in one commit. Every field has a defined default, so a
//! snapshot that exists is always complete.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use statline_foundation::{BaseStats, SkillId, Stat, UniqueList};

/// A current / maximum / base triple (hit points, mana).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    /// Current value.
    pub current: i64,
    /// Buffed maximum.
    pub maximum: i64,
    /// Unbuffed maximum.
    pub base: i64,
}

impl Pool {
    /// Creates a pool.
    #[must_use]
    pub const fn new(current: i64, maximum: i64, base: i64) -> Self {
        Self {
            current,
            maximum,
            base,
        }
    }

    /// A pool whose three values are all `value`.
    #[must_use]
    pub const fn uniform(value: i64) -> Self {
        Self::new(value, value, value)
    }
}

/// One primary statistic as shown on the sheet.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    /// Buffed value.
    pub value: i64,
    /// Unbuffed value.
    pub base: i64,
    /// Accumulated subpoints.
    pub subpoints: i64,
}

impl StatValue {
    /// Creates a statistic value.
    #[must_use]
    pub const fn new(value: i64, base: i64, subpoints: i64) -> Self {
        Self {
            value,
            base,
            subpoints,
        }
    }
}

/// What a path forbids the character to consume.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ConsumptionRestriction {
    /// No restriction.
    #[default]
    None,
    /// No food and no drink at all.
    NoFoodOrDrink,
    /// Only alcoholic drinks.
    NoNonAlcoholic,
    /// No alcohol.
    NoAlcohol,
}

impl ConsumptionRestriction {
    /// Page text announcing each restriction, in priority order.
    pub const MARKERS: [(&'static str, ConsumptionRestriction); 3] = [
        (
            "You may not eat or drink anything.",
            ConsumptionRestriction::NoFoodOrDrink,
        ),
        (
            "You may not eat any food or drink any non-alcoholic beverages.",
            ConsumptionRestriction::NoNonAlcoholic,
        ),
        (
            "You may not consume any alcohol.",
            ConsumptionRestriction::NoAlcohol,
        ),
    ];

    /// Detects the restriction announced in raw page text. The first marker
    /// found wins.
    #[must_use]
    pub fn detect(raw: &str) -> Self {
        Self::MARKERS
            .iter()
            .find(|(marker, _)| raw.contains(marker))
            .map_or(ConsumptionRestriction::None, |(_, restriction)| *restriction)
    }
}

/// Usable skills and the subset kept across resets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSets {
    /// Skills usable now, in page order, no duplicates.
    pub available: UniqueList<SkillId>,
    /// Skills retained permanently.
    pub permed: OrdSet<SkillId>,
}

impl SkillSets {
    /// Returns true if `skill` is usable.
    #[must_use]
    pub fn has(&self, skill: SkillId) -> bool {
        self.available.contains(&skill)
    }

    /// Returns true if `skill` is permanently retained.
    #[must_use]
    pub fn is_permed(&self, skill: SkillId) -> bool {
        self.permed.contains(&skill)
    }
}

/// Everything one character sheet says about the character.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStatusSnapshot {
    /// Numeric player id.
    pub user_id: u64,
    /// Class name (the real class, even under a custom title).
    pub class_name: String,
    /// Character level, when the sheet shows one.
    pub level: Option<u32>,
    /// Avatar image path relative to the image host.
    pub avatar: Option<String>,

    /// Hit points.
    pub hp: Pool,
    /// Mana, or the zombie horde size. Zero when the class has no mana.
    pub mana: Pool,

    /// Muscle.
    pub muscle: StatValue,
    /// Mysticality.
    pub mysticality: StatValue,
    /// Moxie.
    pub moxie: StatValue,

    /// Inebriety; 0 when sober.
    pub inebriety: i64,
    /// Adventures remaining today.
    pub adventures: i64,
    /// Meat on hand.
    pub meat: i64,
    /// Completed ascensions.
    pub ascensions: i64,
    /// Turns played this run.
    pub turns_this_run: i64,
    /// Days played this run.
    pub days_this_run: i64,

    /// Zodiac sign.
    pub sign: Option<String>,
    /// Playing under a restricted (standard) path.
    pub path_restricted: bool,
    /// Consumption restriction of the current path.
    pub consumption: ConsumptionRestriction,
    /// Hardcore mode.
    pub hardcore: bool,
    /// Cannot receive items from other players yet.
    pub ronin: bool,
    /// Owns a store in the mall.
    pub has_store: bool,
    /// Owns a display case.
    pub has_display_case: bool,

    /// Skills.
    pub skills: SkillSets,
}

impl CharacterStatusSnapshot {
    /// Returns a statistic.
    #[must_use]
    pub const fn stat(&self, stat: Stat) -> &StatValue {
        match stat {
            Stat::Muscle => &self.muscle,
            Stat::Mysticality => &self.mysticality,
            Stat::Moxie => &self.moxie,
        }
    }

    /// Unbuffed values of the three statistics.
    #[must_use]
    pub const fn base_stats(&self) -> BaseStats {
        BaseStats::new(self.muscle.base, self.mysticality.base, self.moxie.base)
    }

    /// Returns true if the character may trade with other players.
    #[must_use]
    pub const fn can_interact(&self) -> bool {
        !self.hardcore && !self.ronin
    }
}
