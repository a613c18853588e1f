//! The three primary statistics.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A primary statistic.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stat {
    /// Muscle
    Muscle,
    /// Mysticality
    Mysticality,
    /// Moxie
    Moxie,
}

impl Stat {
    /// All statistics in sheet order.
    pub const ALL: [Stat; 3] = [Stat::Muscle, Stat::Mysticality, Stat::Moxie];

    /// The three-letter tag used on the character sheet and in requirement
    /// strings (`Mus`, `Mys`, `Mox`).
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Stat::Muscle => "Mus",
            Stat::Mysticality => "Mys",
            Stat::Moxie => "Mox",
        }
    }

    /// Looks up a statistic by its three-letter tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Stat> {
        Self::ALL.into_iter().find(|stat| stat.tag() == tag)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stat::Muscle => "muscle",
            Stat::Mysticality => "mysticality",
            Stat::Moxie => "moxie",
        };
        f.write_str(name)
    }
}

/// Unbuffed base values of the three statistics.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BaseStats {
    /// Base muscle.
    pub muscle: i64,
    /// Base mysticality.
    pub mysticality: i64,
    /// Base moxie.
    pub moxie: i64,
}

impl BaseStats {
    /// Creates a new set of base statistics.
    #[must_use]
    pub const fn new(muscle: i64, mysticality: i64, moxie: i64) -> Self {
        Self {
            muscle,
            mysticality,
            moxie,
        }
    }

    /// Returns the base value of the given statistic.
    #[must_use]
    pub const fn get(&self, stat: Stat) -> i64 {
        match stat {
            Stat::Muscle => self.muscle,
            Stat::Mysticality => self.mysticality,
            Stat::Moxie => self.moxie,
        }
    }
}
