//! Status JSON ingestion.
//!
//! The game's status API reports the three statistics as a flat object:
//!
//! ```json
//! { "muscle": 20, "rawmuscle": 15, "mysticality": 11, "rawmysticality": 11,
//!   "moxie": 7, "rawmoxie": 5, ... }
//! ```
//!
//! Only those six fields are read; everything else in the object is ignored.
//! The API sometimes sends numbers as strings, so both are accepted.

use serde::{Deserialize, Deserializer};
use statline_foundation::{Error, ErrorKind, Result, Stat};

/// The statistics carried by a status JSON object.
#[derive(Copy, Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct StatusJson {
    /// Buffed muscle.
    #[serde(deserialize_with = "lenient_int")]
    pub muscle: i64,
    /// Unbuffed muscle.
    #[serde(deserialize_with = "lenient_int")]
    pub rawmuscle: i64,
    /// Buffed mysticality.
    #[serde(deserialize_with = "lenient_int")]
    pub mysticality: i64,
    /// Unbuffed mysticality.
    #[serde(deserialize_with = "lenient_int")]
    pub rawmysticality: i64,
    /// Buffed moxie.
    #[serde(deserialize_with = "lenient_int")]
    pub moxie: i64,
    /// Unbuffed moxie.
    #[serde(deserialize_with = "lenient_int")]
    pub rawmoxie: i64,
}

impl StatusJson {
    /// Parses a status object.
    ///
    /// # Errors
    ///
    /// Returns `MalformedJson` if the text is not JSON, or if any of the six
    /// fields is missing or not an integer.
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| Error::new(ErrorKind::MalformedJson(err.to_string())))
    }

    /// Builds from an already-decoded value.
    ///
    /// # Errors
    ///
    /// Same as [`StatusJson::parse`].
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|err| Error::new(ErrorKind::MalformedJson(err.to_string())))
    }

    /// The (value, base) pair for one statistic.
    #[must_use]
    pub const fn stat(&self, stat: Stat) -> (i64, i64) {
        match stat {
            Stat::Muscle => (self.muscle, self.rawmuscle),
            Stat::Mysticality => (self.mysticality, self.rawmysticality),
            Stat::Moxie => (self.moxie, self.rawmoxie),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrText {
    Int(i64),
    Text(String),
}

fn lenient_int<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match IntOrText::deserialize(deserializer)? {
        IntOrText::Int(value) => Ok(value),
        IntOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("'{text}' is not an integer"))),
    }
}
