//! Character sheet parsing for Statline.
//!
//! This crate turns one fetched character sheet into a
//! [`CharacterStatusSnapshot`] and writes it to character state in a single
//! commit:
//!
//! ```text
//! Document ──► StatusSnapshotParser ──► StatusParse ──► commit_status ──► StatusStore
//!                   │        ▲                                   │
//!                   ▼        │                                   ▼
//!          SkillSetExtractor ┘                            ResultProcessor
//! ```
//!
//! # Modules
//!
//! - [`snapshot`] - The snapshot value and its parts
//! - [`context`] - Game mode, gating flags, and the subpoint formula
//! - [`status`] - The token-stream walk over the sheet
//! - [`skills`] - The node-tree walk over the skill listing
//! - [`json`] - Statistics from the status JSON object
//! - [`commit`] - Parse-then-commit discipline

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod commit;
pub mod context;
pub mod json;
pub mod skills;
pub mod snapshot;
pub mod status;

pub use commit::{
    CommitReport, ResultProcessor, StatusStore, commit_status, commit_status_json,
    parse_and_commit,
};
pub use context::{ParseContext, ResourceMode, SquareSubpoints, SubpointFormula};
pub use json::StatusJson;
pub use skills::{Anomaly, SkillExtraction, SkillSetExtractor};
pub use snapshot::{CharacterStatusSnapshot, ConsumptionRestriction, Pool, SkillSets, StatValue};
pub use status::{StatusParse, StatusSnapshotParser};
