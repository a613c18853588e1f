//! Integration tests for the statline_parser crate.
//!
//! Tests for the character sheet pipeline:
//! - Full-page status parsing against a captured sheet
//! - Game modes and optional sections
//! - Skill extraction and gating
//! - Status JSON ingestion and commits

mod commit;
mod skills;
mod status_page;

use statline_foundation::SkillIndex;

pub const SHEET: &str = include_str!("../data/charsheet.html");
pub const SKILLS: &str = include_str!("../../data/skills.txt");

pub fn skills() -> SkillIndex {
    SkillIndex::load("skills.txt", SKILLS).unwrap()
}

/// Subpoint stand-in that keeps both inputs visible in the result.
pub fn formula(base: i64, progress: i64) -> i64 {
    base * 10_000 + progress
}
