//! Core identities, statistics, equipment slots, catalogs, and errors for Statline.
//!
//! This crate provides:
//! - [`ItemId`], [`SkillId`], [`OutfitId`], [`LocationId`] - Stable identities
//! - [`Stat`] and [`BaseStats`] - The three primary statistics
//! - [`SlotCategory`] and [`EquipSlot`] - Equipment slot model
//! - [`ItemCatalog`] and [`SkillCatalog`] - Name → identity registries
//! - [`Error`] - Rich error types with context
//! - [`UniqueList`] - Persistent, insertion-ordered, duplicate-free list

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod collections;
pub mod error;
pub mod ids;
pub mod slot;
pub mod stat;

pub use catalog::{ItemCatalog, ItemIndex, SkillCatalog, SkillIndex};
pub use collections::UniqueList;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use ids::{ItemId, LocationId, OutfitId, SkillId};
pub use slot::{EquipSlot, SlotCategory};
pub use stat::{BaseStats, Stat};
