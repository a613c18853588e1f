//! Equipment metadata, outfit definitions, and outfit reconciliation for Statline.
//!
//! This crate provides:
//! - [`EquipmentRegistry`] - Per-item power, hands, and stat gates
//! - [`OutfitRegistry`] - Outfit definitions with resolved pieces
//! - [`OutfitReconciler`] - Which outfits are owned, and which one is worn
//! - [`seed_conditions_for_location`] - Goal seeding for outfit-gated locations
//!
//! Registries are loaded once and only read afterwards. The reconciler's
//! availability set is the one piece of mutable state here; it talks to the
//! rest of the program through the [`Inventory`], [`EquippedView`], and
//! [`GoalConditions`] traits.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod conditions;
pub mod equipment;
pub mod outfit;
pub mod reconcile;

pub use conditions::{
    GoalConditions, LOCATION_OUTFITS, outfit_for_location, seed_conditions_for_location,
    seed_conditions_for_outfit,
};
pub use equipment::{EquipmentRecord, EquipmentRegistry, StatRequirement};
pub use outfit::{OutfitRecord, OutfitRegistry};
pub use reconcile::{EquippedView, Inventory, OutfitReconciler, ReconcileReport};
