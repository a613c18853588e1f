//! Runtime for Statline.
//!
//! Wires the catalogs, the character sheet parser, and the outfit reconciler
//! around one character's state:
//!
//! - [`RuntimeConfig`] - Data directory, log filter, game mode, and restrictions
//! - [`logging`] - Structured logging setup
//! - [`CharacterState`] and [`AdventureLog`] - What a commit writes into
//! - [`Session`] - Loaded tables plus state, with page and inventory updates
//! - [`serialize`] - Saving and restoring character state

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod logging;
pub mod serialize;
pub mod session;
pub mod state;

pub use config::{Restriction, RuntimeConfig};
pub use serialize::SavedState;
pub use session::Session;
pub use state::{AdventureLog, CharacterState};
