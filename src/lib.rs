//! Statline - character-sheet scraping and outfit reconciliation
//!
//! This crate re-exports all layers of the Statline system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: statline_runtime     - Config, logging, session, state store, CLI
//! Layer 2: statline_parser      - Status snapshot parsing, skill extraction
//!          statline_equipment   - Equipment/outfit tables, reconciliation
//! Layer 1: statline_markup      - Token stream, document tree, structural queries
//! Layer 0: statline_foundation  - Identities, stats, slots, catalogs, Error
//! ```

pub use statline_equipment as equipment;
pub use statline_foundation as foundation;
pub use statline_markup as markup;
pub use statline_parser as parser;
pub use statline_runtime as runtime;
