//! Token streams, lenient document trees, and structural queries over game pages.
//!
//! Game pages arrive as loosely-formed markup. This crate turns one page into
//! two views that the parsers walk:
//!
//! ```text
//! raw markup
//!      │
//!      ├──────────────────────────┐
//!      ▼                          ▼
//! ┌─────────────────┐   ┌─────────────────┐
//! │  TOKEN STREAM   │   │  DOCUMENT TREE  │
//! │  (flat text)    │   │  (node arena)   │
//! └─────────────────┘   └─────────────────┘
//!      │                          │
//!      ▼                          ▼
//!  seek / read_int          DocumentView::select
//! ```
//!
//! # Modules
//!
//! - [`text`] - Entity decoding and whitespace normalization
//! - [`token`] - Forward-only token cursor with `seek`/`read_int`
//! - [`tree`] - Lenient markup → node tree builder
//! - [`query`] - Structural queries and the [`DocumentView`] capability
//! - [`document`] - One page with both views built once

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod document;
pub mod query;
pub mod text;
pub mod token;
pub mod tree;

pub use document::Document;
pub use query::{DocumentView, NodeQuery, SelectedNode};
pub use token::TokenStream;
pub use tree::{DocumentTree, Node, NodeId, NodeKind};
