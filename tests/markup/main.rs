//! Integration tests for the statline_markup crate.
//!
//! Tests for the two views of a page:
//! - Token stream flattening, seeking, and number reading
//! - Document tree construction and structural queries

mod queries;
mod tokens;
