//! # Textual Parsing
//!
//! Pattern-matching over catalog-reported text. Currently the single
//! concern is default-literal extraction.

pub mod default_literal;

pub use default_literal::{extract_default, DefaultValue};
