//! Display models for CLI output
//!
//! This module converts resource state, schemas and API types into
//! CLI-friendly display rows.

pub mod display;

pub use display::{GroupDisplay, PolicyKindDisplay, SchemaFieldDisplay, StateDisplay};
