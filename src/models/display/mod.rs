//! Display model implementations for table and JSON output
//!
//! Display models transform domain types into CLI-friendly formats
//! with appropriate column names and serialization.

mod group;
mod policy;
mod state;

pub use group::GroupDisplay;
pub use policy::{PolicyKindDisplay, SchemaFieldDisplay};
pub use state::StateDisplay;

/// Placeholder for absent values in tables
const NONE: &str = "--";
