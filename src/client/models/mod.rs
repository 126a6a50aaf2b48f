//! Azure DevOps API data models
//!
//! Wire types for the policy and graph endpoints, organized by area.

mod graph;
mod policy;

pub use graph::{GraphDescriptorResult, GraphGroup, PagedGraphGroups};
pub use policy::{PolicyConfiguration, PolicyTypeRef, SettingsBag};
