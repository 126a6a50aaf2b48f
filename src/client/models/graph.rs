//! Graph (identity) models

use serde::{Deserialize, Serialize};

/// A security group in the organization graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphGroup {
    /// Stable graph descriptor, e.g. `vssgp.Uy0xLTk...`
    #[serde(default)]
    pub descriptor: String,

    /// Display name, e.g. `Contributors`
    #[serde(default)]
    pub display_name: String,

    /// Principal name, e.g. `[project]\Contributors`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_name: Option<String>,

    /// Origin of the group (`vsts` or `aad`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// ID of the group in its origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_id: Option<String>,
}

/// One page of groups from the list endpoint.
///
/// `continuation_token` holds every token value the service returned. A
/// well-behaved response carries at most one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagedGraphGroups {
    pub graph_groups: Vec<GraphGroup>,
    pub continuation_token: Option<Vec<String>>,
}

/// Result of resolving a storage key to a graph descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDescriptorResult {
    pub value: String,
}
