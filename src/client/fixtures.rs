//! Test fixtures and builders for API model types
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)] // Builder methods are available for future tests

use serde_json::{Value, json};
use uuid::Uuid;

use super::models::{GraphGroup, PolicyConfiguration, PolicyTypeRef, SettingsBag};

// ============================================================================
// PolicyConfigurationBuilder
// ============================================================================

/// Builder for creating test PolicyConfiguration instances.
///
/// # Example
/// ```ignore
/// let config = PolicyConfigurationBuilder::new()
///     .id(12)
///     .setting("minimumApproverCount", json!(2))
///     .scope("r1", "refs/heads/main", "exact")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct PolicyConfigurationBuilder {
    id: Option<i32>,
    is_enabled: Option<bool>,
    is_blocking: Option<bool>,
    type_id: Uuid,
    scopes: Vec<Value>,
    settings: Vec<(String, Value)>,
}

impl PolicyConfigurationBuilder {
    /// Create a new builder for an enabled, blocking minimum-reviewers policy.
    pub fn new() -> Self {
        Self {
            id: None,
            is_enabled: Some(true),
            is_blocking: Some(true),
            type_id: Uuid::from_u128(0xfa4e907d_c16b_4a4c_9dfa_4906e5d171dd),
            scopes: Vec::new(),
            settings: Vec::new(),
        }
    }

    pub fn id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn enabled(mut self, enabled: Option<bool>) -> Self {
        self.is_enabled = enabled;
        self
    }

    pub fn blocking(mut self, blocking: Option<bool>) -> Self {
        self.is_blocking = blocking;
        self
    }

    pub fn type_id(mut self, type_id: Uuid) -> Self {
        self.type_id = type_id;
        self
    }

    /// Add a scope entry in wire shape.
    pub fn scope(mut self, repository_id: &str, ref_name: &str, match_kind: &str) -> Self {
        self.scopes.push(json!({
            "repositoryId": repository_id,
            "refName": ref_name,
            "matchKind": match_kind,
        }));
        self
    }

    /// Add a raw type-specific setting.
    pub fn setting(mut self, key: &str, value: Value) -> Self {
        self.settings.push((key.to_string(), value));
        self
    }

    /// Build the PolicyConfiguration.
    pub fn build(self) -> PolicyConfiguration {
        let mut settings = SettingsBag::new();
        if !self.scopes.is_empty() {
            settings
                .insert("scope", self.scopes)
                .expect("fresh settings bag");
        }
        for (key, value) in self.settings {
            settings.insert(&key, value).expect("unique fixture keys");
        }

        PolicyConfiguration {
            id: self.id,
            is_enabled: self.is_enabled,
            is_blocking: self.is_blocking,
            policy_type: Some(PolicyTypeRef::new(self.type_id)),
            settings,
        }
    }
}

impl Default for PolicyConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// GroupBuilder
// ============================================================================

/// Builder for creating test GraphGroup instances.
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    display_name: String,
    descriptor: String,
    origin: Option<String>,
    origin_id: Option<String>,
}

impl GroupBuilder {
    /// Create a new builder with the given display name.
    pub fn new(display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            descriptor: format!("vssgp.{}", display_name),
            display_name,
            origin: Some("vsts".to_string()),
            origin_id: None,
        }
    }

    pub fn descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.descriptor = descriptor.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn origin_id(mut self, origin_id: impl Into<String>) -> Self {
        self.origin_id = Some(origin_id.into());
        self
    }

    /// Build the GraphGroup.
    pub fn build(self) -> GraphGroup {
        GraphGroup {
            principal_name: Some(format!("[project]\\{}", self.display_name)),
            descriptor: self.descriptor,
            display_name: self.display_name,
            origin: self.origin,
            origin_id: self.origin_id,
        }
    }
}
