//! Policy configuration models

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A branch policy configuration as stored by Azure DevOps.
///
/// The same record shape is used for every policy type; only `type.id` and
/// the contents of `settings` differ between kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfiguration {
    /// Configuration ID, assigned by the service on create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// Whether the policy is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,

    /// Whether the policy blocks completion when it fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_blocking: Option<bool>,

    /// Reference to the policy type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<PolicyTypeRef>,

    /// Type-specific settings, including the shared `scope` array
    #[serde(default)]
    pub settings: SettingsBag,
}

/// Reference to a policy type by its global ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTypeRef {
    pub id: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl PolicyTypeRef {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            display_name: None,
        }
    }
}

/// The semi-structured `settings` object of a policy configuration.
///
/// Keys keep their insertion order. Writers go through [`SettingsBag::insert`]
/// or [`SettingsBag::merge`], which refuse to overwrite a key that another
/// layer already wrote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<Map<String, Value>>")]
pub struct SettingsBag(Map<String, Value>);

impl From<Option<Map<String, Value>>> for SettingsBag {
    fn from(map: Option<Map<String, Value>>) -> Self {
        Self(map.unwrap_or_default())
    }
}

impl From<Map<String, Value>> for SettingsBag {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl SettingsBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single key. Fails if the key is already present.
    pub fn insert<V: Serialize>(&mut self, key: &str, value: V) -> Result<()> {
        if self.0.contains_key(key) {
            return Err(Error::Other(format!(
                "policy settings key '{}' is already set",
                key
            )));
        }
        self.0.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Merge every non-null field of a serializable struct into the bag.
    pub fn merge<T: Serialize>(&mut self, fields: &T) -> Result<()> {
        match serde_json::to_value(fields)? {
            Value::Object(map) => {
                for (key, value) in map {
                    if !value.is_null() {
                        self.insert(&key, value)?;
                    }
                }
                Ok(())
            }
            other => Err(Error::Other(format!(
                "policy settings must serialize to an object, got {}",
                other
            ))),
        }
    }

    /// Deserialize the keys a type understands, ignoring the rest.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }
}

#[cfg(test)]
impl SettingsBag {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
