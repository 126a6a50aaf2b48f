//! Base functionality shared by every branch policy resource.
//!
//! A single API configures many different policy types. They all share the
//! same record shape (enabled/blocking flags plus a `settings` object with a
//! `scope` array), so the schema and the scope mapping live here and each
//! policy kind only adds its own settings fields on top.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::client::models::{PolicyConfiguration, PolicyTypeRef, SettingsBag};
use crate::error::{ResourceError, Result};
use crate::resource::{FieldSchema, FieldType, ResourceData, ResourceSchema, Validator};

// Keys for schema elements
pub const SCHEMA_PROJECT_ID: &str = "project_id";
pub const SCHEMA_ENABLED: &str = "enabled";
pub const SCHEMA_BLOCKING: &str = "blocking";
pub const SCHEMA_SETTINGS: &str = "settings";
pub const SCHEMA_SCOPE: &str = "scope";
pub const SCHEMA_REPOSITORY_ID: &str = "repository_id";
pub const SCHEMA_REPOSITORY_REF: &str = "repository_ref";
pub const SCHEMA_MATCH_TYPE: &str = "match_type";

/// Branch name matching strategy used by a policy scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchKind {
    #[default]
    Exact,
    Prefix,
}

impl MatchKind {
    pub const VALUES: &'static [&'static str] = &["Exact", "Prefix"];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "Exact",
            MatchKind::Prefix => "Prefix",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("exact") {
            Ok(MatchKind::Exact)
        } else if s.eq_ignore_ascii_case("prefix") {
            Ok(MatchKind::Prefix)
        } else {
            Err(format!("expected one of {:?}, got {}", Self::VALUES, s))
        }
    }
}

/// Scope entry as configured locally
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct LocalScope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    repository_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    repository_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    match_type: Option<String>,
}

/// Scope entry as sent to and returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireScope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    repository_id: Option<String>,
    #[serde(rename = "refName", default, skip_serializing_if = "Option::is_none")]
    repository_ref_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    match_kind: Option<String>,
}

/// The only part of `settings` the base layer understands
#[derive(Debug, Default, Deserialize)]
struct CommonPolicySettings {
    #[serde(default)]
    scope: Vec<WireScope>,
}

/// Schema shared by all policy resources. Kinds add fields to the `settings` block.
pub fn base_schema(resource_name: &str) -> ResourceSchema {
    ResourceSchema::new(
        resource_name,
        vec![
            FieldSchema::string(SCHEMA_PROJECT_ID)
                .required()
                .force_new()
                .validate(Validator::NotEmpty),
            FieldSchema::bool(SCHEMA_ENABLED).default(true),
            FieldSchema::bool(SCHEMA_BLOCKING).default(true),
            FieldSchema::block(
                SCHEMA_SETTINGS,
                vec![
                    FieldSchema::list(
                        SCHEMA_SCOPE,
                        FieldType::Block(vec![
                            FieldSchema::string(SCHEMA_REPOSITORY_ID).validate(Validator::NotEmpty),
                            FieldSchema::string(SCHEMA_REPOSITORY_REF)
                                .validate(Validator::NotEmpty),
                            FieldSchema::string(SCHEMA_MATCH_TYPE)
                                .default(MatchKind::Exact.as_str())
                                .validate(Validator::StringInSlice {
                                    values: MatchKind::VALUES,
                                    ignore_case: true,
                                }),
                        ]),
                    )
                    .required()
                    .min_items(1),
                ],
            )
            .required(),
        ],
    )
}

/// The local `settings` block
pub fn settings_block(data: &ResourceData) -> Result<&Map<String, Value>> {
    data.get(SCHEMA_SETTINGS)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            ResourceError::validation(SCHEMA_SETTINGS, "exactly one settings block is required")
                .into()
        })
}

/// Parse a stored identity into a policy configuration ID
pub fn parse_policy_id(id: &str) -> Result<i32> {
    id.parse::<i32>().map_err(|e| {
        ResourceError::invalid_identity(id, format!("error parsing policy configuration ID: {}", e))
            .into()
    })
}

/// Expand the shared elements of local state into a policy configuration.
///
/// Returns the configuration together with the project ID it belongs to.
pub fn base_expand(data: &ResourceData, type_id: Uuid) -> Result<(PolicyConfiguration, String)> {
    let project_id = data
        .get_str(SCHEMA_PROJECT_ID)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ResourceError::validation(SCHEMA_PROJECT_ID, "must not be empty"))?
        .to_string();

    let mut config = PolicyConfiguration {
        id: None,
        is_enabled: Some(data.get_bool(SCHEMA_ENABLED).unwrap_or(true)),
        is_blocking: Some(data.get_bool(SCHEMA_BLOCKING).unwrap_or(true)),
        policy_type: Some(PolicyTypeRef::new(type_id)),
        settings: expand_settings(settings_block(data)?)?,
    };

    if let Some(id) = data.id().filter(|id| !id.is_empty()) {
        config.id = Some(parse_policy_id(id)?);
    }

    Ok((config, project_id))
}

fn expand_settings(settings: &Map<String, Value>) -> Result<SettingsBag> {
    let entries = settings
        .get(SCHEMA_SCOPE)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ResourceError::validation(
                format!("{}.{}", SCHEMA_SETTINGS, SCHEMA_SCOPE),
                "at least one scope is required",
            )
        })?;

    let mut scopes = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let path = format!("{}.{}.{}", SCHEMA_SETTINGS, SCHEMA_SCOPE, index);
        let local: LocalScope = serde_json::from_value(entry.clone())
            .map_err(|e| ResourceError::validation(path.clone(), e.to_string()))?;

        let match_kind = local
            .match_type
            .unwrap_or_else(|| MatchKind::Exact.as_str().to_string());
        MatchKind::from_str(&match_kind).map_err(|reason| {
            ResourceError::validation(format!("{}.{}", path, SCHEMA_MATCH_TYPE), reason)
        })?;

        scopes.push(WireScope {
            repository_id: local.repository_id,
            repository_ref_name: local.repository_ref,
            match_kind: Some(match_kind),
        });
    }

    let mut bag = SettingsBag::new();
    bag.insert(SCHEMA_SCOPE, scopes)?;
    Ok(bag)
}

/// Flatten the shared elements of a policy configuration into local state.
///
/// A configuration without an ID is treated as "does not exist": the local
/// identity is cleared and nothing else is written.
pub fn base_flatten(
    data: &mut ResourceData,
    config: &PolicyConfiguration,
    project_id: &str,
) -> Result<()> {
    let Some(id) = config.id else {
        data.clear_id();
        return Ok(());
    };

    data.set_id(id.to_string());
    data.set(SCHEMA_PROJECT_ID, project_id);
    data.set(SCHEMA_ENABLED, config.is_enabled.unwrap_or(true));
    data.set(SCHEMA_BLOCKING, config.is_blocking.unwrap_or(true));

    let common: CommonPolicySettings = config.settings.extract().map_err(|e| {
        ResourceError::ProtocolViolation(format!("unable to parse policy scope: {}", e))
    })?;

    let scopes = common
        .scope
        .into_iter()
        .map(|scope| LocalScope {
            repository_id: scope.repository_id,
            repository_ref: scope.repository_ref_name,
            match_type: scope.match_kind,
        })
        .collect::<Vec<_>>();

    let mut settings = Map::new();
    settings.insert(SCHEMA_SCOPE.to_string(), serde_json::to_value(scopes)?);
    data.set(SCHEMA_SETTINGS, settings);
    Ok(())
}
