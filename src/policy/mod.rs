//! Branch policy resources
//!
//! Every policy kind shares one record shape and one lifecycle. A kind only
//! contributes a fixed type ID and a [`SettingsCodec`] for the settings keys
//! that are unique to it. The registry below is the closed set of kinds.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::client::models::PolicyConfiguration;
use crate::error::Result;
use crate::resource::{ResourceData, ResourceSchema};

mod auto_reviewers;
mod build_validation;
pub mod codec;
pub mod common;
mod lifecycle;
mod min_reviewers;

pub use codec::{NoSettings, SettingsCodec};
pub use lifecycle::PolicyResource;

/// A supported branch policy kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    MinReviewers,
    BuildValidation,
    AutoReviewers,
    WorkItemLinking,
    CommentResolution,
}

/// Registration of one policy kind
pub struct PolicyType {
    pub kind: PolicyKind,
    /// Resource type name exposed to configuration
    pub resource_name: &'static str,
    /// Policy type ID known to the service
    pub type_id: Uuid,
    pub description: &'static str,
    codec: &'static dyn SettingsCodec,
}

static NO_SETTINGS: NoSettings = NoSettings;

/// Ordered the same as [`PolicyKind`]'s variants
static POLICY_TYPES: [PolicyType; 5] = [
    PolicyType {
        kind: PolicyKind::MinReviewers,
        resource_name: "azuredevops_branch_policy_min_reviewers",
        type_id: Uuid::from_u128(0xfa4e907d_c16b_4a4c_9dfa_4906e5d171dd),
        description: "Minimum number of reviewers",
        codec: &min_reviewers::CODEC,
    },
    PolicyType {
        kind: PolicyKind::BuildValidation,
        resource_name: "azuredevops_branch_policy_build_validation",
        type_id: Uuid::from_u128(0x0609b952_1397_4640_95ec_e00a01b2c241),
        description: "Build validation",
        codec: &build_validation::CODEC,
    },
    PolicyType {
        kind: PolicyKind::AutoReviewers,
        resource_name: "azuredevops_branch_policy_auto_reviewers",
        type_id: Uuid::from_u128(0xfd2167ab_b0be_447a_8ec8_39368250530e),
        description: "Automatically included reviewers",
        codec: &auto_reviewers::CODEC,
    },
    PolicyType {
        kind: PolicyKind::WorkItemLinking,
        resource_name: "azuredevops_branch_policy_work_item_linking",
        type_id: Uuid::from_u128(0x40e92b44_2fe1_4dd6_b3d8_74a9c21d0c6e),
        description: "Work item linking",
        codec: &NO_SETTINGS,
    },
    PolicyType {
        kind: PolicyKind::CommentResolution,
        resource_name: "azuredevops_branch_policy_comment_resolution",
        type_id: Uuid::from_u128(0xc6a1889d_b943_4856_b76f_9e46bb6b0df2),
        description: "Comment requirements",
        codec: &NO_SETTINGS,
    },
];

/// All registered policy types
pub fn policy_types() -> &'static [PolicyType] {
    &POLICY_TYPES
}

impl PolicyKind {
    pub fn registration(self) -> &'static PolicyType {
        &POLICY_TYPES[self as usize]
    }

    pub fn type_id(self) -> Uuid {
        self.registration().type_id
    }

    pub fn resource_name(self) -> &'static str {
        self.registration().resource_name
    }

    fn codec(self) -> &'static dyn SettingsCodec {
        self.registration().codec
    }

    /// Base schema plus this kind's settings fields
    pub fn schema(self) -> ResourceSchema {
        let mut schema = common::base_schema(self.resource_name());
        if let Some(fields) = schema
            .field_mut(common::SCHEMA_SETTINGS)
            .and_then(|f| f.nested_fields_mut())
        {
            fields.extend(self.codec().settings_fields());
        }
        schema
    }

    /// Local state to a policy configuration and its project ID
    pub fn expand(self, data: &ResourceData) -> Result<(PolicyConfiguration, String)> {
        let (mut config, project_id) = common::base_expand(data, self.type_id())?;
        self.codec()
            .expand_settings(common::settings_block(data)?, &mut config.settings)?;
        Ok((config, project_id))
    }

    /// Policy configuration to local state
    pub fn flatten(
        self,
        data: &mut ResourceData,
        config: &PolicyConfiguration,
        project_id: &str,
    ) -> Result<()> {
        // A rejected response leaves `data` untouched
        let mut flattened = data.clone();
        common::base_flatten(&mut flattened, config, project_id)?;
        if flattened.id().is_some() {
            let mut settings = match flattened.remove(common::SCHEMA_SETTINGS) {
                Some(Value::Object(settings)) => settings,
                _ => Map::new(),
            };
            self.codec()
                .flatten_settings(&config.settings, &mut settings)?;
            flattened.set(common::SCHEMA_SETTINGS, settings);
        }

        *data = flattened;
        Ok(())
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyKind::MinReviewers => "min-reviewers",
            PolicyKind::BuildValidation => "build-validation",
            PolicyKind::AutoReviewers => "auto-reviewers",
            PolicyKind::WorkItemLinking => "work-item-linking",
            PolicyKind::CommentResolution => "comment-resolution",
        };
        f.write_str(name)
    }
}
