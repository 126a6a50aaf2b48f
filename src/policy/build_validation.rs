//! Build validation policy
//!
//! Requires a successful build of the given definition before a pull request
//! can complete. `valid_duration` is in minutes; 0 means the build never expires.

use serde::{Deserialize, Serialize};

use super::codec::FieldCodec;
use crate::resource::{FieldSchema, FieldType, Validator};

const DEFAULT_VALID_DURATION: i64 = 720;

fn default_true() -> bool {
    true
}

fn default_valid_duration() -> i64 {
    DEFAULT_VALID_DURATION
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BuildValidationSettings {
    build_definition_id: i64,
    display_name: String,
    #[serde(default)]
    manual_queue_only: bool,
    #[serde(default = "default_true")]
    queue_on_source_update_only: bool,
    #[serde(default = "default_valid_duration")]
    valid_duration: i64,
    #[serde(default)]
    filename_patterns: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildValidationWire {
    #[serde(default)]
    build_definition_id: i64,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    manual_queue_only: bool,
    #[serde(default = "default_true")]
    queue_on_source_update_only: bool,
    #[serde(default)]
    valid_duration: i64,
    #[serde(default)]
    filename_patterns: Vec<String>,
}

impl From<BuildValidationSettings> for BuildValidationWire {
    fn from(s: BuildValidationSettings) -> Self {
        Self {
            build_definition_id: s.build_definition_id,
            display_name: s.display_name,
            manual_queue_only: s.manual_queue_only,
            queue_on_source_update_only: s.queue_on_source_update_only,
            valid_duration: s.valid_duration,
            filename_patterns: s.filename_patterns,
        }
    }
}

impl From<BuildValidationWire> for BuildValidationSettings {
    fn from(w: BuildValidationWire) -> Self {
        Self {
            build_definition_id: w.build_definition_id,
            display_name: w.display_name,
            manual_queue_only: w.manual_queue_only,
            queue_on_source_update_only: w.queue_on_source_update_only,
            valid_duration: w.valid_duration,
            filename_patterns: w.filename_patterns,
        }
    }
}

fn fields() -> Vec<FieldSchema> {
    vec![
        FieldSchema::int("build_definition_id")
            .required()
            .validate(Validator::IntAtLeast(1)),
        FieldSchema::string("display_name")
            .required()
            .validate(Validator::NotEmpty),
        FieldSchema::bool("manual_queue_only").default(false),
        FieldSchema::bool("queue_on_source_update_only").default(true),
        FieldSchema::int("valid_duration")
            .default(DEFAULT_VALID_DURATION)
            .validate(Validator::IntAtLeast(0)),
        FieldSchema::list("filename_patterns", FieldType::String),
    ]
}

pub static CODEC: FieldCodec<BuildValidationSettings, BuildValidationWire> =
    FieldCodec::new(fields);
