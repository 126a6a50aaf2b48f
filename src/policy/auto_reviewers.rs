//! Automatically included reviewers policy

use serde::{Deserialize, Serialize};

use super::codec::FieldCodec;
use crate::resource::{FieldSchema, FieldType, Validator};

#[derive(Debug, Serialize, Deserialize)]
pub struct AutoReviewersSettings {
    auto_reviewer_ids: Vec<String>,
    #[serde(default)]
    submitter_can_vote: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default)]
    path_filters: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoReviewersWire {
    #[serde(default)]
    required_reviewer_ids: Vec<String>,
    #[serde(default)]
    creator_vote_counts: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default)]
    filename_patterns: Vec<String>,
}

impl From<AutoReviewersSettings> for AutoReviewersWire {
    fn from(s: AutoReviewersSettings) -> Self {
        Self {
            required_reviewer_ids: s.auto_reviewer_ids,
            creator_vote_counts: s.submitter_can_vote,
            message: s.message,
            filename_patterns: s.path_filters,
        }
    }
}

impl From<AutoReviewersWire> for AutoReviewersSettings {
    fn from(w: AutoReviewersWire) -> Self {
        Self {
            auto_reviewer_ids: w.required_reviewer_ids,
            submitter_can_vote: w.creator_vote_counts,
            message: w.message,
            path_filters: w.filename_patterns,
        }
    }
}

fn fields() -> Vec<FieldSchema> {
    vec![
        FieldSchema::list("auto_reviewer_ids", FieldType::String)
            .required()
            .min_items(1)
            .validate(Validator::NotEmpty),
        FieldSchema::bool("submitter_can_vote").default(false),
        FieldSchema::string("message"),
        FieldSchema::list("path_filters", FieldType::String),
    ]
}

pub static CODEC: FieldCodec<AutoReviewersSettings, AutoReviewersWire> = FieldCodec::new(fields);
