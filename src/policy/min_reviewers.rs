//! Minimum number of reviewers policy

use serde::{Deserialize, Serialize};

use super::codec::FieldCodec;
use crate::resource::{FieldSchema, Validator};

const SCHEMA_REVIEWER_COUNT: &str = "reviewer_count";
const SCHEMA_SUBMITTER_CAN_VOTE: &str = "submitter_can_vote";

#[derive(Debug, Serialize, Deserialize)]
pub struct MinReviewersSettings {
    reviewer_count: i64,
    #[serde(default)]
    submitter_can_vote: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinReviewersWire {
    #[serde(default)]
    minimum_approver_count: i64,
    #[serde(default)]
    creator_vote_counts: bool,
}

impl From<MinReviewersSettings> for MinReviewersWire {
    fn from(s: MinReviewersSettings) -> Self {
        Self {
            minimum_approver_count: s.reviewer_count,
            creator_vote_counts: s.submitter_can_vote,
        }
    }
}

impl From<MinReviewersWire> for MinReviewersSettings {
    fn from(w: MinReviewersWire) -> Self {
        Self {
            reviewer_count: w.minimum_approver_count,
            submitter_can_vote: w.creator_vote_counts,
        }
    }
}

fn fields() -> Vec<FieldSchema> {
    vec![
        FieldSchema::int(SCHEMA_REVIEWER_COUNT)
            .required()
            .validate(Validator::IntAtLeast(1)),
        FieldSchema::bool(SCHEMA_SUBMITTER_CAN_VOTE).default(false),
    ]
}

pub static CODEC: FieldCodec<MinReviewersSettings, MinReviewersWire> = FieldCodec::new(fields);
