//! Resource state display model

use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use crate::resource::ResourceData;

/// One attribute of resource state, with nested values addressed by path
/// (e.g. `settings.scope.0.repository_id`).
#[derive(Debug, Clone, PartialEq, Tabled, Serialize)]
pub struct StateDisplay {
    #[tabled(rename = "ATTRIBUTE")]
    pub attribute: String,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

impl StateDisplay {
    /// Flatten state into rows, identity first.
    pub fn rows(data: &ResourceData) -> Vec<Self> {
        let mut rows = vec![Self {
            attribute: "id".to_string(),
            value: data.id().unwrap_or("(absent)").to_string(),
        }];
        for (key, value) in data.attributes() {
            push_rows(&mut rows, key.clone(), value);
        }
        rows
    }
}

fn push_rows(rows: &mut Vec<StateDisplay>, path: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                push_rows(rows, format!("{}.{}", path, key), nested);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, nested) in items.iter().enumerate() {
                push_rows(rows, format!("{}.{}", path, index), nested);
            }
        }
        Value::String(s) => rows.push(StateDisplay {
            attribute: path,
            value: s.clone(),
        }),
        other => rows.push(StateDisplay {
            attribute: path,
            value: other.to_string(),
        }),
    }
}
