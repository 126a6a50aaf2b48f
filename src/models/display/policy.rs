//! Policy kind and schema display models

use serde::Serialize;
use tabled::Tabled;

use super::NONE;
use crate::policy::PolicyType;
use crate::resource::{FieldSchema, FieldType, ResourceSchema, Validator};

/// Registered policy kind for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PolicyKindDisplay {
    #[tabled(rename = "KIND")]
    pub kind: String,

    #[tabled(rename = "RESOURCE")]
    pub resource: String,

    #[tabled(rename = "TYPE ID")]
    pub type_id: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<&PolicyType> for PolicyKindDisplay {
    fn from(policy_type: &PolicyType) -> Self {
        Self {
            kind: policy_type.kind.to_string(),
            resource: policy_type.resource_name.to_string(),
            type_id: policy_type.type_id.to_string(),
            description: policy_type.description.to_string(),
        }
    }
}

/// One schema attribute, nested attributes addressed by path.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SchemaFieldDisplay {
    #[tabled(rename = "ATTRIBUTE")]
    pub attribute: String,

    #[tabled(rename = "TYPE")]
    #[serde(rename = "type")]
    pub field_type: String,

    #[tabled(rename = "REQUIRED")]
    pub required: bool,

    #[tabled(rename = "DEFAULT")]
    pub default: String,

    #[tabled(rename = "CONSTRAINTS")]
    pub constraints: String,
}

impl SchemaFieldDisplay {
    pub fn rows(schema: &ResourceSchema) -> Vec<Self> {
        let mut rows = Vec::new();
        push_fields(&mut rows, "", &schema.fields);
        rows
    }
}

fn push_fields(rows: &mut Vec<SchemaFieldDisplay>, prefix: &str, fields: &[FieldSchema]) {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{}.{}", prefix, field.name)
        };

        rows.push(SchemaFieldDisplay {
            attribute: path.clone(),
            field_type: type_name(&field.field_type),
            required: field.required,
            default: field
                .default
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| NONE.to_string()),
            constraints: constraints(field),
        });

        match &field.field_type {
            FieldType::Block(nested) => push_fields(rows, &path, nested),
            FieldType::List(element) => {
                if let FieldType::Block(nested) = element.as_ref() {
                    push_fields(rows, &format!("{}.*", path), nested);
                }
            }
            _ => {}
        }
    }
}

fn type_name(field_type: &FieldType) -> String {
    match field_type {
        FieldType::String => "string".to_string(),
        FieldType::Bool => "bool".to_string(),
        FieldType::Int => "int".to_string(),
        FieldType::List(element) => format!("list({})", type_name(element)),
        FieldType::Block(_) => "block".to_string(),
    }
}

fn constraints(field: &FieldSchema) -> String {
    let mut parts = Vec::new();
    if field.computed {
        parts.push("computed".to_string());
    }
    if field.force_new {
        parts.push("force new".to_string());
    }
    if let Some(min) = field.min_items {
        parts.push(format!("min items {}", min));
    }
    for validator in &field.validators {
        parts.push(match validator {
            Validator::NotEmpty => "not empty".to_string(),
            Validator::IntAtLeast(n) => format!(">= {}", n),
            Validator::StringInSlice { values, .. } => format!("one of {}", values.join("|")),
        });
    }

    if parts.is_empty() {
        NONE.to_string()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{PolicyKind, policy_types};

    #[test]
    fn test_kind_display_from_registration() {
        let display = PolicyKindDisplay::from(PolicyKind::MinReviewers.registration());

        assert_eq!(display.kind, "min-reviewers");
        assert_eq!(display.resource, "azuredevops_branch_policy_min_reviewers");
        assert_eq!(display.type_id, "fa4e907d-c16b-4a4c-9dfa-4906e5d171dd");
        assert_eq!(policy_types().len(), 5);
    }

    #[test]
    fn test_schema_rows_walk_nested_blocks() {
        let rows = SchemaFieldDisplay::rows(&PolicyKind::MinReviewers.schema());
        let find = |path: &str| rows.iter().find(|r| r.attribute == path).unwrap();

        let project = find("project_id");
        assert!(project.required);
        assert_eq!(project.constraints, "force new, not empty");

        assert_eq!(find("enabled").default, "true");
        assert_eq!(find("settings.scope").field_type, "list(block)");
        assert_eq!(
            find("settings.scope.*.match_type").constraints,
            "one of Exact|Prefix"
        );
        assert_eq!(find("settings.reviewer_count").constraints, ">= 1");
    }
}
