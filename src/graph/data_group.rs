//! `azuredevops_group` data source

use crate::client::GraphApi;
use crate::error::{ResourceError, Result};
use crate::resource::{FieldSchema, ResourceData, ResourceSchema, Validator};

pub const RESOURCE_NAME: &str = "azuredevops_group";

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(
        RESOURCE_NAME,
        vec![
            FieldSchema::string("name")
                .required()
                .force_new()
                .validate(Validator::NotEmpty),
            FieldSchema::string("project_id")
                .required()
                .force_new()
                .validate(Validator::NotEmpty),
            FieldSchema::string("descriptor").computed(),
            FieldSchema::string("origin").computed(),
            FieldSchema::string("origin_id").computed(),
        ],
    )
}

/// Resolve the configured group and write its computed attributes.
pub async fn read_group(client: &dyn GraphApi, data: &mut ResourceData) -> Result<()> {
    schema().prepare(data)?;

    let name = required(data, "name")?;
    let project_id = required(data, "project_id")?;
    let group = super::lookup_group(client, &project_id, &name).await?;

    data.set_id(group.descriptor.as_str());
    data.set("descriptor", group.descriptor);
    match group.origin {
        Some(origin) => data.set("origin", origin),
        None => {
            data.remove("origin");
        }
    }
    match group.origin_id {
        Some(origin_id) => data.set("origin_id", origin_id),
        None => {
            data.remove("origin_id");
        }
    }
    Ok(())
}

fn required(data: &ResourceData, key: &str) -> Result<String> {
    data.get_str(key)
        .map(str::to_string)
        .ok_or_else(|| ResourceError::validation(key, "required attribute is not set").into())
}
