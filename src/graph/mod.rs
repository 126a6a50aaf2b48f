//! Group resolution
//!
//! Looking up a project group by name takes three steps: resolve the project
//! to its graph scope descriptor, page through every group in that scope, then
//! pick the first group whose display name matches case-insensitively.

use log::debug;
use uuid::Uuid;

use crate::client::GraphApi;
use crate::client::models::{GraphGroup, PagedGraphGroups};
use crate::error::{Error, ResourceError, Result};

mod data_group;

pub use data_group::read_group;

/// Find a group in a project by display name.
pub async fn lookup_group(
    client: &dyn GraphApi,
    project_id: &str,
    name: &str,
) -> Result<GraphGroup> {
    let storage_key = Uuid::parse_str(project_id)
        .map_err(|e| ResourceError::invalid_identity(project_id, e))?;

    let descriptor = project_descriptor(client, storage_key).await?;
    debug!("Project {} has scope descriptor {}", project_id, descriptor);

    let groups = list_all_groups(client, &descriptor)
        .await
        .map_err(|e| match e {
            Error::Api(e) => ResourceError::remote(
                format!("finding groups for project with ID {}", project_id),
                e,
            )
            .into(),
            other => other,
        })?;
    debug!("Found {} groups in project {}", groups.len(), project_id);

    select_group(groups, name).ok_or_else(|| {
        ResourceError::NotFound(format!(
            "Could not find group with name {} in project with ID {}",
            name, project_id
        ))
        .into()
    })
}

async fn project_descriptor(client: &dyn GraphApi, storage_key: Uuid) -> Result<String> {
    match client.get_descriptor(storage_key).await {
        Ok(descriptor) => Ok(descriptor.value),
        Err(e) if e.is_not_found() => Err(ResourceError::NotFound(format!(
            "Project with ID {} was not found. Error: {}",
            storage_key, e
        ))
        .into()),
        Err(e) => Err(ResourceError::remote(
            format!("finding descriptor for project with ID {}", storage_key),
            e,
        )
        .into()),
    }
}

/// Where the listing stands after a page
#[derive(Debug, PartialEq)]
enum PageState {
    /// Another page exists; `None` requests the first one
    More(Option<String>),
    Done,
}

impl PageState {
    fn after(page: &PagedGraphGroups) -> Result<Self> {
        match page.continuation_token.as_deref() {
            None | Some([]) => Ok(PageState::Done),
            Some([token]) if token.is_empty() => Ok(PageState::Done),
            Some([token]) => Ok(PageState::More(Some(token.clone()))),
            Some(tokens) => Err(ResourceError::ProtocolViolation(format!(
                "Expected at most 1 continuation token, but found {}",
                tokens.len()
            ))
            .into()),
        }
    }
}

/// Fetch every group in a scope, following continuation tokens in order.
pub async fn list_all_groups(
    client: &dyn GraphApi,
    scope_descriptor: &str,
) -> Result<Vec<GraphGroup>> {
    let mut groups = Vec::new();
    let mut state = PageState::More(None);

    while let PageState::More(token) = state {
        let page = client
            .list_groups(scope_descriptor, token.as_deref())
            .await?;
        state = PageState::after(&page)?;
        groups.extend(page.graph_groups);
    }

    Ok(groups)
}

fn select_group(groups: Vec<GraphGroup>, name: &str) -> Option<GraphGroup> {
    groups
        .into_iter()
        .find(|group| names_match(&group.display_name, name))
}

/// Case-insensitive comparison over Unicode, not just ASCII
fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
