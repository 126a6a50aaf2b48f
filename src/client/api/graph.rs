//! Graph API trait for descriptor and group lookups

use async_trait::async_trait;
use uuid::Uuid;

use crate::client::models::{GraphDescriptorResult, PagedGraphGroups};
use crate::error::ApiResult;

/// Graph (identity) operations for the Azure DevOps API
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// Resolve a storage key (e.g. a project ID) to its graph descriptor.
    async fn get_descriptor(&self, storage_key: Uuid) -> ApiResult<GraphDescriptorResult>;

    /// List one page of groups within a scope.
    ///
    /// Pass `None` for the first page, then the token from the previous page.
    async fn list_groups(
        &self,
        scope_descriptor: &str,
        continuation_token: Option<&str>,
    ) -> ApiResult<PagedGraphGroups>;
}
