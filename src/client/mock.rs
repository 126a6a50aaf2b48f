//! Mock Azure DevOps API client for testing
//!
//! Provides an in-memory implementation of the API traits for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::api::{GraphApi, PolicyApi};
use super::models::{GraphDescriptorResult, GraphGroup, PagedGraphGroups, PolicyConfiguration};
use crate::error::{ApiError, ApiResult};

/// Mock API client for testing.
///
/// Policy configurations live in an in-memory map keyed by project and ID,
/// so a create followed by a get behaves like the real service. Group pages
/// are keyed by the continuation token that requests them.
///
/// # Example
/// ```ignore
/// let mock = MockAzdoClient::new()
///     .with_descriptor(project_id, "scp.abc")
///     .await
///     .with_group_page(None, vec![group], Some("tok"))
///     .await;
/// ```
#[derive(Default)]
pub struct MockAzdoClient {
    /// Stored policy configurations by (project, id)
    policies: Arc<Mutex<HashMap<(String, i32), PolicyConfiguration>>>,
    /// Last ID handed out by create
    last_id: Arc<Mutex<i32>>,
    /// Project descriptors by storage key
    descriptors: Arc<Mutex<HashMap<Uuid, String>>>,
    /// Group pages by the continuation token that requests them ("" = first page)
    group_pages: Arc<Mutex<HashMap<String, PagedGraphGroups>>>,
    /// Error to return on the next call of any method - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Errors to return for a specific method - consumed on first use
    method_errors: Arc<Mutex<HashMap<&'static str, ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub create_policy_configuration: usize,
    pub get_policy_configuration: usize,
    pub update_policy_configuration: usize,
    pub delete_policy_configuration: usize,
    pub get_descriptor: usize,
    pub list_groups: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.create_policy_configuration
            + self.get_policy_configuration
            + self.update_policy_configuration
            + self.delete_policy_configuration
            + self.get_descriptor
            + self.list_groups
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    /// The API method called (e.g., "create_policy_configuration")
    pub method: String,
    /// Project the call was scoped to, if any
    pub project: Option<String>,
    /// Policy configuration ID, if any
    pub configuration_id: Option<i32>,
    /// Body sent with create/update
    pub configuration: Option<PolicyConfiguration>,
    /// Continuation token passed to list_groups
    pub continuation_token: Option<String>,
}

impl CapturedRequest {
    fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            project: None,
            configuration_id: None,
            configuration: None,
            continuation_token: None,
        }
    }
}

impl MockAzdoClient {
    /// Create a new mock client with empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stored policy configuration. The configuration must carry an ID.
    pub async fn with_policy(self, project: &str, configuration: PolicyConfiguration) -> Self {
        let id = configuration.id.unwrap_or_default();
        {
            let mut last_id = self.last_id.lock().await;
            *last_id = (*last_id).max(id);
        }
        self.policies
            .lock()
            .await
            .insert((project.to_string(), id), configuration);
        self
    }

    /// Configure the descriptor returned for a storage key.
    pub async fn with_descriptor(self, storage_key: Uuid, descriptor: &str) -> Self {
        self.descriptors
            .lock()
            .await
            .insert(storage_key, descriptor.to_string());
        self
    }

    /// Configure a group page.
    ///
    /// `requested_by` is the continuation token that fetches this page
    /// (`None` for the first page); `next_token` is what the page hands back.
    pub async fn with_group_page(
        self,
        requested_by: Option<&str>,
        groups: Vec<GraphGroup>,
        next_token: Option<&str>,
    ) -> Self {
        let page = PagedGraphGroups {
            graph_groups: groups,
            continuation_token: next_token.map(|t| vec![t.to_string()]),
        };
        self.with_raw_group_page(requested_by, page).await
    }

    /// Configure a group page verbatim, e.g. with several continuation tokens.
    pub async fn with_raw_group_page(
        self,
        requested_by: Option<&str>,
        page: PagedGraphGroups,
    ) -> Self {
        self.group_pages
            .lock()
            .await
            .insert(requested_by.unwrap_or_default().to_string(), page);
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Configure an error for the next call of one method.
    /// The error is consumed after one use.
    pub async fn with_error_on(self, method: &'static str, error: ApiError) -> Self {
        self.method_errors.lock().await.insert(method, error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Get a stored policy configuration.
    pub async fn stored_policy(&self, project: &str, id: i32) -> Option<PolicyConfiguration> {
        self.policies
            .lock()
            .await
            .get(&(project.to_string(), id))
            .cloned()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self, method: &'static str) -> ApiResult<()> {
        if let Some(e) = self.error.lock().await.take() {
            return Err(e);
        }
        if let Some(e) = self.method_errors.lock().await.remove(method) {
            return Err(e);
        }
        Ok(())
    }

    async fn capture(&self, request: CapturedRequest) {
        self.captured_requests.lock().await.push(request);
    }

    fn not_found(id: i32) -> ApiError {
        ApiError::NotFound(format!("Policy configuration {} does not exist", id))
    }
}

// ============================================================================
// PolicyApi Implementation
// ============================================================================

#[async_trait]
impl PolicyApi for MockAzdoClient {
    async fn create_policy_configuration(
        &self,
        project: &str,
        configuration: &PolicyConfiguration,
    ) -> ApiResult<PolicyConfiguration> {
        self.capture(CapturedRequest {
            project: Some(project.to_string()),
            configuration: Some(configuration.clone()),
            ..CapturedRequest::new("create_policy_configuration")
        })
        .await;
        self.call_count.lock().await.create_policy_configuration += 1;
        self.check_error("create_policy_configuration").await?;

        let id = {
            let mut last_id = self.last_id.lock().await;
            *last_id += 1;
            *last_id
        };

        let mut created = configuration.clone();
        created.id = Some(id);
        self.policies
            .lock()
            .await
            .insert((project.to_string(), id), created.clone());
        Ok(created)
    }

    async fn get_policy_configuration(
        &self,
        project: &str,
        configuration_id: i32,
    ) -> ApiResult<PolicyConfiguration> {
        self.capture(CapturedRequest {
            project: Some(project.to_string()),
            configuration_id: Some(configuration_id),
            ..CapturedRequest::new("get_policy_configuration")
        })
        .await;
        self.call_count.lock().await.get_policy_configuration += 1;
        self.check_error("get_policy_configuration").await?;

        self.stored_policy(project, configuration_id)
            .await
            .ok_or_else(|| Self::not_found(configuration_id))
    }

    async fn update_policy_configuration(
        &self,
        project: &str,
        configuration_id: i32,
        configuration: &PolicyConfiguration,
    ) -> ApiResult<PolicyConfiguration> {
        self.capture(CapturedRequest {
            project: Some(project.to_string()),
            configuration_id: Some(configuration_id),
            configuration: Some(configuration.clone()),
            ..CapturedRequest::new("update_policy_configuration")
        })
        .await;
        self.call_count.lock().await.update_policy_configuration += 1;
        self.check_error("update_policy_configuration").await?;

        let mut policies = self.policies.lock().await;
        let key = (project.to_string(), configuration_id);
        if !policies.contains_key(&key) {
            return Err(Self::not_found(configuration_id));
        }

        let mut updated = configuration.clone();
        updated.id = Some(configuration_id);
        policies.insert(key, updated.clone());
        Ok(updated)
    }

    async fn delete_policy_configuration(
        &self,
        project: &str,
        configuration_id: i32,
    ) -> ApiResult<()> {
        self.capture(CapturedRequest {
            project: Some(project.to_string()),
            configuration_id: Some(configuration_id),
            ..CapturedRequest::new("delete_policy_configuration")
        })
        .await;
        self.call_count.lock().await.delete_policy_configuration += 1;
        self.check_error("delete_policy_configuration").await?;

        self.policies
            .lock()
            .await
            .remove(&(project.to_string(), configuration_id))
            .map(|_| ())
            .ok_or_else(|| Self::not_found(configuration_id))
    }
}

// ============================================================================
// GraphApi Implementation
// ============================================================================

#[async_trait]
impl GraphApi for MockAzdoClient {
    async fn get_descriptor(&self, storage_key: Uuid) -> ApiResult<GraphDescriptorResult> {
        self.capture(CapturedRequest::new("get_descriptor")).await;
        self.call_count.lock().await.get_descriptor += 1;
        self.check_error("get_descriptor").await?;

        self.descriptors
            .lock()
            .await
            .get(&storage_key)
            .map(|value| GraphDescriptorResult {
                value: value.clone(),
            })
            .ok_or_else(|| ApiError::NotFound(format!("No descriptor for {}", storage_key)))
    }

    async fn list_groups(
        &self,
        scope_descriptor: &str,
        continuation_token: Option<&str>,
    ) -> ApiResult<PagedGraphGroups> {
        self.capture(CapturedRequest {
            project: Some(scope_descriptor.to_string()),
            continuation_token: continuation_token.map(str::to_string),
            ..CapturedRequest::new("list_groups")
        })
        .await;
        self.call_count.lock().await.list_groups += 1;
        self.check_error("list_groups").await?;

        Ok(self
            .group_pages
            .lock()
            .await
            .get(continuation_token.unwrap_or_default())
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::{GroupBuilder, PolicyConfigurationBuilder};

    #[tokio::test]
    async fn test_mock_create_assigns_increasing_ids() {
        let mock = MockAzdoClient::new();
        let config = PolicyConfigurationBuilder::new().build();

        let first = mock.create_policy_configuration("proj", &config).await.unwrap();
        let second = mock.create_policy_configuration("proj", &config).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(mock.call_counts().await.create_policy_configuration, 2);
    }

    #[tokio::test]
    async fn test_mock_seeded_policy_is_readable() {
        let mock = MockAzdoClient::new()
            .with_policy("proj", PolicyConfigurationBuilder::new().id(10).build())
            .await;

        let fetched = mock.get_policy_configuration("proj", 10).await.unwrap();
        assert_eq!(fetched.id, Some(10));

        // Projects are separate namespaces
        let err = mock.get_policy_configuration("other", 10).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_error_is_consumed() {
        let mock = MockAzdoClient::new()
            .with_policy("proj", PolicyConfigurationBuilder::new().id(3).build())
            .await
            .with_error(ApiError::ServerError("boom".to_string()))
            .await;

        assert!(mock.get_policy_configuration("proj", 3).await.is_err());
        assert!(mock.get_policy_configuration("proj", 3).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_method_error_only_hits_that_method() {
        let mock = MockAzdoClient::new()
            .with_descriptor(Uuid::nil(), "scp.nil")
            .await
            .with_error_on("list_groups", ApiError::Network("down".to_string()))
            .await;

        assert!(mock.get_descriptor(Uuid::nil()).await.is_ok());
        assert!(mock.list_groups("scp.nil", None).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_group_pages_by_token() {
        let mock = MockAzdoClient::new()
            .with_group_page(None, vec![GroupBuilder::new("name1").build()], Some("tok"))
            .await
            .with_group_page(Some("tok"), vec![GroupBuilder::new("name2").build()], None)
            .await;

        let first = mock.list_groups("scp", None).await.unwrap();
        assert_eq!(first.graph_groups[0].display_name, "name1");
        assert_eq!(first.continuation_token, Some(vec!["tok".to_string()]));

        let second = mock.list_groups("scp", Some("tok")).await.unwrap();
        assert_eq!(second.graph_groups[0].display_name, "name2");
        assert!(second.continuation_token.is_none());

        let requests = mock.captured_requests().await;
        assert_eq!(requests[1].continuation_token.as_deref(), Some("tok"));
    }
}
