//! Policy API trait for configuration CRUD

use async_trait::async_trait;

use crate::client::models::PolicyConfiguration;
use crate::error::ApiResult;

/// Policy configuration operations for the Azure DevOps API
///
/// Every call is scoped to a project (ID or name). Errors are returned as the
/// raw transport error so callers can tell a 404 apart from other failures.
#[async_trait]
pub trait PolicyApi: Send + Sync {
    /// Create a policy configuration. The service assigns the ID.
    async fn create_policy_configuration(
        &self,
        project: &str,
        configuration: &PolicyConfiguration,
    ) -> ApiResult<PolicyConfiguration>;

    /// Get a policy configuration by ID.
    async fn get_policy_configuration(
        &self,
        project: &str,
        configuration_id: i32,
    ) -> ApiResult<PolicyConfiguration>;

    /// Replace a policy configuration. Settings and flags are fully replaced.
    async fn update_policy_configuration(
        &self,
        project: &str,
        configuration_id: i32,
        configuration: &PolicyConfiguration,
    ) -> ApiResult<PolicyConfiguration>;

    /// Delete a policy configuration.
    async fn delete_policy_configuration(&self, project: &str, configuration_id: i32)
    -> ApiResult<()>;
}
