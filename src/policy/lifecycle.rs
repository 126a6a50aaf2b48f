//! Generic create/read/update/delete for policy resources

use log::debug;

use super::PolicyKind;
use super::common::{self, SCHEMA_PROJECT_ID};
use crate::client::PolicyApi;
use crate::error::{ResourceError, Result};
use crate::resource::{ResourceData, ResourceSchema};

/// A policy resource of one kind.
///
/// The lifecycle methods take local state by `&mut` and leave it describing
/// the remote object afterwards. A cleared identity means the object is gone.
#[derive(Debug, Clone, Copy)]
pub struct PolicyResource {
    kind: PolicyKind,
}

impl PolicyResource {
    pub fn new(kind: PolicyKind) -> Self {
        Self { kind }
    }

    pub fn schema(&self) -> ResourceSchema {
        self.kind.schema()
    }

    /// Apply schema defaults and check every constraint, without remote calls.
    pub fn validate(&self, data: &mut ResourceData) -> Result<()> {
        self.schema().prepare(data)?;
        Ok(())
    }

    pub async fn create(&self, client: &dyn PolicyApi, data: &mut ResourceData) -> Result<()> {
        self.validate(data)?;
        let (config, project_id) = self.kind.expand(data)?;

        debug!("Creating {} policy in project {}", self.kind, project_id);
        let created = client
            .create_policy_configuration(&project_id, &config)
            .await
            .map_err(|e| ResourceError::remote("creating policy in Azure DevOps", e))?;

        self.kind.flatten(data, &created, &project_id)
    }

    pub async fn read(&self, client: &dyn PolicyApi, data: &mut ResourceData) -> Result<()> {
        let id = match data.id() {
            Some(id) => common::parse_policy_id(id)?,
            None => {
                return Err(
                    ResourceError::invalid_identity("", "policy configuration ID is not set").into(),
                );
            }
        };
        let project_id = data
            .get_str(SCHEMA_PROJECT_ID)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ResourceError::validation(SCHEMA_PROJECT_ID, "must not be empty"))?
            .to_string();

        debug!(
            "Reading {} policy {} in project {}",
            self.kind, id, project_id
        );
        let config = match client.get_policy_configuration(&project_id, id).await {
            Ok(config) => config,
            Err(e) if e.is_not_found() => {
                debug!("Policy {} no longer exists, clearing identity", id);
                data.clear_id();
                return Ok(());
            }
            Err(e) => {
                return Err(ResourceError::remote(
                    format!(
                        "looking up policy configuration with ID ({}) and project ID ({})",
                        id, project_id
                    ),
                    e,
                )
                .into());
            }
        };

        self.kind.flatten(data, &config, &project_id)
    }

    pub async fn update(&self, client: &dyn PolicyApi, data: &mut ResourceData) -> Result<()> {
        self.validate(data)?;
        let (config, project_id) = self.kind.expand(data)?;
        let id = config.id.ok_or_else(|| {
            ResourceError::invalid_identity("", "policy configuration ID is not set")
        })?;

        debug!(
            "Updating {} policy {} in project {}",
            self.kind, id, project_id
        );
        let updated = client
            .update_policy_configuration(&project_id, id, &config)
            .await
            .map_err(|e| ResourceError::remote("updating policy in Azure DevOps", e))?;

        self.kind.flatten(data, &updated, &project_id)
    }

    /// Delete the remote object. Local state is left for the caller to drop.
    pub async fn delete(&self, client: &dyn PolicyApi, data: &ResourceData) -> Result<()> {
        let (config, project_id) = self.kind.expand(data)?;
        let id = config.id.ok_or_else(|| {
            ResourceError::invalid_identity("", "policy configuration ID is not set")
        })?;

        debug!(
            "Deleting {} policy {} in project {}",
            self.kind, id, project_id
        );
        client
            .delete_policy_configuration(&project_id, id)
            .await
            .map_err(|e| ResourceError::remote("deleting policy in Azure DevOps", e))?;
        Ok(())
    }

    /// Import an existing policy by `<project>/<policy id>`.
    pub async fn import(
        &self,
        client: &dyn PolicyApi,
        import_id: &str,
        data: &mut ResourceData,
    ) -> Result<()> {
        let (project_id, policy_id) = parse_import_id(import_id)?;

        data.set(SCHEMA_PROJECT_ID, project_id);
        data.set_id(policy_id.to_string());
        self.read(client, data).await?;

        if data.id().is_none() {
            return Err(ResourceError::NotFound(format!(
                "Policy configuration with ID {} was not found in project {}",
                policy_id, project_id
            ))
            .into());
        }
        Ok(())
    }
}

fn parse_import_id(import_id: &str) -> Result<(&str, i32)> {
    let invalid = |reason: &str| ResourceError::invalid_identity(import_id, reason);

    let mut parts = import_id.splitn(2, '/');
    let project_id = parts.next().filter(|p| !p.is_empty());
    let policy_id = parts.next().filter(|p| !p.is_empty());

    match (project_id, policy_id) {
        (Some(project_id), Some(policy_id)) => {
            let id = policy_id
                .parse::<i32>()
                .map_err(|e| invalid(&format!("policy ID is not an integer: {}", e)))?;
            Ok((project_id, id))
        }
        _ => Err(invalid("expected <project ID>/<policy ID>").into()),
    }
}
