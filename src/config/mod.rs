//! Configuration management for azdo-provider

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::AzdoClient;
use crate::client::azdo::DEFAULT_REQUESTS_PER_SECOND;
use crate::error::{ConfigError, Result};

/// Environment variable overriding the organization URL
pub const ENV_ORG_SERVICE_URL: &str = "AZDO_ORG_SERVICE_URL";

/// Environment variable overriding the personal access token
pub const ENV_PERSONAL_ACCESS_TOKEN: &str = "AZDO_PERSONAL_ACCESS_TOKEN";

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Organization URL, e.g. `https://dev.azure.com/contoso`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_service_url: Option<String>,

    /// Personal access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_access_token: Option<String>,

    /// Graph (vssps) URL, derived from the organization URL when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_service_url: Option<String>,

    /// Client-side request pacing
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_requests_per_second() -> u32 {
    DEFAULT_REQUESTS_PER_SECOND
}

impl Default for Config {
    fn default() -> Self {
        Self {
            org_service_url: None,
            personal_access_token: None,
            graph_service_url: None,
            requests_per_second: default_requests_per_second(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".azdo-provider").join("config.yaml"))
    }

    /// Resolve an optional `--config` path to the file that will be used
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load the file (if any) and apply environment overrides.
    ///
    /// A missing file is not an error as long as the environment supplies
    /// everything; [`Config::validate_auth`] reports what is missing.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        let mut config = match Self::load_from(&path) {
            Ok(config) => config,
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Self::default(),
            Err(e) => return Err(e),
        };
        config.apply_overrides(
            std::env::var(ENV_ORG_SERVICE_URL).ok(),
            std::env::var(ENV_PERSONAL_ACCESS_TOKEN).ok(),
        );
        Ok(config)
    }

    /// Environment values win over the file. Empty values are ignored.
    pub fn apply_overrides(&mut self, org_url: Option<String>, token: Option<String>) {
        if let Some(url) = org_url.filter(|u| !u.is_empty()) {
            self.org_service_url = Some(url);
        }
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.personal_access_token = Some(token);
        }
    }

    /// Validate that required configuration is present
    pub fn validate_auth(&self) -> Result<()> {
        if self.org_service_url.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingOrgUrl.into());
        }
        if self.personal_access_token.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingToken.into());
        }
        Ok(())
    }

    /// Build an API client from validated configuration
    pub fn client(&self) -> Result<AzdoClient> {
        self.validate_auth()?;
        let (Some(org_url), Some(token)) = (&self.org_service_url, &self.personal_access_token)
        else {
            return Err(ConfigError::MissingOrgUrl.into());
        };

        let mut client = AzdoClient::new(org_url, token)?
            .with_requests_per_second(self.requests_per_second);
        if let Some(graph_url) = &self.graph_service_url {
            client = client.with_graph_url(graph_url)?;
        }
        Ok(client)
    }
}
