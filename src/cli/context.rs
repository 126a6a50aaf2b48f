//! Command execution context
//!
//! Loads configuration and builds the API client once per command.

use std::sync::Arc;

use log::debug;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::AzdoClient;
use crate::config::Config;
use crate::error::Result;

/// Context for commands that talk to Azure DevOps
pub struct CommandContext {
    /// API client for the configured organization
    pub client: Arc<AzdoClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config (file + environment), validate auth and build the client.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        let client = Arc::new(config.client()?);
        debug!(
            "Using organization {}",
            config.org_service_url.as_deref().unwrap_or_default()
        );

        Ok(Self {
            client,
            format: opts.format,
        })
    }
}
