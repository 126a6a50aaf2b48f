//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// Precedence is CLI flag > environment variable > config file > default.
/// Environment overrides for the organization and token are applied when the
/// configuration is loaded in `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.azdo-provider/config.yaml)
    pub config: Option<String>,

    /// Debug logging requested
    pub debug: bool,
}

impl GlobalOptions {
    /// Called once in main.rs after parsing.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            debug: cli.debug,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Default log filter for env_logger; `RUST_LOG` still wins.
    pub fn log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "warn" }
    }
}
