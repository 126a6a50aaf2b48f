//! Common CLI types shared across commands

use std::path::PathBuf;

use clap::Args;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per entry (default)
    #[default]
    Table,
    /// JSON format - structured for scripts
    Json,
}

/// Location of a resource state file
#[derive(Debug, Clone, Args)]
pub struct StateArgs {
    /// JSON file holding the resource's attributes and identity
    #[arg(long, value_name = "FILE")]
    pub state: PathBuf,
}
