//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod group;
pub mod policy;
pub mod status;

pub use args::{GlobalOptions, OutputFormat, StateArgs};
pub use context::CommandContext;

use crate::policy::PolicyKind;

/// Declarative branch policy and group resources for Azure DevOps
#[derive(Parser, Debug)]
#[command(name = "azdo-provider")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "AZDO_PROVIDER_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "AZDO_PROVIDER_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "AZDO_PROVIDER_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Manage branch policy resources
    #[command(subcommand)]
    Policy(PolicyCommands),

    /// Look up project groups
    #[command(subcommand)]
    Group(GroupCommands),
}

/// Branch policy subcommands
#[derive(Subcommand, Debug)]
pub enum PolicyCommands {
    /// List supported policy kinds
    Kinds,

    /// Show the declarative schema of a policy kind
    Schema {
        /// Policy kind
        kind: PolicyKind,
    },

    /// Apply defaults and validate a state file without contacting Azure DevOps
    Validate {
        /// Policy kind
        kind: PolicyKind,
        #[command(flatten)]
        state: StateArgs,
    },

    /// Create the policy described by a state file
    Create {
        /// Policy kind
        kind: PolicyKind,
        #[command(flatten)]
        state: StateArgs,
    },

    /// Refresh a state file from Azure DevOps
    Read {
        /// Policy kind
        kind: PolicyKind,
        #[command(flatten)]
        state: StateArgs,
    },

    /// Push a state file's settings to an existing policy
    Update {
        /// Policy kind
        kind: PolicyKind,
        #[command(flatten)]
        state: StateArgs,
    },

    /// Delete the policy a state file refers to
    Delete {
        /// Policy kind
        kind: PolicyKind,
        #[command(flatten)]
        state: StateArgs,
    },

    /// Import an existing policy into a state file
    Import {
        /// Policy kind
        kind: PolicyKind,
        /// `<project ID>/<policy ID>`
        id: String,
        #[command(flatten)]
        state: StateArgs,
    },
}

/// Group subcommands
#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// Find a group in a project by name (case-insensitive)
    Lookup {
        /// Project ID (UUID)
        #[arg(long)]
        project_id: String,
        /// Group display name
        #[arg(long)]
        name: String,
    },

    /// Resolve a group data source state file (`name`, `project_id`)
    Read {
        #[command(flatten)]
        state: StateArgs,
    },
}
