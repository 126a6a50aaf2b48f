//! azdo-provider - declarative branch policy and group resources for Azure DevOps

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod graph;
mod models;
mod output;
mod policy;
mod resource;

use cli::policy::Operation;
use cli::{Cli, Commands, GlobalOptions, GroupCommands, PolicyCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let opts = GlobalOptions::from_cli(&cli);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(opts.log_filter()))
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("azdo-provider version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Policy(policy_cmd) => match policy_cmd {
            PolicyCommands::Kinds => cli::policy::kinds(&opts),
            PolicyCommands::Schema { kind } => cli::policy::schema(&opts, kind),
            PolicyCommands::Validate { kind, state } => {
                cli::policy::validate(&opts, kind, &state.state)
            }
            PolicyCommands::Create { kind, state } => {
                cli::policy::run(&opts, kind, Operation::Create, &state.state).await
            }
            PolicyCommands::Read { kind, state } => {
                cli::policy::run(&opts, kind, Operation::Read, &state.state).await
            }
            PolicyCommands::Update { kind, state } => {
                cli::policy::run(&opts, kind, Operation::Update, &state.state).await
            }
            PolicyCommands::Delete { kind, state } => {
                cli::policy::run(&opts, kind, Operation::Delete, &state.state).await
            }
            PolicyCommands::Import { kind, id, state } => {
                cli::policy::import(&opts, kind, &id, &state.state).await
            }
        },
        Commands::Group(group_cmd) => match group_cmd {
            GroupCommands::Lookup { project_id, name } => {
                cli::group::lookup(&opts, &project_id, &name).await
            }
            GroupCommands::Read { state } => cli::group::read(&opts, &state.state).await,
        },
    }
}
