//! Policy resource commands

use std::path::Path;

use colored::Colorize;
use log::debug;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::models::{PolicyKindDisplay, SchemaFieldDisplay, StateDisplay};
use crate::output::{Formattable, json};
use crate::policy::{PolicyKind, PolicyResource, policy_types};
use crate::resource::ResourceData;

/// Lifecycle operation run against Azure DevOps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

/// List registered policy kinds
pub fn kinds(opts: &GlobalOptions) -> Result<()> {
    let rows: Vec<PolicyKindDisplay> = policy_types().iter().map(Into::into).collect();
    rows.print(opts.format)
}

/// Show a kind's schema
pub fn schema(opts: &GlobalOptions, kind: PolicyKind) -> Result<()> {
    let schema = PolicyResource::new(kind).schema();
    match opts.format {
        OutputFormat::Table => SchemaFieldDisplay::rows(&schema).print(opts.format),
        OutputFormat::Json => {
            println!("{}", json::format_json(&schema)?);
            Ok(())
        }
    }
}

/// Validate a state file locally and show it with defaults applied
pub fn validate(opts: &GlobalOptions, kind: PolicyKind, state: &Path) -> Result<()> {
    let resource = PolicyResource::new(kind);
    let mut data = ResourceData::load_from(state)?;

    resource.validate(&mut data)?;
    kind.expand(&data)?;

    if opts.format == OutputFormat::Table {
        eprintln!("{} {} is valid", "✓".green(), state.display());
    }
    print_state(&data, opts.format)
}

/// Run one lifecycle operation and write the resulting state back
pub async fn run(
    opts: &GlobalOptions,
    kind: PolicyKind,
    operation: Operation,
    state: &Path,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let resource = PolicyResource::new(kind);
    let mut data = ResourceData::load_from(state)?;

    debug!("Running {:?} for {} from {}", operation, kind, state.display());
    match operation {
        Operation::Create => resource.create(ctx.client.as_ref(), &mut data).await?,
        Operation::Read => {
            resource.read(ctx.client.as_ref(), &mut data).await?;
            if data.id().is_none() {
                eprintln!(
                    "{} Policy no longer exists in Azure DevOps",
                    "⚠".yellow()
                );
            }
        }
        Operation::Update => resource.update(ctx.client.as_ref(), &mut data).await?,
        Operation::Delete => {
            resource.delete(ctx.client.as_ref(), &data).await?;
            data.clear_id();
        }
    }

    data.save_to(state)?;
    print_state(&data, ctx.format)
}

/// Import an existing policy into a state file
pub async fn import(opts: &GlobalOptions, kind: PolicyKind, id: &str, state: &Path) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut data = ResourceData::new();

    PolicyResource::new(kind)
        .import(ctx.client.as_ref(), id, &mut data)
        .await?;

    data.save_to(state)?;
    print_state(&data, ctx.format)
}

fn print_state(data: &ResourceData, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => StateDisplay::rows(data).print(format),
        OutputFormat::Json => {
            println!("{}", json::format_json(data)?);
            Ok(())
        }
    }
}
