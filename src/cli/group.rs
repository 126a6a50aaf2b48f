//! Group lookup commands

use std::path::Path;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::graph;
use crate::models::{GroupDisplay, StateDisplay};
use crate::output::{Formattable, json};
use crate::resource::ResourceData;

/// Find one group by name in a project
pub async fn lookup(opts: &GlobalOptions, project_id: &str, name: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let group = graph::lookup_group(ctx.client.as_ref(), project_id, name).await?;

    vec![GroupDisplay::from(group)].print(ctx.format)
}

/// Resolve a group data source state file in place
pub async fn read(opts: &GlobalOptions, state: &Path) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut data = ResourceData::load_from(state)?;

    graph::read_group(ctx.client.as_ref(), &mut data).await?;
    data.save_to(state)?;

    match ctx.format {
        OutputFormat::Table => StateDisplay::rows(&data).print(ctx.format),
        OutputFormat::Json => {
            println!("{}", json::format_json(&data)?);
            Ok(())
        }
    }
}
