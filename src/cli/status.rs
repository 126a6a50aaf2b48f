//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::config::{Config, ENV_ORG_SERVICE_URL, ENV_PERSONAL_ACCESS_TOKEN};
use crate::error::Result;

/// Display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "azdo-provider Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not found)".dimmed()
        );
    }
    println!();

    let config = Config::load_at(opts.config_ref())?;

    match &config.org_service_url {
        Some(url) if !url.is_empty() => println!("{} Organization: {}", "✓".green(), url),
        _ => {
            println!("{} Organization URL not configured", "✗".red());
            println!("  → Set {} or add org_service_url", ENV_ORG_SERVICE_URL);
        }
    }

    match &config.personal_access_token {
        Some(token) if !token.is_empty() => {
            println!("{} Personal access token configured", "✓".green())
        }
        _ => {
            println!("{} Personal access token not configured", "✗".red());
            println!(
                "  → Set {} or add personal_access_token",
                ENV_PERSONAL_ACCESS_TOKEN
            );
        }
    }

    if let Some(graph_url) = &config.graph_service_url {
        println!("{} Custom graph URL: {}", "○".dimmed(), graph_url.cyan());
    }
    println!(
        "{} Request pacing: {} per second",
        "○".dimmed(),
        config.requests_per_second
    );
    println!();

    Ok(())
}
