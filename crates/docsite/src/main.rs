//! Documentation content pipeline CLI

use anyhow::Result;
use clap::Parser;
use docsite::config::Config;
use docsite::markdown::FormatMode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::*;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match Config::load(&cli.docs_dir, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            docsite::errors::print_error_with_suggestion(
                "Failed to load configuration",
                &e,
                "Check the TOML syntax of the config file, or pass --config with a valid path",
            );
            std::process::exit(1);
        }
    };

    let mode = |lightweight: bool| {
        if lightweight {
            FormatMode::Lightweight
        } else {
            FormatMode::Full
        }
    };

    let result = match cli.command {
        Commands::Fmt { file, lang, lightweight } => {
            format_snippet(&config, file.as_deref(), lang.as_deref(), mode(lightweight))
        }
        Commands::Md { file, write, check, lightweight } => {
            format_document(&config, &file, MdAction::from_flags(write, check), mode(lightweight))
        }
        Commands::Crumbs { path, json } => show_breadcrumbs(&path, json),
        Commands::Export { full, output } => export_docs(&config, full, output.as_deref()),
    };

    if let Err(e) = result {
        docsite::errors::print_error("Command failed", &e);
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr so formatted output on stdout stays clean
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
