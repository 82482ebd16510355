//! ai-toolkit - universal installer for AI agent resources
//!
//! Installs skills, rules, commands and agents from local directories or git
//! repositories into the directories each AI coding assistant reads, handling
//! files that already exist without ever losing their content silently.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod common;
mod config;
mod domain;
mod error;
mod hash;
mod installer;
mod platform;
mod resource;
mod source;
mod ui;

use cli::{Cli, Commands};
use config::ToolkitConfig;

/// Log filter override, takes precedence over `RUST_LOG`
const LOG_ENV: &str = "AI_TOOLKIT_LOG";

fn init_logging(verbose: bool) {
    let filter = std::env::var(LOG_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "ai_toolkit=debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Install(args) => {
            ToolkitConfig::load().and_then(|config| commands::install::run(cli.dir, &config, args))
        }
        Commands::Agents => ToolkitConfig::load().and_then(|config| commands::agents::run(&config)),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
