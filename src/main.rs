//! crtsync CLI - sync animations and pictures to a Raspberry Pi matrix
//!
//! Usage:
//!   crtsync init <keyfile>                                - Create the store
//!   crtsync add <name> <file> <key> [--loop] [--delay=ms] - Register a command
//!   crtsync remove <name>                                 - Remove a command
//!   crtsync list                                          - Show the index
//!   crtsync sync                                          - Copy the store to the Pi

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::commands::{self, AppContext};
use cli::{Cli, Commands};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("crtsync={}", log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Keys = cli.command {
        return commands::keys();
    }

    let ctx = AppContext::load(cli.config.as_deref(), cli.store)?;
    tracing::debug!("Using store {}", ctx.store.root().display());

    match cli.command {
        Commands::Init { keyfile, force } => commands::init(&ctx, &keyfile, force),
        Commands::Add {
            name,
            file,
            key,
            looped,
            delay,
        } => commands::add(&ctx, name, file, &key, looped, delay),
        Commands::Remove { name } => commands::remove(&ctx, &name),
        Commands::List => commands::list(&ctx),
        Commands::Sync { dry_run } => commands::sync(&ctx, dry_run),
        Commands::Keys => commands::keys(),
    }
}
