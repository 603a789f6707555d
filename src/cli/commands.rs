//! Command implementations for the crtsync CLI.
//!
//! Commands:
//! - init: create the store with a private key and an empty index
//! - add/remove: edit the index
//! - list: print the index as a table
//! - sync: copy the store to the Pi

use crtsync::sync::{self, ScpTransport, SyncPlan, Transport};
use crtsync::{table, Button, Command, Config, Index, Store};
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved configuration and store for one invocation.
pub struct AppContext {
    pub config: Config,
    pub store: Store,
}

impl AppContext {
    /// Load the config file and apply command-line overrides.
    pub fn load(config_path: Option<&Path>, store_override: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::load_or_default(config_path)?;
        if let Some(store_path) = store_override {
            config.store_path = store_path;
        }
        let store = Store::open(config.store_path.clone());
        Ok(Self { config, store })
    }

    fn load_index(&self) -> Result<Index> {
        Ok(self.store.load_index()?)
    }
}

/// Create the store and copy the key into it
pub fn init(ctx: &AppContext, keyfile: &Path, force: bool) -> Result<()> {
    ctx.store
        .init(keyfile, force)
        .with_context(|| format!("Cannot initialize store at {}", ctx.store.root().display()))?;

    println!(
        "  {} Initialized store at {}",
        "✓".green(),
        ctx.store.root().display().to_string().cyan()
    );
    println!(
        "  Copy your media files there, then run {}",
        "crtsync add".cyan()
    );
    Ok(())
}

/// Register a new command
pub fn add(
    ctx: &AppContext,
    name: String,
    file: String,
    key: &str,
    looped: bool,
    delay: u64,
) -> Result<()> {
    let key: Button = key.parse()?;
    let mut index = ctx.load_index()?;

    let command = Command::new(name, file, key).with_loop(looped, delay);
    let media = ctx.store.media_path(&command.file);
    let name = command.name.clone();
    index.add(command)?;
    ctx.store.save_index(&index)?;

    println!(
        "  {} Added \"{}\" to the index. run {} to see the current index",
        "✓".green(),
        name.bold(),
        "crtsync list".cyan()
    );
    if !media.is_file() {
        println!(
            "  {}",
            format!(
                "Note: {} is not in the store yet; sync will fail until it is",
                media.display()
            )
            .yellow()
        );
    }
    Ok(())
}

/// Remove a command by name
pub fn remove(ctx: &AppContext, name: &str) -> Result<()> {
    let mut index = ctx.load_index()?;
    let removed = index.remove(name)?;
    ctx.store.save_index(&index)?;

    println!(
        "  {} Removed \"{}\" from the index. run {} to see the current index",
        "✓".green(),
        removed.name.bold(),
        "crtsync list".cyan()
    );
    Ok(())
}

/// Print the index as a table
pub fn list(ctx: &AppContext) -> Result<()> {
    let index = ctx.load_index()?;
    println!("{}", table::render(&index));
    Ok(())
}

/// Print the valid buttons
pub fn keys() -> Result<()> {
    println!("{}", "Valid keys:".cyan());
    for name in Button::names() {
        println!("  {}", name);
    }
    Ok(())
}

/// Copy index and media files to the Pi
pub fn sync(ctx: &AppContext, dry_run: bool) -> Result<()> {
    let index = ctx.load_index()?;
    let remote = &ctx.config.remote;

    println!(
        "{} {}:{} ({})",
        "Syncing to".cyan().bold(),
        remote.destination(),
        remote.path,
        format!("host keys: {}", remote.host_key_policy).dimmed()
    );

    if dry_run {
        let plan = SyncPlan::build(&ctx.store, &index, &remote.path)?;
        for transfer in plan.transfers() {
            println!("  {} {} -> {}", "→".cyan(), transfer.label, transfer.remote);
        }
        println!(
            "\n{}",
            format!("Dry run: {} file(s) would be copied", plan.len()).yellow()
        );
        return Ok(());
    }

    if !ctx.store.key_path().is_file() {
        anyhow::bail!(
            "Private key missing at {}. please run `crtsync init <keyfile>`",
            ctx.store.key_path().display()
        );
    }

    let transport = ScpTransport::new(
        remote.clone(),
        ctx.store.key_path(),
        ctx.store.known_hosts_path(),
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Copying via {}...", transport.name()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = sync::sync(&ctx.store, &index, &remote.path, &transport);
    spinner.finish_and_clear();
    let report = result.with_context(|| format!("Sync to {} failed", remote.destination()))?;

    for command in &index {
        println!("  {} {}", "copied".green(), command.file);
    }
    println!(
        "\n{} {} file(s) in {} session(s)",
        "✓ Sync complete:".green().bold(),
        report.files_pushed.to_string().cyan(),
        report.sessions
    );
    Ok(())
}
