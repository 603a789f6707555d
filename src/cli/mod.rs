//! CLI definitions and command implementations for crtsync.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// crtsync - sync and render animations and pictures on a Raspberry Pi matrix
#[derive(Parser)]
#[command(name = "crtsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Store directory (overrides the config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Config file (default: ~/.config/crtsync/crtsync.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the store folder with a given ssh key
    Init {
        /// Path to the private ssh key
        keyfile: PathBuf,

        /// Reset an index that already has commands
        #[arg(long)]
        force: bool,
    },

    /// Add a command to the index
    Add {
        /// Unique name of the command
        name: String,

        /// Media file, relative to the store
        file: String,

        /// Remote-control button (see `crtsync keys`)
        key: String,

        /// Loop the animation
        #[arg(long = "loop")]
        looped: bool,

        /// Delay between loops in milliseconds
        #[arg(long, default_value_t = 0, value_name = "MS")]
        delay: u64,
    },

    /// Remove a command from the index
    #[command(visible_alias = "rm")]
    Remove {
        /// Name of the command
        name: String,
    },

    /// List all registered commands
    List,

    /// Sync the store to the Raspberry Pi
    Sync {
        /// Show what would be copied without connecting
        #[arg(long)]
        dry_run: bool,
    },

    /// List valid remote-control buttons
    Keys,
}
