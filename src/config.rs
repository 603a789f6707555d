//! Config module - Manages crtsync configuration (crtsync.toml).
//!
//! Configuration file contains:
//! - Store path
//! - Remote host settings (host, port, user, destination folder)
//! - Host key policy

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// How the Pi's host key is verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HostKeyPolicy {
    /// Accept any host key without checking
    Insecure,
    /// Pin the key on first connection, reject changes afterwards
    #[default]
    AcceptNew,
    /// Key must already be pinned in the store's known_hosts
    Strict,
}

impl HostKeyPolicy {
    /// Value for ssh's `StrictHostKeyChecking` option.
    pub fn strict_host_key_checking(&self) -> &'static str {
        match self {
            Self::Insecure => "no",
            Self::AcceptNew => "accept-new",
            Self::Strict => "yes",
        }
    }
}

impl fmt::Display for HostKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Insecure => "insecure",
            Self::AcceptNew => "accept-new",
            Self::Strict => "strict",
        })
    }
}

/// Where the store is copied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_user")]
    pub user: String,
    /// Destination folder on the Pi
    #[serde(default = "default_remote_path")]
    pub path: String,
    #[serde(default)]
    pub host_key_policy: HostKeyPolicy,
}

fn default_host() -> String {
    "raspberrypi".to_string()
}

fn default_port() -> u16 {
    22
}

fn default_user() -> String {
    "pi".to_string()
}

fn default_remote_path() -> String {
    "/home/pi/Documents/Scripts/CRT/store".to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            path: default_remote_path(),
            host_key_policy: HostKeyPolicy::default(),
        }
    }
}

impl RemoteConfig {
    /// `user@host` target for scp.
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}

/// Main crtsync configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the local store directory
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    #[serde(default)]
    pub remote: RemoteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            remote: RemoteConfig::default(),
        }
    }
}

/// Get default store path.
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("crtsync").join("store"))
        .unwrap_or_else(|| PathBuf::from("./store"))
}

/// Get default config file path (~/.config/crtsync/crtsync.toml).
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("crtsync"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crtsync.toml")
}

impl Config {
    /// Load config from file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Cannot parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from `path`, or the default location. A missing file yields defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let path = default_config_path();
                if path.exists() {
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save config to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).with_context(|| "Cannot serialize config to TOML")?;

        std::fs::write(path, content)
            .with_context(|| format!("Cannot write config file: {}", path.display()))?;

        Ok(())
    }
}
