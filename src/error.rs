//! Error types for index, store and transfer operations.

use std::path::PathBuf;

/// Errors raised by the crtsync library.
///
/// The CLI wraps these in `anyhow::Error` and adds context where useful.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid key '{0}'. valid keys are: {valid}", valid = crate::index::Button::names().join(", "))]
    InvalidKey(String),

    #[error("name must not be empty")]
    EmptyName,

    #[error("a command named '{0}' already exists")]
    DuplicateName(String),

    #[error("key '{key}' is already bound to '{owner}'")]
    DuplicateKey { key: String, owner: String },

    #[error("invalid file reference '{0}': must be a relative path inside the store")]
    InvalidFile(String),

    #[error("no command named '{0}' exists. use `crtsync list` to see registered commands")]
    NotFound(String),

    #[error("store not initialized at {}. please run `crtsync init <keyfile>`", .0.display())]
    StoreMissing(PathBuf),

    #[error("key file does not exist: {}", .0.display())]
    KeyFileMissing(PathBuf),

    #[error("index at {} is not empty. use --force to reset it", .0.display())]
    IndexNotEmpty(PathBuf),

    #[error("{file} not found for '{name}'")]
    MissingFile { name: String, file: String },

    #[error("cannot parse index file {}: {source}", path.display())]
    CorruptIndex {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("transfer failed: {0}")]
    Transfer(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
