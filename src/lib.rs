//! crtsync Library
//!
//! Manages the index of animations and pictures shown on a Raspberry Pi CRT
//! matrix and copies the store to the Pi.
//! Provides the following capabilities:
//! - Index of commands mapping remote-control buttons to media files
//! - Store directory with atomic index writes and preflight checks
//! - ASCII table rendering of the index
//! - Sync to the Pi over scp

pub mod config;
pub mod error;
pub mod index;
pub mod store;
pub mod sync;
pub mod table;

// Re-export main types
pub use config::{Config, HostKeyPolicy, RemoteConfig};
pub use error::{Error, Result};
pub use index::{Button, Command, Index};
pub use store::Store;
pub use sync::{PushReport, ScpTransport, SyncPlan, Transport};
