//! Sync module - Copy the store to the Pi.
//!
//! This module contains:
//! - SyncPlan: which local file goes where on the remote
//! - Transport trait for abstraction
//! - Scp transport (wraps the system scp client)

pub mod scp;
pub mod transport;

pub use scp::ScpTransport;
pub use transport::{PushReport, Transport};

use crate::error::Result;
use crate::index::Index;
use crate::store::{Store, INDEX_FILE};
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// One file to copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Path relative to the store, as shown to the user
    pub label: String,
    pub local: PathBuf,
    /// Absolute path on the remote
    pub remote: String,
}

impl Transfer {
    /// Directory on the remote that receives this file.
    pub fn remote_dir(&self) -> &str {
        self.remote
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or("")
    }
}

/// Ordered list of transfers: the index first, then every command's file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    transfers: Vec<Transfer>,
}

impl SyncPlan {
    /// Build the plan. Fails before anything is copied if a referenced file
    /// is missing from the store.
    pub fn build(store: &Store, index: &Index, remote_root: &str) -> Result<Self> {
        store.preflight(index)?;

        let remote_root = remote_root.trim_end_matches('/');
        let mut transfers = vec![Transfer {
            label: INDEX_FILE.to_string(),
            local: store.index_path(),
            remote: remote_path(remote_root, INDEX_FILE),
        }];

        for command in index {
            transfers.push(Transfer {
                label: command.file.clone(),
                local: store.media_path(&command.file),
                remote: remote_path(remote_root, &command.file),
            });
        }

        Ok(Self { transfers })
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Transfers grouped by remote directory, in order of first appearance.
    pub fn groups(&self) -> Vec<(&str, Vec<&Transfer>)> {
        let mut groups: Vec<(&str, Vec<&Transfer>)> = Vec::new();
        for transfer in &self.transfers {
            let dir = transfer.remote_dir();
            match groups.iter_mut().find(|(d, _)| *d == dir) {
                Some((_, members)) => members.push(transfer),
                None => groups.push((dir, vec![transfer])),
            }
        }
        groups
    }
}

/// Join a store-relative path onto the remote root with `/` separators.
fn remote_path(remote_root: &str, relative: &str) -> String {
    let parts: Vec<String> = Path::new(relative)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    format!("{}/{}", remote_root, parts.join("/"))
}

/// Preflight the store and push everything through `transport`.
pub fn sync(
    store: &Store,
    index: &Index,
    remote_root: &str,
    transport: &dyn Transport,
) -> Result<PushReport> {
    let plan = SyncPlan::build(store, index, remote_root)?;
    info!(
        "Pushing {} file(s) via {} to {}",
        plan.len(),
        transport.name(),
        remote_root
    );
    transport.push(&plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::index::{Button, Command};
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    const REMOTE: &str = "/home/pi/Documents/Scripts/CRT/store";

    #[derive(Default)]
    struct RecordingTransport {
        pushed: RefCell<Vec<String>>,
    }

    impl Transport for RecordingTransport {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn push(&self, plan: &SyncPlan) -> Result<PushReport> {
            let mut pushed = self.pushed.borrow_mut();
            for t in plan.transfers() {
                pushed.push(t.remote.clone());
            }
            Ok(PushReport {
                files_pushed: plan.len(),
                sessions: plan.groups().len(),
            })
        }
    }

    fn store_with(files: &[&str]) -> anyhow::Result<(TempDir, Store)> {
        let temp = TempDir::new()?;
        let key = temp.path().join("key");
        fs::write(&key, "key")?;
        let store = Store::open(temp.path().join("store"));
        store.init(&key, false)?;
        for file in files {
            let path = store.media_path(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, b"GIF89a")?;
        }
        Ok((temp, store))
    }

    #[test]
    fn test_plan_order_and_remote_paths() -> anyhow::Result<()> {
        let (_temp, store) = store_with(&["pulse.gif", "anims/wave.gif"])?;
        let mut index = Index::new();
        index.add(Command::new("Pulse", "pulse.gif", Button::Up))?;
        index.add(Command::new("Wave", "anims/wave.gif", Button::Down))?;

        let plan = SyncPlan::build(&store, &index, &format!("{REMOTE}/"))?;
        let remotes: Vec<&str> = plan.transfers().iter().map(|t| t.remote.as_str()).collect();
        assert_eq!(
            remotes,
            [
                format!("{REMOTE}/index.json"),
                format!("{REMOTE}/pulse.gif"),
                format!("{REMOTE}/anims/wave.gif"),
            ]
        );
        assert_eq!(plan.transfers()[0].local, store.index_path());
        Ok(())
    }

    #[test]
    fn test_groups_by_remote_dir() -> anyhow::Result<()> {
        let (_temp, store) = store_with(&["a.gif", "anims/b.gif", "c.gif"])?;
        let mut index = Index::new();
        index.add(Command::new("A", "a.gif", Button::Digit1))?;
        index.add(Command::new("B", "anims/b.gif", Button::Digit2))?;
        index.add(Command::new("C", "./c.gif", Button::Digit3))?;

        let plan = SyncPlan::build(&store, &index, REMOTE)?;
        let groups = plan.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, REMOTE);
        let labels: Vec<&str> = groups[0].1.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["index.json", "a.gif", "./c.gif"]);
        assert_eq!(groups[1].0, format!("{REMOTE}/anims"));
        Ok(())
    }

    #[test]
    fn test_sync_pushes_everything() -> anyhow::Result<()> {
        let (_temp, store) = store_with(&["pulse.gif"])?;
        let mut index = Index::new();
        index.add(Command::new("Pulse", "pulse.gif", Button::Up))?;

        let transport = RecordingTransport::default();
        let report = sync(&store, &index, REMOTE, &transport)?;
        assert_eq!(report.files_pushed, 2);
        assert_eq!(report.sessions, 1);
        assert_eq!(transport.pushed.borrow().len(), 2);
        Ok(())
    }

    #[test]
    fn test_sync_aborts_on_missing_file() -> anyhow::Result<()> {
        let (_temp, store) = store_with(&["pulse.gif"])?;
        let mut index = Index::new();
        index.add(Command::new("Pulse", "pulse.gif", Button::Up))?;
        index.add(Command::new("Ghost", "ghost.gif", Button::Stop))?;

        let transport = RecordingTransport::default();
        let err = sync(&store, &index, REMOTE, &transport).unwrap_err();
        assert!(matches!(err, Error::MissingFile { ref name, .. } if name == "Ghost"));
        assert!(transport.pushed.borrow().is_empty());
        Ok(())
    }

    #[test]
    fn test_empty_index_still_pushes_index_file() -> anyhow::Result<()> {
        let (_temp, store) = store_with(&[])?;
        let plan = SyncPlan::build(&store, &Index::new(), REMOTE)?;
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.transfers()[0].label, "index.json");
        Ok(())
    }
}
