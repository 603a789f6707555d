//! Index module - The ordered list of commands stored in `index.json`.
//!
//! Each command maps a remote-control button to a media file in the store.
//! Names and buttons are unique across the index; order is insertion order.

pub mod button;

pub use button::Button;

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Component, Path};
use tracing::warn;

/// One registered command.
///
/// Field names on disk match what the renderer on the Pi reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    #[serde(rename = "Name")]
    pub name: String,
    /// Path of the media file, relative to the store
    #[serde(rename = "Filename")]
    pub file: String,
    #[serde(rename = "Key")]
    pub key: Button,
    #[serde(rename = "Loop", default)]
    pub looped: bool,
    /// Delay between loop iterations in milliseconds
    #[serde(rename = "LoopDelay", default, deserialize_with = "loop_delay_from_legacy")]
    pub loop_delay: u64,
}

/// Older indexes stored the delay as a signed int; negative means no delay.
fn loop_delay_from_legacy<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(u64::try_from(raw).unwrap_or_else(|_| {
        warn!("Negative LoopDelay {} in index, using 0", raw);
        0
    }))
}

impl Command {
    pub fn new(name: impl Into<String>, file: impl Into<String>, key: Button) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            key,
            looped: false,
            loop_delay: 0,
        }
    }

    pub fn with_loop(mut self, looped: bool, loop_delay: u64) -> Self {
        self.looped = looped;
        self.loop_delay = loop_delay;
        self
    }
}

/// Ordered collection of commands.
///
/// Deserializing goes through [`Index::add`], so a loaded index holds the
/// same invariants as one built in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Command>", into = "Vec<Command>")]
pub struct Index {
    commands: Vec<Command>,
}

impl TryFrom<Vec<Command>> for Index {
    type Error = Error;

    fn try_from(commands: Vec<Command>) -> Result<Self> {
        let mut index = Index::new();
        for command in commands {
            index.add(command)?;
        }
        Ok(index)
    }
}

impl From<Index> for Vec<Command> {
    fn from(index: Index) -> Self {
        index.commands
    }
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a command. The index is untouched on error.
    pub fn add(&mut self, command: Command) -> Result<()> {
        if command.name.trim().is_empty() {
            return Err(Error::EmptyName);
        }
        validate_file_reference(&command.file)?;

        if self.get(&command.name).is_some() {
            return Err(Error::DuplicateName(command.name));
        }
        if let Some(owner) = self.commands.iter().find(|c| c.key == command.key) {
            return Err(Error::DuplicateKey {
                key: command.key.to_string(),
                owner: owner.name.clone(),
            });
        }

        self.commands.push(command);
        Ok(())
    }

    /// Remove the command with the given name and return it.
    pub fn remove(&mut self, name: &str) -> Result<Command> {
        let pos = self
            .commands
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        Ok(self.commands.remove(pos))
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A file reference must be a non-empty relative path that stays in the store.
fn validate_file_reference(file: &str) -> Result<()> {
    let path = Path::new(file);
    let inside_store = !file.trim().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && path.components().any(|c| matches!(c, Component::Normal(_)));

    if inside_store {
        Ok(())
    } else {
        Err(Error::InvalidFile(file.to_string()))
    }
}
