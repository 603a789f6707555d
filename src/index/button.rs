//! Remote-control buttons that a command can be bound to.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A button on the CRT's IR remote.
///
/// Serialized as the identifier the receiver on the Pi reports
/// (`"volumeup"`, `"7"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Button {
    PowerOn,
    PowerOff,
    VolumeUp,
    Stop,
    Previous,
    PlayPause,
    Next,
    Down,
    VolumeDown,
    Up,
    Equal,
    Start,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Digit0,
}

impl Button {
    /// Every button, in the order the remote lists them.
    pub const ALL: [Button; 22] = [
        Button::PowerOn,
        Button::PowerOff,
        Button::VolumeUp,
        Button::Stop,
        Button::Previous,
        Button::PlayPause,
        Button::Next,
        Button::Down,
        Button::VolumeDown,
        Button::Up,
        Button::Equal,
        Button::Start,
        Button::Digit1,
        Button::Digit2,
        Button::Digit3,
        Button::Digit4,
        Button::Digit5,
        Button::Digit6,
        Button::Digit7,
        Button::Digit8,
        Button::Digit9,
        Button::Digit0,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Button::PowerOn => "poweron",
            Button::PowerOff => "poweroff",
            Button::VolumeUp => "volumeup",
            Button::Stop => "stop",
            Button::Previous => "previous",
            Button::PlayPause => "playpause",
            Button::Next => "next",
            Button::Down => "down",
            Button::VolumeDown => "volumedown",
            Button::Up => "up",
            Button::Equal => "equal",
            Button::Start => "start",
            Button::Digit1 => "1",
            Button::Digit2 => "2",
            Button::Digit3 => "3",
            Button::Digit4 => "4",
            Button::Digit5 => "5",
            Button::Digit6 => "6",
            Button::Digit7 => "7",
            Button::Digit8 => "8",
            Button::Digit9 => "9",
            Button::Digit0 => "0",
        }
    }

    /// Identifiers of all buttons.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|b| b.as_str()).collect()
    }
}

impl FromStr for Button {
    type Err = Error;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.as_str() == wanted)
            .ok_or_else(|| Error::InvalidKey(s.to_string()))
    }
}

impl TryFrom<String> for Button {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Button> for &'static str {
    fn from(button: Button) -> Self {
        button.as_str()
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
