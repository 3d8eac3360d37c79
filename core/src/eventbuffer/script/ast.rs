//! Command stream types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::eventbuffer::names::Action;

/// One line of a command stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Time in milliseconds relative to the race start (may be negative)
    pub time: i64,
    /// What happens at `time`
    pub action: CommandAction,
}

/// Instruction carried by a [`Command`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// `press <action>`
    Press(Action),
    /// `rel <action>`
    Release(Action),
    /// `gas <value>`
    Gas(i32),
    /// `steer <value>`
    Steer(i32),
}

/// How command timestamps are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeNotation {
    /// Integer milliseconds: `12340`
    #[default]
    Milliseconds,
    /// `[h:][m:]s.cc`: `12.34`, `1:2.5`
    Decimal,
}

impl Command {
    pub fn new(time: i64, action: CommandAction) -> Self {
        Self { time, action }
    }

    /// Render the command with the given time notation
    pub fn render(&self, notation: TimeNotation) -> String {
        format!("{} {}", format_time(self.time, notation), self.action)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time, self.action)
    }
}

impl fmt::Display for CommandAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandAction::Press(action) => write!(f, "press {}", action.keyword()),
            CommandAction::Release(action) => write!(f, "rel {}", action.keyword()),
            CommandAction::Gas(value) => write!(f, "gas {}", value),
            CommandAction::Steer(value) => write!(f, "steer {}", value),
        }
    }
}

/// Format a millisecond timestamp.
///
/// Decimal notation truncates to centiseconds. Negative times have no
/// decimal form and are always written in milliseconds.
pub fn format_time(time: i64, notation: TimeNotation) -> String {
    match notation {
        TimeNotation::Milliseconds => time.to_string(),
        TimeNotation::Decimal if time < 0 => time.to_string(),
        TimeNotation::Decimal => {
            let t = time / 10;
            let (h, m, s, c) = (t / 360_000, t / 6000 % 60, t / 100 % 60, t % 100);

            let fraction = if c % 10 == 0 {
                format!(".{}", c / 10)
            } else {
                format!(".{:02}", c)
            };
            let minutes = if h > 0 || m > 0 {
                format!("{}:", m)
            } else {
                String::new()
            };
            let hours = if h > 0 {
                format!("{}:", h)
            } else {
                String::new()
            };

            format!("{}{}{}{}", hours, minutes, s, fraction)
        }
    }
}
