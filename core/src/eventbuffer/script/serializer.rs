//! Event buffer → command stream
//!
//! Converts buffer contents into commands the host's scripting surface
//! accepts, re-based on the race start and quantized to the 10ms tick grid.

use super::ast::{Command, CommandAction, TimeNotation};
use crate::config::ExportConfig;
use crate::eventbuffer::buffer::EventBuffer;
use crate::eventbuffer::error::EventBufferError;
use crate::eventbuffer::event::RACE_RUNNING_STORED_TIME;
use crate::eventbuffer::names::Channel;

/// Start time used when the buffer holds no race-start marker
pub const DEFAULT_START_TIME: u32 = RACE_RUNNING_STORED_TIME;

/// Length of one simulation tick in milliseconds
pub const TICK_MS: i64 = 10;

/// Command time of an event stored at `stored`, relative to `start_time`.
///
/// `ceil((stored - start_time - 10) / 10) * 10`
pub fn export_time(stored: u32, start_time: u32) -> i64 {
    let offset = stored as i64 - start_time as i64 - TICK_MS;
    let ticks = offset.div_euclid(TICK_MS) + i64::from(offset.rem_euclid(TICK_MS) != 0);
    ticks * TICK_MS
}

impl EventBuffer {
    /// Stored time of the race-start marker.
    ///
    /// Uses the first match of a name search (the most recently added
    /// marker). Falls back to [`DEFAULT_START_TIME`] when there is none or the
    /// name is not in the table.
    pub fn race_start_time(&self) -> u32 {
        let Ok(index) = self.names().index_of(&self.names().reserved().race_start) else {
            return DEFAULT_START_TIME;
        };
        self.iter()
            .rev()
            .find(|ev| ev.name_index() == index)
            .map_or(DEFAULT_START_TIME, |ev| ev.time)
    }

    /// Commands for the events of this buffer.
    ///
    /// Unless `all_events` is set, only events from the race start up to
    /// (excluding) the finish line are converted.
    pub fn to_commands(&self, all_events: bool) -> Result<Vec<Command>, EventBufferError> {
        let mut sorted = self.events().to_vec();
        sorted.sort_by_key(|ev| ev.time);

        let start_time = self.race_start_time();
        let mut commands = Vec::new();

        for ev in &sorted {
            let channel = self.names().channel(ev.name_index())?;
            if !all_events {
                if ev.time < start_time {
                    continue;
                }
                if channel == Channel::Finish {
                    break;
                }
            }

            let action = match channel {
                Channel::Digital(action) if ev.binary_value() => CommandAction::Press(action),
                Channel::Digital(action) if action.is_transient() => continue,
                Channel::Digital(action) => CommandAction::Release(action),
                Channel::Gas => CommandAction::Gas(ev.analog_value()),
                Channel::Steer => CommandAction::Steer(ev.analog_value()),
                Channel::Marker | Channel::Finish | Channel::Other => continue,
            };
            commands.push(Command::new(export_time(ev.time, start_time), action));
        }

        Ok(commands)
    }

    /// Command stream text, one newline-terminated command per line
    pub fn to_commands_str(&self, all_events: bool) -> Result<String, EventBufferError> {
        self.to_commands_with(&ExportConfig {
            all_events,
            time_notation: TimeNotation::Milliseconds,
        })
    }

    /// Command stream text with explicit export settings
    pub fn to_commands_with(&self, config: &ExportConfig) -> Result<String, EventBufferError> {
        let commands = self.to_commands(config.all_events)?;
        let mut out = String::new();
        for command in &commands {
            out.push_str(&command.render(config.time_notation));
            out.push('\n');
        }
        tracing::debug!(commands = commands.len(), "exported command stream");
        Ok(out)
    }
}
