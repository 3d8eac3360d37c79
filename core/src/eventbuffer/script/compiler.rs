//! Command stream compiler
//!
//! Builds an event buffer from parsed commands. Command time `t` becomes
//! zero-based time `t`, so compiling the output of
//! [`EventBuffer::to_commands`] yields a buffer that exports the same
//! commands again.

use super::ast::{Command, CommandAction};
use crate::eventbuffer::buffer::{EventBuffer, EventValue};
use crate::eventbuffer::error::EventBufferError;
use crate::eventbuffer::names::NameTable;

/// Command compiler bound to one name table
#[derive(Debug, Clone)]
pub struct Compiler {
    names: NameTable,
}

impl Compiler {
    /// Create a compiler producing buffers over `names`
    pub fn new(names: NameTable) -> Self {
        Self { names }
    }

    /// Compile commands into a cleared, sorted buffer.
    ///
    /// `events_duration` is set to the last command time.
    pub fn compile(&self, commands: &[Command]) -> Result<EventBuffer, EventBufferError> {
        let duration = commands.iter().map(|c| c.time).max().unwrap_or(0);
        let mut buffer =
            EventBuffer::new(u32::try_from(duration).unwrap_or(0), self.names.clone());
        buffer.clear()?;

        let reserved = self.names.reserved();
        for command in commands {
            let (name, value) = match command.action {
                CommandAction::Press(action) => {
                    (action.event_name(reserved), EventValue::Binary(true))
                }
                CommandAction::Release(action) => {
                    (action.event_name(reserved), EventValue::Binary(false))
                }
                CommandAction::Gas(v) => (&reserved.analog_accelerate[..], EventValue::Analog(v)),
                CommandAction::Steer(v) => (&reserved.analog_steer[..], EventValue::Analog(v)),
            };
            buffer.add(command.time, name, value)?;
        }

        buffer.sort();
        tracing::debug!(
            commands = commands.len(),
            events = buffer.len(),
            "compiled command stream"
        );
        Ok(buffer)
    }
}

impl EventBuffer {
    /// Build a buffer over `names` from a command list
    pub fn from_commands(names: NameTable, commands: &[Command]) -> Result<Self, EventBufferError> {
        Compiler::new(names).compile(commands)
    }
}
