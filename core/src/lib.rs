//! TMInput Core - Host input event buffers
//!
//! This crate models the packed input event buffer a race-simulation host
//! records during a run, and converts it to and from the host's line-based
//! command format.
//!
//! # Architecture
//!
//! - [`EventBuffer`] - Recorded events over a per-buffer name table
//! - [`NameTable`] - Event names and the channel role of each index
//! - [`Compiler`] - Command stream back into an event buffer
//! - [`Config`] - Reserved event names and export settings

pub mod config;
pub mod eventbuffer;
#[cfg(test)]
pub mod test_utils;

// Re-export core types
pub use eventbuffer::{
    Action, AnalogCodec, Channel, Event, EventBuffer, EventBufferError, EventFilter, EventKind,
    EventValue, HostAnalogCodec, NameTable,
};

// Re-export script types
pub use eventbuffer::{Command, CommandAction, CommandParseError, Compiler, TimeNotation};

// Re-export configuration
pub use config::{Config, ConfigError, ExportConfig, ReservedNames};
