//! Host input event buffer
//!
//! The simulation host records every input as an 8-byte [`Event`]: a stored
//! timestamp and a packed `[name_index:8][payload:24]` word. The name index
//! refers to a per-buffer [`NameTable`]; the payload is a boolean for binary
//! inputs and a 24-bit analog value for gas and steering.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      EventBuffer                         │
//! │ names ─► NameTable (index ⇄ name, channel roles)         │
//! │ events ─► Vec<Event> (stored time, packed input data)    │
//! └──────────────────────────────────────────────────────────┘
//!        │                    │                     │
//!        ▼                    ▼                     ▼
//!   add / sort / clear     find (query)       to_commands (script)
//!                                                  │
//!                                                  ▼
//!                          "0 press up" ◄─► parse_commands / Compiler
//!
//!   save / load (binary, .tmeb)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use tminput_core::eventbuffer::{EventBuffer, NameTable};
//!
//! let names = NameTable::new(["_FakeIsRaceRunning", "Accelerate", "Steer"])?;
//! let mut buffer = EventBuffer::new(0, names);
//! buffer.clear()?;
//! buffer.add(0, "Accelerate", true)?;
//! buffer.add(10, "Steer", -65536)?;
//! buffer.sort();
//!
//! print!("{}", buffer.to_commands_str(false)?);
//! ```

pub mod analog;
pub mod binary;
pub mod buffer;
pub mod error;
pub mod event;
pub mod names;
pub mod query;
pub mod script;

// Re-export core types
pub use analog::{
    ANALOG_MAX, ANALOG_MIN, AnalogCodec, HostAnalogCodec, PAYLOAD_MASK, is_valid_analog,
};
pub use buffer::{EventBuffer, EventValue};
pub use error::EventBufferError;
pub use event::{
    EVENT_SIZE, Event, RACE_RUNNING_STORED_TIME, STORED_TIME_OFFSET, to_stored_time,
    to_zero_based_time,
};
pub use names::{Action, Channel, EventKind, MAX_NAMES, NameTable};
pub use query::EventFilter;

// Re-export binary format
pub use binary::{BufferFlags, BufferReader, BufferWriter};

// Re-export script format
pub use script::{
    Command, CommandAction, CommandParseError, Compiler, DEFAULT_START_TIME, TICK_MS,
    TimeNotation, export_time, format_time, parse_commands, parse_time,
};
