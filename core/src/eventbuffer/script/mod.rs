//! Command stream format
//!
//! The host's scripting surface accepts one instruction per line:
//!
//! ```text
//! 0 press up
//! 10 steer -65536
//! 20 gas 30000
//! 1520 rel up
//! ```
//!
//! Each line is a millisecond timestamp relative to the race start (possibly
//! negative), a keyword (`press`, `rel`, `gas`, `steer`) and its argument: an
//! action keyword for `press`/`rel`, a magnitude in [-65536, 65536] for
//! `gas`/`steer`. Timestamps may also be written in decimal notation
//! (`12.34`, `1:2.5`).
//!
//! - **Serializer**: event buffer → commands ([`EventBuffer::to_commands_str`])
//! - **Parser**: text → commands ([`parse_commands`])
//! - **Compiler**: commands → event buffer ([`Compiler`])
//!
//! [`EventBuffer::to_commands_str`]: crate::EventBuffer::to_commands_str

mod ast;
mod compiler;
mod parser;
mod serializer;

pub use ast::{Command, CommandAction, TimeNotation, format_time};
pub use compiler::Compiler;
pub use parser::{CommandParseError, parse_commands, parse_time};
pub use serializer::{DEFAULT_START_TIME, TICK_MS, export_time};
