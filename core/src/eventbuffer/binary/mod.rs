//! Binary event buffer file (.tmeb)
//!
//! Stores a buffer together with its name table so it can be handed back to
//! the host unchanged. The event block may be LZ4 compressed.
//!
//! # File Structure
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ Header (12 bytes)                              │
//! │ ├─ magic: "TMEB"                               │
//! │ ├─ flags: u8                                   │
//! │ ├─ reserved: [u8; 3]                           │
//! │ └─ events_duration: u32                        │
//! ├────────────────────────────────────────────────┤
//! │ Name table                                     │
//! │ ├─ name_count: u16                             │
//! │ └─ (len: u16, utf-8 bytes) × name_count        │
//! ├────────────────────────────────────────────────┤
//! │ Events                                         │
//! │ ├─ event_count: u32                            │
//! │ └─ (time: u32, input_data: u32) × event_count  │
//! │    (LZ4, size-prepended, if COMPRESSED)        │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! All integers are little-endian.

mod reader;
mod writer;

pub use reader::BufferReader;
pub use writer::BufferWriter;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::config::ReservedNames;
use crate::eventbuffer::buffer::EventBuffer;

/// File magic
pub const MAGIC: [u8; 4] = *b"TMEB";

bitflags::bitflags! {
    /// Buffer file flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BufferFlags: u8 {
        /// Event block is LZ4 compressed
        const COMPRESSED = 0b0000_0001;
    }
}

impl EventBuffer {
    /// Write the buffer to `path`
    pub fn save(&self, path: &Path, flags: BufferFlags) -> io::Result<()> {
        let mut writer = BufferWriter::new(BufWriter::new(File::create(path)?));
        writer.write_buffer(self, flags)?;
        writer.into_inner().flush()?;
        tracing::info!(path = %path.display(), events = self.len(), "saved event buffer");
        Ok(())
    }

    /// Read a buffer from `path`, resolving roles against `reserved`
    pub fn load(path: &Path, reserved: &ReservedNames) -> io::Result<Self> {
        let buffer = BufferReader::new(BufReader::new(File::open(path)?)).read_buffer(reserved)?;
        tracing::info!(path = %path.display(), events = buffer.len(), "loaded event buffer");
        Ok(buffer)
    }
}
