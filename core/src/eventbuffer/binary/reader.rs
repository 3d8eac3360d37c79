//! Binary event buffer reader

use byteorder::{LittleEndian, ReadBytesExt};
use lz4_flex::decompress_size_prepended;
use std::io::{self, Read};

use super::{BufferFlags, MAGIC};
use crate::config::ReservedNames;
use crate::eventbuffer::buffer::EventBuffer;
use crate::eventbuffer::event::{EVENT_SIZE, Event};
use crate::eventbuffer::names::NameTable;

/// Reader for the binary buffer format
pub struct BufferReader<R: Read> {
    reader: R,
}

fn invalid_data(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

impl<R: Read> BufferReader<R> {
    /// Create a new buffer reader
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read a complete buffer, resolving name roles against `reserved`
    pub fn read_buffer(&mut self, reserved: &ReservedNames) -> io::Result<EventBuffer> {
        let (flags, events_duration) = self.read_header()?;

        let names = self.read_names()?;
        let names = NameTable::with_reserved(names, reserved.clone())
            .map_err(|e| invalid_data(e.to_string()))?;

        let events = self.read_events(flags)?;
        if let Some(stray) = events.iter().find(|ev| ev.name_index() as usize >= names.len()) {
            return Err(invalid_data(format!(
                "event at stored time {} references name index {} of {}",
                stray.time,
                stray.name_index(),
                names.len()
            )));
        }

        Ok(EventBuffer::with_events(events_duration, names, events))
    }

    /// Read the 12-byte header
    fn read_header(&mut self) -> io::Result<(BufferFlags, u32)> {
        let mut magic = [0u8; 4];
        self.reader.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(invalid_data("not an event buffer file"));
        }

        let flags = BufferFlags::from_bits_truncate(self.reader.read_u8()?);
        let mut reserved = [0u8; 3];
        self.reader.read_exact(&mut reserved)?;
        let events_duration = self.reader.read_u32::<LittleEndian>()?;

        Ok((flags, events_duration))
    }

    fn read_names(&mut self) -> io::Result<Vec<String>> {
        let count = self.reader.read_u16::<LittleEndian>()? as usize;
        let mut names = Vec::with_capacity(count);

        for _ in 0..count {
            let len = self.reader.read_u16::<LittleEndian>()? as usize;
            let mut bytes = vec![0u8; len];
            self.reader.read_exact(&mut bytes)?;
            let name = String::from_utf8(bytes).map_err(|e| invalid_data(e.to_string()))?;
            names.push(name);
        }

        Ok(names)
    }

    fn read_events(&mut self, flags: BufferFlags) -> io::Result<Vec<Event>> {
        let count = self.reader.read_u32::<LittleEndian>()? as usize;

        let block = if flags.contains(BufferFlags::COMPRESSED) {
            let compressed_len = self.reader.read_u32::<LittleEndian>()? as usize;
            let mut compressed = vec![0u8; compressed_len];
            self.reader.read_exact(&mut compressed)?;
            decompress_size_prepended(&compressed).map_err(|e| invalid_data(e.to_string()))?
        } else {
            let mut block = vec![0u8; count * EVENT_SIZE];
            self.reader.read_exact(&mut block)?;
            block
        };

        if block.len() != count * EVENT_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {} events, got {} bytes", count, block.len()),
            ));
        }

        let mut cursor = block.as_slice();
        let mut events = Vec::with_capacity(count);
        for _ in 0..count {
            let time = cursor.read_u32::<LittleEndian>()?;
            let input_data = cursor.read_u32::<LittleEndian>()?;
            events.push(Event::with_data(time, input_data));
        }

        Ok(events)
    }
}
