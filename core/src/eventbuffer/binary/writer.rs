//! Binary event buffer writer

use byteorder::{LittleEndian, WriteBytesExt};
use lz4_flex::compress_prepend_size;
use std::io::{self, Write};

use super::{BufferFlags, MAGIC};
use crate::eventbuffer::buffer::EventBuffer;
use crate::eventbuffer::event::{EVENT_SIZE, Event};

/// Writer for the binary buffer format
pub struct BufferWriter<W: Write> {
    writer: W,
}

impl<W: Write> BufferWriter<W> {
    /// Create a new buffer writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a complete buffer.
    ///
    /// Fails with `InvalidInput` before writing anything if a record
    /// references a name index past the table.
    pub fn write_buffer(&mut self, buffer: &EventBuffer, flags: BufferFlags) -> io::Result<()> {
        let name_count = buffer.names().len();
        if let Some(stray) = buffer
            .iter()
            .find(|ev| ev.name_index() as usize >= name_count)
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "event at stored time {} references name index {} of {}",
                    stray.time,
                    stray.name_index(),
                    name_count
                ),
            ));
        }

        self.write_header(buffer.events_duration, flags)?;
        self.write_names(buffer.names().names())?;
        self.write_events(buffer.events(), flags)?;
        Ok(())
    }

    /// Write the 12-byte header
    fn write_header(&mut self, events_duration: u32, flags: BufferFlags) -> io::Result<()> {
        self.writer.write_all(&MAGIC)?;
        self.writer.write_u8(flags.bits())?;
        self.writer.write_all(&[0u8; 3])?;
        self.writer.write_u32::<LittleEndian>(events_duration)?;
        Ok(())
    }

    fn write_names(&mut self, names: &[String]) -> io::Result<()> {
        self.writer.write_u16::<LittleEndian>(names.len() as u16)?;
        for name in names {
            let len = u16::try_from(name.len()).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("event name too long: {}", name),
                )
            })?;
            self.writer.write_u16::<LittleEndian>(len)?;
            self.writer.write_all(name.as_bytes())?;
        }
        Ok(())
    }

    fn write_events(&mut self, events: &[Event], flags: BufferFlags) -> io::Result<()> {
        let count = u32::try_from(events.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many events"))?;
        self.writer.write_u32::<LittleEndian>(count)?;

        let mut block = Vec::with_capacity(events.len() * EVENT_SIZE);
        for event in events {
            block.write_u32::<LittleEndian>(event.time)?;
            block.write_u32::<LittleEndian>(event.input_data)?;
        }

        if flags.contains(BufferFlags::COMPRESSED) {
            let compressed = compress_prepend_size(&block);
            self.writer.write_u32::<LittleEndian>(compressed.len() as u32)?;
            self.writer.write_all(&compressed)?;
        } else {
            self.writer.write_all(&block)?;
        }

        Ok(())
    }

    /// Consume the writer and return the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}
