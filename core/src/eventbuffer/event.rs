//! Packed input event record
//!
//! The host keeps every input as an 8-byte value:
//!
//! ```text
//! ┌──────────────────────────┬────────────────┬──────────────────────────┐
//! │ time: u32 (stored time)  │ name_index: u8 │ payload: u24             │
//! └──────────────────────────┴────────────────┴──────────────────────────┘
//!                            └──────────── input_data: u32 ─────────────┘
//! ```
//!
//! `name_index` points into the buffer's [`NameTable`](super::NameTable).
//! The payload is either binary (nonzero means pressed) or an analog value
//! encoded by an [`AnalogCodec`].

use bytemuck::{Pod, Zeroable};

use super::analog::{AnalogCodec, HostAnalogCodec, PAYLOAD_MASK};
use super::error::EventBufferError;

/// Offset between zero-based race time and stored time.
///
/// Zero-based time 0 is the first tick a player can act on, which the host
/// stores as 100010.
pub const STORED_TIME_OFFSET: i64 = 100_010;

/// Stored time of the race-running marker (zero-based -10)
pub const RACE_RUNNING_STORED_TIME: u32 = 100_000;

/// Size of one record in bytes
pub const EVENT_SIZE: usize = 8;

const NAME_INDEX_SHIFT: u32 = 24;

/// Convert a zero-based time to the host's stored time
pub fn to_stored_time(time: i64) -> Result<u32, EventBufferError> {
    time.checked_add(STORED_TIME_OFFSET)
        .and_then(|stored| u32::try_from(stored).ok())
        .ok_or(EventBufferError::TimeOutOfRange(time))
}

/// Convert a stored time to zero-based time
pub fn to_zero_based_time(stored: u32) -> i64 {
    stored as i64 - STORED_TIME_OFFSET
}

/// One input event, laid out exactly as the host stores it.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Event {
    /// Stored time of the event
    pub time: u32,
    /// `[name_index:8][payload:24]`
    pub input_data: u32,
}

impl Event {
    /// Create an event at `time` (stored) with no name and a zero payload
    pub fn new(time: u32) -> Self {
        Self {
            time,
            input_data: 0,
        }
    }

    /// Create an event from its stored time and raw data word
    pub fn with_data(time: u32, input_data: u32) -> Self {
        Self { time, input_data }
    }

    /// Decode a record from its in-memory byte form
    pub fn from_bytes(bytes: [u8; EVENT_SIZE]) -> Self {
        bytemuck::pod_read_unaligned(&bytes)
    }

    /// In-memory byte form of the record (host byte order)
    pub fn to_bytes(&self) -> [u8; EVENT_SIZE] {
        bytemuck::cast(*self)
    }

    /// Zero-based time of the event
    pub fn zero_based_time(&self) -> i64 {
        to_zero_based_time(self.time)
    }

    /// Index into the buffer's name table
    pub fn name_index(&self) -> u8 {
        (self.input_data >> NAME_INDEX_SHIFT) as u8
    }

    /// Replace the name index, keeping the payload
    pub fn set_name_index(&mut self, index: u8) {
        self.input_data = (self.input_data & PAYLOAD_MASK) | ((index as u32) << NAME_INDEX_SHIFT);
    }

    /// Raw 24-bit payload
    pub fn payload(&self) -> u32 {
        self.input_data & PAYLOAD_MASK
    }

    /// Binary payload; any nonzero payload counts as pressed
    pub fn binary_value(&self) -> bool {
        self.payload() != 0
    }

    /// Write a binary payload (exactly 0 or 1), keeping the name index
    pub fn set_binary_value(&mut self, value: bool) {
        self.input_data = (self.input_data & !PAYLOAD_MASK) | value as u32;
    }

    /// Analog payload decoded with the host codec
    pub fn analog_value(&self) -> i32 {
        self.analog_value_with(&HostAnalogCodec)
    }

    /// Write an analog payload with the host codec, keeping the name index
    pub fn set_analog_value(&mut self, value: i32) {
        self.set_analog_value_with(&HostAnalogCodec, value);
    }

    /// Analog payload decoded with `codec`
    pub fn analog_value_with<C: AnalogCodec + ?Sized>(&self, codec: &C) -> i32 {
        codec.decode(self.payload())
    }

    /// Write an analog payload with `codec`, keeping the name index
    pub fn set_analog_value_with<C: AnalogCodec + ?Sized>(&mut self, codec: &C, value: i32) {
        self.input_data = (self.input_data & !PAYLOAD_MASK) | (codec.encode(value) & PAYLOAD_MASK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eventbuffer::analog::{ANALOG_MAX, ANALOG_MIN};

    #[test]
    fn test_new_has_empty_data() {
        let ev = Event::new(100_010);
        assert_eq!(ev.time, 100_010);
        assert_eq!(ev.input_data, 0);
        assert_eq!(ev.name_index(), 0);
        assert!(!ev.binary_value());
    }

    #[test]
    fn test_with_data_is_verbatim() {
        let ev = Event::with_data(123, 0xDEAD_BEEF);
        assert_eq!(ev.time, 123);
        assert_eq!(ev.input_data, 0xDEAD_BEEF);
        assert_eq!(ev.name_index(), 0xDE);
        assert_eq!(ev.payload(), 0xAD_BEEF);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let ev = Event::with_data(100_250, 0x0380_0000);
        let bytes = ev.to_bytes();
        assert_eq!(bytes.len(), EVENT_SIZE);
        assert_eq!(Event::from_bytes(bytes), ev);
        assert_eq!(std::mem::size_of::<Event>(), EVENT_SIZE);
    }

    #[test]
    fn test_name_index_keeps_payload() {
        let mut ev = Event::with_data(0, 0x00AB_CDEF);
        ev.set_name_index(0x7F);
        assert_eq!(ev.input_data, 0x7FAB_CDEF);
        ev.set_name_index(0xFF);
        assert_eq!(ev.input_data, 0xFFAB_CDEF);
        ev.set_name_index(0);
        assert_eq!(ev.input_data, 0x00AB_CDEF);
    }

    #[test]
    fn test_binary_value_keeps_name_index() {
        let mut ev = Event::with_data(0, 0x0500_0000);
        ev.set_binary_value(true);
        assert_eq!(ev.input_data, 0x0500_0001);
        assert!(ev.binary_value());
        ev.set_binary_value(false);
        assert_eq!(ev.input_data, 0x0500_0000);
        assert!(!ev.binary_value());
    }

    #[test]
    fn test_any_nonzero_payload_is_true() {
        assert!(Event::with_data(0, 0x0000_0002).binary_value());
        assert!(Event::with_data(0, 0x0080_0000).binary_value());
        assert!(!Event::with_data(0, 0xFF00_0000).binary_value());
    }

    #[test]
    fn test_set_binary_overwrites_wide_payload() {
        let mut ev = Event::with_data(0, 0x02FF_FFFF);
        ev.set_binary_value(true);
        assert_eq!(ev.input_data, 0x0200_0001);
    }

    #[test]
    fn test_analog_value_keeps_name_index() {
        let mut ev = Event::new(0);
        ev.set_name_index(9);
        for value in [ANALOG_MIN, -30000, -1, 0, 1, 30000, ANALOG_MAX] {
            ev.set_analog_value(value);
            assert_eq!(ev.analog_value(), value);
            assert_eq!(ev.name_index(), 9);
        }
    }

    #[test]
    fn test_name_index_keeps_analog_value() {
        let mut ev = Event::new(0);
        ev.set_analog_value(-42);
        ev.set_name_index(200);
        assert_eq!(ev.analog_value(), -42);
    }

    #[test]
    fn test_stored_time_conversion() {
        assert_eq!(to_stored_time(0).unwrap(), 100_010);
        assert_eq!(to_stored_time(-10).unwrap(), RACE_RUNNING_STORED_TIME);
        assert_eq!(to_zero_based_time(100_000), -10);
        assert_eq!(Event::new(100_520).zero_based_time(), 510);
        assert_eq!(
            to_stored_time(-200_000),
            Err(EventBufferError::TimeOutOfRange(-200_000))
        );
    }
}
