//! Shared test utilities for unit tests

use crate::eventbuffer::{EventBuffer, NameTable};

/// Event names in the order the host lists them for a typical replay
pub const HOST_NAMES: [&str; 11] = [
    "_FakeIsRaceRunning",
    "_FakeFinishLine",
    "Accelerate",
    "Brake",
    "SteerLeft",
    "SteerRight",
    "Steer",
    "Gas",
    "Respawn",
    "Horn",
    "_FakeDontInverseAxis",
];

/// Name table with the host's default names
pub fn host_names() -> NameTable {
    NameTable::new(HOST_NAMES).unwrap()
}

/// Empty buffer (no race-running marker) over the host names
pub fn empty_buffer() -> EventBuffer {
    EventBuffer::new(0, host_names())
}

/// Cleared buffer holding only the race-running marker
pub fn cleared_buffer() -> EventBuffer {
    let mut buffer = empty_buffer();
    buffer.clear().unwrap();
    buffer
}
