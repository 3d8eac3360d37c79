//! Event buffer
//!
//! The buffer the host replays while simulating a race. Events are kept in
//! insertion order until [`EventBuffer::sort`] puts them in the host's
//! canonical order: decreasing stored time, so index 0 is the last event of
//! the race.

use super::analog::is_valid_analog;
use super::error::EventBufferError;
use super::event::{Event, to_stored_time};
use super::names::{EventKind, NameTable};

/// Value passed to [`EventBuffer::add`].
///
/// Converted according to the kind of the target name: analog channels read
/// it as a magnitude, every other name as pressed / released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventValue {
    Binary(bool),
    Analog(i32),
}

impl EventValue {
    /// Value as a binary state (nonzero analog counts as pressed)
    pub fn as_binary(self) -> bool {
        match self {
            EventValue::Binary(b) => b,
            EventValue::Analog(v) => v != 0,
        }
    }

    /// Value as an analog magnitude (pressed counts as 1)
    pub fn as_analog(self) -> i32 {
        match self {
            EventValue::Binary(b) => b as i32,
            EventValue::Analog(v) => v,
        }
    }
}

impl From<bool> for EventValue {
    fn from(value: bool) -> Self {
        EventValue::Binary(value)
    }
}

impl From<i32> for EventValue {
    fn from(value: i32) -> Self {
        EventValue::Analog(value)
    }
}

/// Input events of one simulated race plus the names they refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBuffer {
    /// Duration of the events (the finish time); informational only
    pub events_duration: u32,
    names: NameTable,
    events: Vec<Event>,
}

impl EventBuffer {
    /// Create an empty buffer.
    ///
    /// An empty buffer cannot be simulated; call [`clear`](Self::clear) to
    /// insert the race-running marker.
    pub fn new(events_duration: u32, names: NameTable) -> Self {
        Self {
            events_duration,
            names,
            events: Vec::new(),
        }
    }

    /// Create a buffer from existing records
    pub fn with_events(events_duration: u32, names: NameTable, events: Vec<Event>) -> Self {
        Self {
            events_duration,
            names,
            events,
        }
    }

    /// Name table of this buffer
    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Events in their current order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Mutable access to the records
    pub fn events_mut(&mut self) -> &mut Vec<Event> {
        &mut self.events
    }

    /// Replace every record
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    /// Take the records out, leaving the buffer empty
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Event> + ExactSizeIterator {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Deep copy of the buffer; later changes to either side are independent
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Remove every event, leaving only the race-running marker
    pub fn clear(&mut self) -> Result<(), EventBufferError> {
        let marker = self.names.reserved().race_running.clone();
        let event = self.build_event(-10, &marker, EventValue::Binary(true))?;
        self.events.clear();
        self.events.push(event);
        tracing::debug!(marker = %marker, "event buffer cleared");
        Ok(())
    }

    /// Sort by decreasing stored time; equal times keep insertion order
    pub fn sort(&mut self) {
        self.events.sort_by(|a, b| b.time.cmp(&a.time));
        tracing::trace!(events = self.events.len(), "event buffer sorted");
    }

    /// Append an event at zero-based `time`.
    ///
    /// Analog channels take `value` as a magnitude in [-65536, 65536]; every
    /// other name takes it as pressed / released. The buffer is not re-sorted.
    pub fn add(
        &mut self,
        time: i64,
        event_name: &str,
        value: impl Into<EventValue>,
    ) -> Result<(), EventBufferError> {
        let event = self.build_event(time, event_name, value.into())?;
        self.events.push(event);
        Ok(())
    }

    /// Find the name of a stored record
    pub fn event_name(&self, event: &Event) -> Result<&str, EventBufferError> {
        self.names.name(event.name_index())
    }

    /// Value of a stored record, interpreted by the kind of its name
    pub fn event_value(&self, event: &Event) -> Result<EventValue, EventBufferError> {
        Ok(match self.names.kind(event.name_index())? {
            EventKind::Binary => EventValue::Binary(event.binary_value()),
            EventKind::Analog => EventValue::Analog(event.analog_value()),
        })
    }

    fn build_event(
        &self,
        time: i64,
        event_name: &str,
        value: EventValue,
    ) -> Result<Event, EventBufferError> {
        let index = self.names.index_of(event_name)?;
        let mut event = Event::new(to_stored_time(time)?);
        event.set_name_index(index);

        match self.names.kind(index)? {
            EventKind::Analog => {
                let magnitude = value.as_analog();
                if !is_valid_analog(magnitude) {
                    return Err(EventBufferError::InvalidValue {
                        name: event_name.to_string(),
                        value: magnitude,
                    });
                }
                event.set_analog_value(magnitude);
            }
            EventKind::Binary => event.set_binary_value(value.as_binary()),
        }

        Ok(event)
    }
}
