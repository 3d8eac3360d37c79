//! Event search
//!
//! ```ignore
//! // All analog steering events at full left
//! buffer.find(&EventFilter::new().event_name("Steer").value(-65536))?;
//!
//! // Everything injected at zero-based time 0
//! buffer.find(&EventFilter::new().time(0))?;
//!
//! // The finish line
//! buffer.find(&EventFilter::new().event_name("_FakeFinishLine").value(true))?;
//! ```

use super::buffer::{EventBuffer, EventValue};
use super::error::EventBufferError;
use super::event::Event;
use super::names::EventKind;

/// Criteria for [`EventBuffer::find`]. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Match events with this name
    pub event_name: Option<String>,
    /// Match events at this zero-based time
    pub time: Option<i64>,
    /// Match events with this value; only applied together with `event_name`
    pub value: Option<EventValue>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = Some(name.into());
        self
    }

    pub fn time(mut self, time: i64) -> Self {
        self.time = Some(time);
        self
    }

    pub fn value(mut self, value: impl Into<EventValue>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl EventBuffer {
    /// Events matching `filter`, most recently added first.
    ///
    /// Works on any ordering of the buffer and never mutates it.
    pub fn find(&self, filter: &EventFilter) -> Result<Vec<Event>, EventBufferError> {
        let target = match &filter.event_name {
            Some(name) => {
                let index = self.names().index_of(name)?;
                Some((index, self.names().kind(index)?))
            }
            None => {
                if filter.value.is_some() {
                    tracing::debug!("value filter ignored without an event name");
                }
                None
            }
        };

        let matched = self
            .iter()
            .rev()
            .filter(|ev| filter.time.is_none_or(|t| ev.zero_based_time() == t))
            .filter(|ev| match target {
                Some((index, kind)) => {
                    ev.name_index() == index
                        && filter.value.is_none_or(|value| match kind {
                            EventKind::Analog => ev.analog_value() == value.as_analog(),
                            EventKind::Binary => ev.binary_value() == value.as_binary(),
                        })
                }
                None => true,
            })
            .copied()
            .collect();

        Ok(matched)
    }
}
