//! Per-buffer event name table
//!
//! The host hands every buffer its own ordered list of event names; an
//! event's `name_index` is a position in that list. The set is not fixed, so
//! the table is built once per buffer and the role of each name (marker,
//! digital action, analog channel) is resolved at construction time.

use hashbrown::HashMap;

use super::error::EventBufferError;
use crate::config::ReservedNames;

/// Most names a table can address with a one-byte index
pub const MAX_NAMES: usize = 256;

/// How an event's payload is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pressed / released
    Binary,
    /// Signed magnitude in [-65536, 65536]
    Analog,
}

/// Digital inputs understood by the command stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Accelerate,
    Brake,
    SteerLeft,
    SteerRight,
    Respawn,
    Horn,
}

impl Action {
    /// All actions, in command-keyword order
    pub const ALL: [Action; 6] = [
        Action::Accelerate,
        Action::Brake,
        Action::SteerLeft,
        Action::SteerRight,
        Action::Respawn,
        Action::Horn,
    ];

    /// Keyword used for this action in a command stream
    pub fn keyword(self) -> &'static str {
        match self {
            Action::Accelerate => "up",
            Action::Brake => "down",
            Action::SteerLeft => "left",
            Action::SteerRight => "right",
            Action::Respawn => "enter",
            Action::Horn => "horn",
        }
    }

    /// Look up an action by its command keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.keyword() == keyword)
    }

    /// Whether only the press of this action is meaningful
    ///
    /// Respawn and horn are transient; their release is never exported.
    pub fn is_transient(self) -> bool {
        matches!(self, Action::Respawn | Action::Horn)
    }

    /// Event name bound to this action
    pub fn event_name(self, reserved: &ReservedNames) -> &str {
        match self {
            Action::Accelerate => &reserved.accelerate,
            Action::Brake => &reserved.brake,
            Action::SteerLeft => &reserved.steer_left,
            Action::SteerRight => &reserved.steer_right,
            Action::Respawn => &reserved.respawn,
            Action::Horn => &reserved.horn,
        }
    }
}

/// Structural role of a name in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Race-running or race-start marker
    Marker,
    /// Race-finish marker
    Finish,
    /// Digital input with a command keyword
    Digital(Action),
    /// Analog accelerate
    Gas,
    /// Analog steer
    Steer,
    /// Any name without a reserved role
    Other,
}

impl Channel {
    /// Payload interpretation for this channel
    pub fn kind(self) -> EventKind {
        match self {
            Channel::Gas | Channel::Steer => EventKind::Analog,
            _ => EventKind::Binary,
        }
    }

    fn resolve(name: &str, reserved: &ReservedNames) -> Self {
        if name == reserved.analog_steer {
            Channel::Steer
        } else if name == reserved.analog_accelerate {
            Channel::Gas
        } else if name == reserved.race_finish {
            Channel::Finish
        } else if name == reserved.race_running || name == reserved.race_start {
            Channel::Marker
        } else if let Some(action) = Action::ALL
            .into_iter()
            .find(|a| a.event_name(reserved) == name)
        {
            Channel::Digital(action)
        } else {
            Channel::Other
        }
    }
}

/// Ordered event names with their resolved roles.
///
/// Immutable once built. Duplicate names resolve to their first position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTable {
    names: Vec<String>,
    index: HashMap<String, u8>,
    channels: Vec<Channel>,
    reserved: ReservedNames,
}

impl NameTable {
    /// Build a table using the host's default reserved names
    pub fn new<I, S>(names: I) -> Result<Self, EventBufferError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_reserved(names, ReservedNames::default())
    }

    /// Build a table with custom reserved names
    pub fn with_reserved<I, S>(names: I, reserved: ReservedNames) -> Result<Self, EventBufferError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() > MAX_NAMES {
            return Err(EventBufferError::TooManyNames(names.len()));
        }

        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(i as u8);
        }
        let channels = names
            .iter()
            .map(|name| Channel::resolve(name, &reserved))
            .collect();

        Ok(Self {
            names,
            index,
            channels,
            reserved,
        })
    }

    /// Index of `name`
    pub fn index_of(&self, name: &str) -> Result<u8, EventBufferError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| EventBufferError::NameNotFound(name.to_string()))
    }

    /// Whether `name` is in the table
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Name at `index`
    pub fn name(&self, index: u8) -> Result<&str, EventBufferError> {
        self.names
            .get(index as usize)
            .map(String::as_str)
            .ok_or(EventBufferError::NameIndexNotFound(index))
    }

    /// Role of the name at `index`
    pub fn channel(&self, index: u8) -> Result<Channel, EventBufferError> {
        self.channels
            .get(index as usize)
            .copied()
            .ok_or(EventBufferError::NameIndexNotFound(index))
    }

    /// Payload kind of the name at `index`
    pub fn kind(&self, index: u8) -> Result<EventKind, EventBufferError> {
        self.channel(index).map(Channel::kind)
    }

    /// All names, in index order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Reserved names the roles were resolved against
    pub fn reserved(&self) -> &ReservedNames {
        &self.reserved
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
