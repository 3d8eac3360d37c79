//! Event buffer errors

/// Errors raised by event buffer operations.
///
/// Every variant is a programmer or data-integrity error; nothing here is
/// transient and nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventBufferError {
    /// Event name is not part of the buffer's name table
    #[error("event name \"{0}\" does not exist in this event buffer")]
    NameNotFound(String),

    /// A stored record references a name index past the end of the table
    #[error("event name index {0} does not exist in this event buffer")]
    NameIndexNotFound(u8),

    /// Analog magnitude outside [-65536, 65536]
    #[error("value {value} is out of range for analog event \"{name}\"")]
    InvalidValue { name: String, value: i32 },

    /// Zero-based time that has no stored-time representation
    #[error("time {0} cannot be represented as a stored time")]
    TimeOutOfRange(i64),

    /// Name tables are indexed by a single byte
    #[error("name table has {0} entries, at most 256 are addressable")]
    TooManyNames(usize),
}
