//! Shared error types for the rotation tooling

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Member handle cannot be empty")]
    EmptyMemberId,

    #[error("Roster lists member '{member}' more than once")]
    DuplicateRosterMember { member: String },

    #[error("Rotation #{index} starting {start} lists member '{member}' more than once")]
    DuplicateSlotMember {
        index: usize,
        start: DateTime<Utc>,
        member: String,
    },

    #[error("Rotation #{index} window {start}..{end} does not match the rotation length")]
    InvalidSlotWindow {
        index: usize,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Rotation #{index} starts at {actual_start}, expected {expected_start} (gap or overlap)")]
    NonContiguousSlots {
        index: usize,
        expected_start: DateTime<Utc>,
        actual_start: DateTime<Utc>,
    },

    #[error("Upcoming rotation #{index} starting {start} references '{member}', who is not on the roster")]
    UnknownMember {
        index: usize,
        start: DateTime<Utc>,
        member: String,
    },

    #[error("Rotation starting {start} would end past the last representable date")]
    SlotEndOutOfRange { start: DateTime<Utc> },

    #[error("Serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },
}

impl SharedError {
    /// Whether this error describes roster or history content a human must fix
    pub fn is_malformed_input(&self) -> bool {
        !matches!(
            self,
            SharedError::SerializationError { .. } | SharedError::InvalidConfig { .. }
        )
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
