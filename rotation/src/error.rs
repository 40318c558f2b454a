//! Rotation-specific error types

use chrono::{DateTime, Utc};
use shared::{MemberId, SharedError};
use thiserror::Error;

/// A slot could not be filled without repeating recent members
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Cannot fill rotation starting {slot_start}: need {needed} member(s), only {available} eligible \
     (sitting out after recent rotations: {})",
    format_members(.recently_served)
)]
pub struct InsufficientMembers {
    pub slot_start: DateTime<Utc>,
    pub needed: usize,
    pub available: usize,
    pub recently_served: Vec<MemberId>,
}

#[derive(Error, Debug)]
pub enum RotationError {
    #[error("Malformed rotation input: {0}")]
    MalformedInput(#[from] SharedError),

    #[error(transparent)]
    InsufficientMembers(#[from] InsufficientMembers),

    #[error("Configuration error: {field}: {reason}")]
    Configuration { field: String, reason: String },

    #[error("Persistence failed: {operation} on {path}: {reason}")]
    Persistence {
        operation: String,
        path: String,
        reason: String,
    },
}

impl RotationError {
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn persistence(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Persistence {
            operation: operation.into(),
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

fn format_members(members: &[MemberId]) -> String {
    if members.is_empty() {
        return "none".to_string();
    }
    members
        .iter()
        .map(MemberId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type RotationResult<T> = Result<T, RotationError>;
