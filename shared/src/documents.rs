//! Persisted YAML document formats
//!
//! The rotation file stores only slot starts; ends are derived from the
//! configured rotation length when the history is rebuilt.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};
use crate::types::{MemberId, Roster, RotationHistory, RotationSlot};

/// One persisted rotation entry
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RotationEntry {
    pub start_time: DateTime<Utc>,
    pub members: Vec<String>,
}

/// Contents of the rotation schedule file
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RotationFile {
    #[serde(default)]
    pub rotations: Vec<RotationEntry>,
}

/// Contents of the rotation members file
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RotationMembersFile {
    #[serde(default)]
    pub members: Vec<String>,
}

impl RotationFile {
    pub fn from_yaml_str(content: &str) -> SharedResult<Self> {
        serde_yaml::from_str(content).map_err(|e| SharedError::DeserializationError {
            message: format!("rotation file: {e}"),
        })
    }

    pub fn to_yaml_str(&self) -> SharedResult<String> {
        serde_yaml::to_string(self).map_err(|e| SharedError::SerializationError {
            message: format!("rotation file: {e}"),
        })
    }

    /// Rebuild the in-memory history, validating every entry
    pub fn to_history(&self, period: Duration) -> SharedResult<RotationHistory> {
        let mut history = RotationHistory::empty(period);
        for entry in &self.rotations {
            let members = entry
                .members
                .iter()
                .map(|handle| MemberId::new(handle.as_str()))
                .collect::<SharedResult<Vec<_>>>()?;
            history.append(RotationSlot::new(entry.start_time, period, members)?)?;
        }
        Ok(history)
    }

    pub fn from_history(history: &RotationHistory) -> Self {
        let rotations = history
            .slots()
            .iter()
            .map(|slot| RotationEntry {
                start_time: slot.start,
                members: slot.members.iter().map(|m| m.to_string()).collect(),
            })
            .collect();
        Self { rotations }
    }
}

impl RotationMembersFile {
    pub fn from_yaml_str(content: &str) -> SharedResult<Self> {
        serde_yaml::from_str(content).map_err(|e| SharedError::DeserializationError {
            message: format!("members file: {e}"),
        })
    }

    pub fn to_yaml_str(&self) -> SharedResult<String> {
        serde_yaml::to_string(self).map_err(|e| SharedError::SerializationError {
            message: format!("members file: {e}"),
        })
    }

    pub fn to_roster(&self) -> SharedResult<Roster> {
        Roster::new(self.members.iter().map(String::as_str))
    }
}
