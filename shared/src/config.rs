//! Rotation configuration defaults and validation

use chrono::Duration;
use std::path::PathBuf;

use crate::errors::{SharedError, SharedResult};

pub const DEFAULT_ROTATION_FILE: &str = "rotation.yaml";
pub const DEFAULT_MEMBERS_FILE: &str = "rotation-members.yaml";
pub const DEFAULT_ROTATION_LENGTH_WEEKS: u32 = 2;
pub const DEFAULT_PEOPLE_PER_ROTATION: usize = 2;
pub const DEFAULT_NO_REPEAT_WINDOW: usize = 1;
/// Five default-length rotations
pub const DEFAULT_HORIZON_WEEKS: u32 = 10;
/// How close the final rotation start may get before the schedule counts as running short
pub const DEFAULT_NAG_WINDOW_DAYS: u32 = 14;

pub const MAX_ROTATION_LENGTH_WEEKS: u32 = 52;
/// Ten years of schedule
pub const MAX_HORIZON_WEEKS: u32 = 520;
pub const MAX_NAG_WINDOW_DAYS: u32 = 366;

/// Everything a run needs to know besides the persisted state itself
#[derive(Clone, Debug, PartialEq)]
pub struct RotationConfig {
    pub rotation_file: PathBuf,
    pub members_file: PathBuf,
    pub rotation_length_weeks: u32,
    pub people_per_rotation: usize,
    /// How many immediately preceding slots a member must sit out
    pub no_repeat_window: usize,
    pub horizon_weeks: u32,
    pub nag_window_days: u32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            rotation_file: PathBuf::from(DEFAULT_ROTATION_FILE),
            members_file: PathBuf::from(DEFAULT_MEMBERS_FILE),
            rotation_length_weeks: DEFAULT_ROTATION_LENGTH_WEEKS,
            people_per_rotation: DEFAULT_PEOPLE_PER_ROTATION,
            no_repeat_window: DEFAULT_NO_REPEAT_WINDOW,
            horizon_weeks: DEFAULT_HORIZON_WEEKS,
            nag_window_days: DEFAULT_NAG_WINDOW_DAYS,
        }
    }
}

impl RotationConfig {
    /// Reject values the scheduler cannot work with.
    ///
    /// The duration getters below assume a validated config.
    pub fn validate(&self) -> SharedResult<()> {
        if !(1..=MAX_ROTATION_LENGTH_WEEKS).contains(&self.rotation_length_weeks) {
            return Err(invalid("rotation_length_weeks", self.rotation_length_weeks));
        }
        if self.people_per_rotation == 0 {
            return Err(invalid("people_per_rotation", self.people_per_rotation));
        }
        if self.horizon_weeks > MAX_HORIZON_WEEKS {
            return Err(invalid("horizon_weeks", self.horizon_weeks));
        }
        if self.nag_window_days > MAX_NAG_WINDOW_DAYS {
            return Err(invalid("nag_window_days", self.nag_window_days));
        }
        Ok(())
    }

    pub fn period(&self) -> Duration {
        Duration::weeks(i64::from(self.rotation_length_weeks))
    }

    pub fn horizon(&self) -> Duration {
        Duration::weeks(i64::from(self.horizon_weeks))
    }

    pub fn nag_window(&self) -> Duration {
        Duration::days(i64::from(self.nag_window_days))
    }
}

fn invalid(field: &str, value: impl ToString) -> SharedError {
    SharedError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RotationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.period(), Duration::weeks(2));
        assert_eq!(config.horizon(), Duration::weeks(10));
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = RotationConfig {
            rotation_length_weeks: 0,
            ..RotationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SharedError::InvalidConfig { field, .. }) if field == "rotation_length_weeks"
        ));

        let config = RotationConfig {
            people_per_rotation: 0,
            ..RotationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_values_rejected() {
        let cases = [
            (
                "rotation_length_weeks",
                RotationConfig {
                    rotation_length_weeks: 4_000_000_000,
                    ..RotationConfig::default()
                },
            ),
            (
                "horizon_weeks",
                RotationConfig {
                    horizon_weeks: u32::MAX,
                    ..RotationConfig::default()
                },
            ),
            (
                "nag_window_days",
                RotationConfig {
                    nag_window_days: MAX_NAG_WINDOW_DAYS + 1,
                    ..RotationConfig::default()
                },
            ),
        ];

        for (expected, config) in cases {
            assert!(matches!(
                config.validate(),
                Err(SharedError::InvalidConfig { ref field, .. }) if field == expected
            ));
        }
    }

    #[test]
    fn test_upper_bounds_accepted() {
        let config = RotationConfig {
            rotation_length_weeks: MAX_ROTATION_LENGTH_WEEKS,
            horizon_weeks: MAX_HORIZON_WEEKS,
            nag_window_days: MAX_NAG_WINDOW_DAYS,
            ..RotationConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.horizon(), Duration::weeks(520));
    }
}
