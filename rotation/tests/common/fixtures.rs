//! Roster handles, dates, YAML documents and configs shared by the rotation tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use shared::{RotationConfig, RotationEntry, RotationFile, RotationMembersFile};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Standard roster handles
    pub const MEMBER_A: &'static str = "alice";
    pub const MEMBER_B: &'static str = "bob";
    pub const MEMBER_C: &'static str = "carol";
    pub const MEMBER_D: &'static str = "dave";
    pub const MEMBER_E: &'static str = "erin";

    /// Standard configuration values
    pub const ROTATION_LENGTH_WEEKS: u32 = 2;
    pub const PEOPLE_PER_ROTATION: usize = 2;

    /// Members file with the four standard handles
    pub const MEMBERS_YAML: &'static str = "\
members:
- alice
- bob
- carol
- dave
";

    /// Rotation file with one rotation starting 2025-05-04
    pub const ROTATIONS_YAML: &'static str = "\
rotations:
- start_time: 2025-05-04T00:00:00Z
  members:
  - alice
  - bob
";

    /// Friday 2025-05-30 10:00 UTC
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 30, 10, 0, 0).unwrap()
    }

    /// Sunday on or before `now()`
    pub fn boundary() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 25, 0, 0, 0).unwrap()
    }

    /// Start of the first stored rotation in `ROTATIONS_YAML`
    pub fn first_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 4, 0, 0, 0).unwrap()
    }

    pub fn period() -> Duration {
        Duration::weeks(Self::ROTATION_LENGTH_WEEKS as i64)
    }

    pub fn four_members() -> Vec<&'static str> {
        vec![Self::MEMBER_A, Self::MEMBER_B, Self::MEMBER_C, Self::MEMBER_D]
    }

    pub fn five_members() -> Vec<&'static str> {
        vec![
            Self::MEMBER_A,
            Self::MEMBER_B,
            Self::MEMBER_C,
            Self::MEMBER_D,
            Self::MEMBER_E,
        ]
    }

    pub fn members_file(handles: &[&str]) -> RotationMembersFile {
        RotationMembersFile {
            members: handles.iter().map(|h| h.to_string()).collect(),
        }
    }

    /// Rotation file with contiguous entries starting at `first_start()`
    pub fn rotation_file(slots: &[&[&str]]) -> RotationFile {
        let rotations = slots
            .iter()
            .enumerate()
            .map(|(index, members)| RotationEntry {
                start_time: Self::first_start() + Self::period() * index as i32,
                members: members.iter().map(|h| h.to_string()).collect(),
            })
            .collect();
        RotationFile { rotations }
    }

    pub fn config() -> RotationConfig {
        RotationConfig {
            rotation_length_weeks: Self::ROTATION_LENGTH_WEEKS,
            people_per_rotation: Self::PEOPLE_PER_ROTATION,
            ..RotationConfig::default()
        }
    }

    pub fn config_with_people(people_per_rotation: usize) -> RotationConfig {
        RotationConfig {
            people_per_rotation,
            ..Self::config()
        }
    }
}
