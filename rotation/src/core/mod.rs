//! Rotation scheduling
//!
//! Who served last, who is picked next, how far the schedule is extended and
//! whether it still covers the nag window. Nothing here reads or writes files.

pub mod coverage;
pub mod extender;
pub mod participation;
pub mod selector;

pub use coverage::{ScheduleStatus, calculate_rotations_to_cover};
pub use extender::{ExtendTarget, Extension, ExtensionState, RotationExtender, rotation_boundary};
pub use participation::{LastService, ParticipationTracker};
pub use selector::FairnessSelector;
