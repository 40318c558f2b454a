//! Rotation library for keeping an on-call schedule fair and populated
//!
//! This library provides the pure scheduling core (participation tracking,
//! fair selection, horizon-driven extension) plus a file-backed store and a
//! runner that ties them together for the `rotation` binary.

pub mod core;
pub mod error;
pub mod runner;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use crate::core::{
    ExtendTarget, Extension, ExtensionState, FairnessSelector, ParticipationTracker,
    RotationExtender, ScheduleStatus,
};
pub use error::{InsufficientMembers, RotationError, RotationResult};
pub use runner::{ExtendReport, RotationRunner, RotationSnapshot, VerifyReport};
pub use traits::{MockRotationStore, RotationStore};
