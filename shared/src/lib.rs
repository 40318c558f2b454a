//! Shared types for the on-call rotation tooling
//!
//! Contains the schedule data model, the persisted document formats and the
//! logging setup used by every rotation command.

pub mod config;
pub mod documents;
pub mod errors;
pub mod logging;
pub mod types;

pub use config::RotationConfig;
pub use documents::{RotationEntry, RotationFile, RotationMembersFile};
pub use errors::*;
pub use types::*;
