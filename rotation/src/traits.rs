//! Storage seam for the rotation documents
//!
//! A run reads both documents once and writes the rotation document at most
//! once. `MockRotationStore` is generated for tests.

use crate::error::RotationResult;
use shared::{RotationFile, RotationMembersFile};

/// Persistence abstraction for the roster and the rotation schedule
#[mockall::automock]
#[async_trait::async_trait]
pub trait RotationStore: Send + Sync {
    /// Load the roster document
    async fn load_members(&self) -> RotationResult<RotationMembersFile>;

    /// Load the rotation schedule document
    async fn load_rotations(&self) -> RotationResult<RotationFile>;

    /// Replace the rotation schedule document.
    ///
    /// Implementations must make the replacement atomic: either the whole new
    /// document is visible afterwards or the old one is left untouched.
    async fn save_rotations(&self, rotations: &RotationFile) -> RotationResult<()>;

    /// Human-readable location of the rotation document, for logs
    fn rotations_location(&self) -> String;
}
