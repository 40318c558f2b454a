//! Fixtures, a mock store builder and schedule assertions for the
//! rotation test suites

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items for convenience
pub use fixtures::TestFixtures;
#[allow(unused_imports)]
pub use helpers::{SavedRotations, StoreBuilder, TestHelpers};
