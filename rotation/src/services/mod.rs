//! On-disk rotation store
//!
//! `YamlRotationStore` reads the members and rotation YAML files and swaps in
//! a new rotation file through a sibling `.tmp` file.

pub mod file_store;

#[cfg(test)]
mod tests;

pub use file_store::YamlRotationStore;
