//! `StoreBuilder` wires a `MockRotationStore` with canned documents and
//! records every save; `TestHelpers` checks schedule shape and balance.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use rotation::*;
use shared::{RotationConfig, RotationFile, RotationHistory, RotationMembersFile};

use super::fixtures::TestFixtures;

/// Every rotation file handed to `save_rotations`, in call order
pub type SavedRotations = Arc<Mutex<Vec<RotationFile>>>;

/// Builder pattern for creating mock stores with sensible defaults
pub struct StoreBuilder {
    members: RotationMembersFile,
    rotations: RotationFile,
    expected_saves: Option<usize>,
    fail_saves: bool,
}

impl StoreBuilder {
    /// Four members and an empty rotation file
    pub fn new() -> Self {
        Self {
            members: TestFixtures::members_file(&TestFixtures::four_members()),
            rotations: RotationFile::default(),
            expected_saves: None,
            fail_saves: false,
        }
    }

    pub fn with_members(mut self, handles: &[&str]) -> Self {
        self.members = TestFixtures::members_file(handles);
        self
    }

    pub fn with_rotations(mut self, rotations: RotationFile) -> Self {
        self.rotations = rotations;
        self
    }

    /// Require exactly `count` calls to `save_rotations`
    pub fn expect_saves(mut self, count: usize) -> Self {
        self.expected_saves = Some(count);
        self
    }

    /// Make every save fail with a persistence error
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Build the mock store and a handle to what it was asked to save
    pub fn build(self) -> (MockRotationStore, SavedRotations) {
        let mut store = MockRotationStore::new();
        let saved: SavedRotations = Arc::new(Mutex::new(Vec::new()));

        let members = self.members;
        store
            .expect_load_members()
            .returning(move || Ok(members.clone()))
            .times(0..);

        let rotations = self.rotations;
        store
            .expect_load_rotations()
            .returning(move || Ok(rotations.clone()))
            .times(0..);

        store
            .expect_rotations_location()
            .returning(|| "memory".to_string())
            .times(0..);

        let sink = Arc::clone(&saved);
        let fail = self.fail_saves;
        let save = store.expect_save_rotations();
        match self.expected_saves {
            Some(count) => save.times(count),
            None => save.times(0..),
        };
        save.returning(move |file| {
            if fail {
                return Err(RotationError::persistence("rename", "memory", "disk full"));
            }
            sink.lock().unwrap().push(file.clone());
            Ok(())
        });

        (store, saved)
    }

    /// Build a runner over the mock store with the standard configuration
    pub fn build_runner(self) -> (RotationRunner<MockRotationStore>, SavedRotations) {
        self.build_runner_with(TestFixtures::config())
    }

    pub fn build_runner_with(
        self,
        config: RotationConfig,
    ) -> (RotationRunner<MockRotationStore>, SavedRotations) {
        let (store, saved) = self.build();
        let runner = RotationRunner::new(config, store).unwrap();
        (runner, saved)
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper functions for common test operations
pub struct TestHelpers;

impl TestHelpers {
    /// Member handles of each slot, oldest first
    pub fn assignments(history: &RotationHistory) -> Vec<Vec<String>> {
        history
            .slots()
            .iter()
            .map(|slot| slot.members.iter().map(|m| m.to_string()).collect())
            .collect()
    }

    /// Number of slots each handle in `roster` served in
    pub fn participation_counts(history: &RotationHistory, roster: &[&str]) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> =
            roster.iter().map(|handle| (handle.to_string(), 0)).collect();
        for slot in history.slots() {
            for member in &slot.members {
                if let Some(count) = counts.get_mut(member.as_str()) {
                    *count += 1;
                }
            }
        }
        counts
    }

    /// Assert that no member serves in two adjacent slots
    pub fn assert_no_adjacent_repeats(history: &RotationHistory) {
        for pair in history.slots().windows(2) {
            for member in &pair[1].members {
                assert!(
                    !pair[0].has_member(member),
                    "{} serves in adjacent rotations starting {} and {}",
                    member,
                    pair[0].start,
                    pair[1].start
                );
            }
        }
    }

    /// Assert that slots tile time without gaps or overlaps
    pub fn assert_contiguous(history: &RotationHistory) {
        for pair in history.slots().windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert_eq!(pair[1].end - pair[1].start, history.period());
        }
    }

    /// Assert that `saved` starts with every entry of `original`, unchanged
    pub fn assert_prefix_preserved(original: &RotationFile, saved: &RotationFile) {
        assert!(saved.rotations.len() >= original.rotations.len());
        assert_eq!(
            &saved.rotations[..original.rotations.len()],
            original.rotations.as_slice()
        );
    }

    /// The last file written to the store
    pub fn last_saved(saved: &SavedRotations) -> RotationFile {
        saved
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no rotation file was saved")
    }
}
