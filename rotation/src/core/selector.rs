//! Fair member selection for a single rotation slot
//!
//! Candidates are roster members who did not serve in the immediately
//! preceding `no_repeat_window` slots. They are ranked least recently served
//! first; members who never served come before everyone else. Ties on the
//! slot start are broken by seat in that slot, then by member handle, which
//! makes repeated selection behave like a round-robin queue.

use chrono::{DateTime, Utc};
use shared::{MemberId, RotationConfig, RotationHistory};
use std::collections::BTreeSet;

use super::participation::ParticipationTracker;
use crate::error::InsufficientMembers;

/// Chooses who fills the next slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FairnessSelector {
    slot_size: usize,
    no_repeat_window: usize,
}

impl FairnessSelector {
    pub fn new(slot_size: usize, no_repeat_window: usize) -> Self {
        Self {
            slot_size,
            no_repeat_window,
        }
    }

    pub fn from_config(config: &RotationConfig) -> Self {
        Self::new(config.people_per_rotation, config.no_repeat_window)
    }

    pub fn slot_size(&self) -> usize {
        self.slot_size
    }

    pub fn no_repeat_window(&self) -> usize {
        self.no_repeat_window
    }

    /// Pick members for the slot starting at `slot_start`, which directly
    /// follows the last slot of `history`.
    ///
    /// Returns exactly `slot_size` distinct members, or the shortfall when
    /// too few are eligible. Never returns a partial slot.
    pub fn select(
        &self,
        tracker: &ParticipationTracker,
        history: &RotationHistory,
        slot_start: DateTime<Utc>,
    ) -> Result<Vec<MemberId>, InsufficientMembers> {
        let recently_served: BTreeSet<&MemberId> = history
            .recent(self.no_repeat_window)
            .iter()
            .flat_map(|slot| slot.members.iter())
            .collect();

        let mut candidates: Vec<&MemberId> = tracker
            .members()
            .filter(|member| !recently_served.contains(member))
            .collect();

        if candidates.len() < self.slot_size {
            return Err(InsufficientMembers {
                slot_start,
                needed: self.slot_size,
                available: candidates.len(),
                recently_served: recently_served.into_iter().cloned().collect(),
            });
        }

        candidates.sort_by(|a, b| {
            tracker
                .last_service(a)
                .cmp(&tracker.last_service(b))
                .then_with(|| a.cmp(b))
        });

        Ok(candidates
            .into_iter()
            .take(self.slot_size)
            .cloned()
            .collect())
    }
}
