//! Last-participation tracking
//!
//! Derives, for every roster member, the most recent rotation they served in.

use chrono::{DateTime, Utc};
use shared::{MemberId, Roster, RotationHistory, RotationSlot};
use std::collections::BTreeMap;

/// Where a member last served: slot start, then seat within that slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LastService {
    pub start: DateTime<Utc>,
    pub seat: usize,
}

/// Most recent service of each roster member
#[derive(Debug, Clone)]
pub struct ParticipationTracker {
    last_service: BTreeMap<MemberId, Option<LastService>>,
}

impl ParticipationTracker {
    /// Build the tracker from a roster and an oldest-first history.
    ///
    /// Members that appear in history but not in the roster are ignored.
    pub fn new(roster: &Roster, history: &RotationHistory) -> Self {
        let mut tracker = Self {
            last_service: roster.iter().map(|member| (member.clone(), None)).collect(),
        };
        for slot in history.slots() {
            tracker.record(slot);
        }
        tracker
    }

    /// Fold a slot in. Slots must be recorded oldest first.
    pub fn record(&mut self, slot: &RotationSlot) {
        for (seat, member) in slot.members.iter().enumerate() {
            if let Some(entry) = self.last_service.get_mut(member) {
                *entry = Some(LastService {
                    start: slot.start,
                    seat,
                });
            }
        }
    }

    /// Start of the latest slot `member` served in, `None` if never
    pub fn last_participation(&self, member: &MemberId) -> Option<DateTime<Utc>> {
        self.last_service(member).map(|service| service.start)
    }

    pub fn last_service(&self, member: &MemberId) -> Option<LastService> {
        self.last_service.get(member).copied().flatten()
    }

    /// Tracked (roster) members in identifier order
    pub fn members(&self) -> impl Iterator<Item = &MemberId> {
        self.last_service.keys()
    }
}
