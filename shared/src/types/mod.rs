//! Core types used throughout the rotation tooling

use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::OnceLock;

use crate::errors::{SharedError, SharedResult};

/// Global command ID singleton - set once at startup
static COMMAND_ID: OnceLock<CommandId> = OnceLock::new();

/// Command identifier used to tag every log line of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    /// Appending future slots to the schedule
    Extend,
    /// Reporting who is on call
    Status,
    /// Checking that the persisted files load cleanly
    Verify,
    /// Used when no binary has initialized a command (tests, embedding)
    Library,
}

impl CommandId {
    /// Initialize the global command ID, first caller wins
    pub fn init(command: CommandId) -> &'static CommandId {
        COMMAND_ID.get_or_init(|| command)
    }

    /// Get the global command ID, `Library` if nothing was initialized
    pub fn current() -> &'static CommandId {
        COMMAND_ID.get().unwrap_or(&CommandId::Library)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandId::Extend => write!(f, "extend"),
            CommandId::Status => write!(f, "status"),
            CommandId::Verify => write!(f, "verify"),
            CommandId::Library => write!(f, "library"),
        }
    }
}

/// Unique handle of a rotation member
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(String);

impl MemberId {
    /// Build a member handle, trimming surrounding whitespace
    pub fn new(handle: impl Into<String>) -> SharedResult<Self> {
        let handle = handle.into();
        let trimmed = handle.trim();
        if trimmed.is_empty() {
            return Err(SharedError::EmptyMemberId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One rotation window `[start, end)` and the members assigned to it.
///
/// Member order is preserved; the first member is conventionally the primary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub members: Vec<MemberId>,
}

impl RotationSlot {
    /// Slot covering `[start, start + period)`
    pub fn new(start: DateTime<Utc>, period: Duration, members: Vec<MemberId>) -> SharedResult<Self> {
        let end = start
            .checked_add_signed(period)
            .ok_or(SharedError::SlotEndOutOfRange { start })?;
        Ok(Self {
            start,
            end,
            members,
        })
    }

    /// Whether `instant` falls inside this slot's window
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn has_member(&self, member: &MemberId) -> bool {
        self.members.contains(member)
    }

    fn duplicate_member(&self) -> Option<&MemberId> {
        let mut seen = HashSet::with_capacity(self.members.len());
        self.members.iter().find(|member| !seen.insert(*member))
    }
}

/// The set of members currently eligible for rotation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    members: BTreeSet<MemberId>,
}

impl Roster {
    /// Build a roster from raw handles; duplicates are rejected
    pub fn new<I, S>(handles: I) -> SharedResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut members = BTreeSet::new();
        for handle in handles {
            let member = MemberId::new(handle)?;
            if members.contains(&member) {
                return Err(SharedError::DuplicateRosterMember {
                    member: member.to_string(),
                });
            }
            members.insert(member);
        }
        Ok(Self { members })
    }

    pub fn contains(&self, member: &MemberId) -> bool {
        self.members.contains(member)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &MemberId> {
        self.members.iter()
    }
}

/// Ordered, contiguous sequence of rotation slots sharing one period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationHistory {
    period: Duration,
    slots: Vec<RotationSlot>,
}

impl RotationHistory {
    pub fn empty(period: Duration) -> Self {
        Self {
            period,
            slots: Vec::new(),
        }
    }

    /// Build a history, checking slot windows, duplicates and contiguity
    pub fn new(period: Duration, slots: Vec<RotationSlot>) -> SharedResult<Self> {
        let mut history = Self::empty(period);
        for slot in slots {
            history.append(slot)?;
        }
        Ok(history)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn slots(&self) -> &[RotationSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// End of the last scheduled slot
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.slots.last().map(|slot| slot.end)
    }

    /// Start of the last scheduled slot
    pub fn final_start(&self) -> Option<DateTime<Utc>> {
        self.slots.last().map(|slot| slot.start)
    }

    /// The trailing `count` slots, oldest first
    pub fn recent(&self, count: usize) -> &[RotationSlot] {
        let from = self.slots.len().saturating_sub(count);
        &self.slots[from..]
    }

    /// Append a slot after the current end of the history.
    ///
    /// The slot must span exactly one period, start where the previous slot
    /// ends and list each member at most once.
    pub fn append(&mut self, slot: RotationSlot) -> SharedResult<()> {
        let index = self.slots.len();

        if let Some(member) = slot.duplicate_member() {
            return Err(SharedError::DuplicateSlotMember {
                index,
                start: slot.start,
                member: member.to_string(),
            });
        }

        if slot.end - slot.start != self.period {
            return Err(SharedError::InvalidSlotWindow {
                index,
                start: slot.start,
                end: slot.end,
            });
        }

        if let Some(previous) = self.slots.last() {
            if slot.start != previous.end {
                return Err(SharedError::NonContiguousSlots {
                    index,
                    expected_start: previous.end,
                    actual_start: slot.start,
                });
            }
        }

        self.slots.push(slot);
        Ok(())
    }

    /// The slot whose window contains `instant`, if any
    pub fn slot_at(&self, instant: DateTime<Utc>) -> Option<&RotationSlot> {
        let after = self.slots.partition_point(|slot| slot.start <= instant);
        let candidate = self.slots.get(after.checked_sub(1)?)?;
        candidate.contains(instant).then_some(candidate)
    }

    /// Members on call at `instant`, if a slot covers it
    pub fn members_at(&self, instant: DateTime<Utc>) -> Option<&[MemberId]> {
        self.slot_at(instant).map(|slot| slot.members.as_slice())
    }

    /// Reject slots starting after `now` that name members outside `roster`.
    ///
    /// Slots that already started may reference removed members.
    pub fn check_roster(&self, roster: &Roster, now: DateTime<Utc>) -> SharedResult<()> {
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.start <= now {
                continue;
            }
            if let Some(member) = slot.members.iter().find(|m| !roster.contains(m)) {
                return Err(SharedError::UnknownMember {
                    index,
                    start: slot.start,
                    member: member.to_string(),
                });
            }
        }
        Ok(())
    }
}
