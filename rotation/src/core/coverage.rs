//! Schedule coverage queries
//!
//! Read-only views over a history used by the status command and by anything
//! that notifies the people currently on call.

use chrono::{DateTime, Duration, Utc};
use shared::{MemberId, RotationHistory, RotationSlot};

/// Number of additional slots needed so the history ends at or after `target`.
///
/// Returns `None` for an empty history, which has no end to extend from.
pub fn calculate_rotations_to_cover(target: DateTime<Utc>, history: &RotationHistory) -> Option<usize> {
    let end = history.end()?;
    if end >= target {
        return Some(0);
    }

    let missing = (target - end).num_seconds();
    let period = history.period().num_seconds().max(1);
    Some(((missing + period - 1) / period) as usize)
}

/// Who is on call at an instant and whether the schedule needs extending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleStatus {
    pub at: DateTime<Utc>,
    pub current: Option<RotationSlot>,
    pub final_start: Option<DateTime<Utc>>,
    pub running_short: bool,
}

impl ScheduleStatus {
    /// Evaluate `history` at `at`.
    ///
    /// The schedule is running short when no slot covers `at` or the final
    /// slot starts less than `nag_window` after `at`.
    pub fn evaluate(history: &RotationHistory, at: DateTime<Utc>, nag_window: Duration) -> Self {
        let current = history.slot_at(at).cloned();
        let final_start = history.final_start();
        let running_short = match (&current, final_start) {
            (Some(_), Some(final_start)) => final_start - at < nag_window,
            _ => true,
        };

        Self {
            at,
            current,
            final_start,
            running_short,
        }
    }

    pub fn on_call(&self) -> &[MemberId] {
        self.current
            .as_ref()
            .map(|slot| slot.members.as_slice())
            .unwrap_or(&[])
    }

    /// Time left until the final scheduled slot starts
    pub fn time_until_final_start(&self) -> Option<Duration> {
        self.final_start.map(|start| start - self.at)
    }
}
