//! Rotation extension state machine
//!
//! Appends slots after the end of the existing history until the target is
//! reached or the selector runs out of eligible members. Existing slots are
//! never touched.

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use shared::{CommandId, Roster, RotationConfig, RotationHistory, RotationSlot, command_debug};

use super::participation::ParticipationTracker;
use super::selector::FairnessSelector;
use crate::error::{InsufficientMembers, RotationError, RotationResult};

/// How far an extension run should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendTarget {
    /// Populate the schedule until at least `now + horizon`
    Horizon(Duration),
    /// Append exactly this many slots
    Count(usize),
}

impl ExtendTarget {
    pub fn horizon_weeks(weeks: u32) -> Self {
        ExtendTarget::Horizon(Duration::try_weeks(i64::from(weeks)).unwrap_or(Duration::MAX))
    }

    /// Pin the target to a concrete stopping point for a run starting at `now`
    fn resolve(self, now: DateTime<Utc>) -> RotationResult<Goal> {
        match self {
            ExtendTarget::Horizon(horizon) => now
                .checked_add_signed(horizon)
                .map(Goal::Until)
                .ok_or_else(|| {
                    RotationError::config(
                        "horizon_weeks",
                        format!("{} weeks from {now} is past the last representable date", horizon.num_weeks()),
                    )
                }),
            ExtendTarget::Count(count) => Ok(Goal::Slots(count)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Goal {
    Until(DateTime<Utc>),
    Slots(usize),
}

impl Goal {
    fn is_reached(self, cursor: DateTime<Utc>, appended: usize) -> bool {
        match self {
            Goal::Until(end) => cursor >= end,
            Goal::Slots(count) => appended >= count,
        }
    }
}

/// Progress of a single extension run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionState {
    Ready,
    Extending,
    Done,
    Aborted(InsufficientMembers),
}

impl ExtensionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExtensionState::Done | ExtensionState::Aborted(_))
    }
}

/// Result of an extension run: the working history plus how it ended
#[derive(Debug, Clone)]
pub struct Extension {
    pub history: RotationHistory,
    pub appended: usize,
    pub state: ExtensionState,
}

impl Extension {
    /// The slots added by this run
    pub fn appended_slots(&self) -> &[RotationSlot] {
        self.history.recent(self.appended)
    }

    pub fn shortfall(&self) -> Option<&InsufficientMembers> {
        match &self.state {
            ExtensionState::Aborted(shortfall) => Some(shortfall),
            _ => None,
        }
    }
}

/// Sunday 00:00 UTC strictly before today; the first slot of an empty
/// schedule starts here. Run on a Sunday this is the Sunday a week earlier.
pub fn rotation_boundary(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_back = i64::from(now.weekday().num_days_from_monday()) + 1;
    let sunday = now.date_naive() - Duration::days(days_back);
    Utc.from_utc_datetime(&sunday.and_time(NaiveTime::MIN))
}

/// Orchestrates slot generation on top of the fairness selector
#[derive(Debug, Clone, Copy)]
pub struct RotationExtender {
    selector: FairnessSelector,
    period: Duration,
}

struct ExtensionRun {
    history: RotationHistory,
    tracker: ParticipationTracker,
    cursor: DateTime<Utc>,
    appended: usize,
}

impl RotationExtender {
    pub fn new(selector: FairnessSelector, period: Duration) -> Self {
        Self { selector, period }
    }

    pub fn from_config(config: &RotationConfig) -> Self {
        Self::new(FairnessSelector::from_config(config), config.period())
    }

    /// Extend `history` toward `target`.
    ///
    /// Malformed input fails before any slot is generated. Running out of
    /// eligible members is not an error here: the run stops, keeps the slots
    /// appended so far and reports `ExtensionState::Aborted`.
    pub fn extend(
        &self,
        roster: &Roster,
        history: &RotationHistory,
        now: DateTime<Utc>,
        target: ExtendTarget,
    ) -> RotationResult<Extension> {
        if history.period() != self.period {
            return Err(RotationError::config(
                "rotation_length_weeks",
                format!(
                    "history uses {} day rotations, configured {} days",
                    history.period().num_days(),
                    self.period.num_days()
                ),
            ));
        }
        history.check_roster(roster, now)?;
        let goal = target.resolve(now)?;

        let mut run = ExtensionRun {
            history: history.clone(),
            tracker: ParticipationTracker::new(roster, history),
            cursor: history.end().unwrap_or_else(|| rotation_boundary(now)),
            appended: 0,
        };

        let mut state = ExtensionState::Ready;
        while !state.is_terminal() {
            state = self.step(&mut run, goal)?;
        }

        Ok(Extension {
            history: run.history,
            appended: run.appended,
            state,
        })
    }

    fn step(&self, run: &mut ExtensionRun, goal: Goal) -> RotationResult<ExtensionState> {
        if goal.is_reached(run.cursor, run.appended) {
            return Ok(ExtensionState::Done);
        }

        let members = match self.selector.select(&run.tracker, &run.history, run.cursor) {
            Ok(members) => members,
            Err(shortfall) => return Ok(ExtensionState::Aborted(shortfall)),
        };

        let slot = RotationSlot::new(run.cursor, self.period, members)
            .map_err(|e| RotationError::config("rotation_length_weeks", e.to_string()))?;
        command_debug!(
            CommandId::current(),
            "Scheduled rotation {} -> {}: {}",
            slot.start,
            slot.end,
            slot.members
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        run.tracker.record(&slot);
        run.cursor = slot.end;
        run.history.append(slot)?;
        run.appended += 1;

        Ok(ExtensionState::Extending)
    }
}
