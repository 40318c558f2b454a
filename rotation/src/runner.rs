//! Rotation runner
//!
//! Coordinates one command run against the injected store: read the whole
//! state once, compute in memory, write the rotation document at most once.

use chrono::{DateTime, Utc};

use shared::{
    CommandId, Roster, RotationConfig, RotationFile, RotationHistory, command_debug, command_info,
    command_warn, logging,
};

use crate::core::{
    ExtendTarget, Extension, ExtensionState, RotationExtender, ScheduleStatus,
    calculate_rotations_to_cover,
};
use crate::error::{RotationError, RotationResult};
use crate::traits::RotationStore;

/// Immutable view of the persisted state taken at the start of a run
#[derive(Debug, Clone)]
pub struct RotationSnapshot {
    pub roster: Roster,
    pub history: RotationHistory,
}

/// Outcome of an `extend` run
#[derive(Debug, Clone)]
pub struct ExtendReport {
    pub extension: Extension,
    /// Whether the extended schedule was written back to the store
    pub committed: bool,
}

impl ExtendReport {
    pub fn rotation_file(&self) -> RotationFile {
        RotationFile::from_history(&self.extension.history)
    }
}

/// Outcome of a `verify` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub members: usize,
    pub rotations: usize,
}

/// Runs rotation commands against a store
pub struct RotationRunner<S>
where
    S: RotationStore,
{
    config: RotationConfig,
    store: S,
}

impl<S> RotationRunner<S>
where
    S: RotationStore,
{
    /// Create a runner, rejecting unusable configuration up front
    pub fn new(config: RotationConfig, store: S) -> RotationResult<Self> {
        config
            .validate()
            .map_err(|e| RotationError::config("rotation config", e.to_string()))?;
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// Load and validate the roster and history
    pub async fn load_snapshot(&self) -> RotationResult<RotationSnapshot> {
        let members = self.store.load_members().await?;
        let rotations = self.store.load_rotations().await?;

        let roster = members.to_roster()?;
        let history = rotations.to_history(self.config.period())?;
        command_debug!(
            CommandId::current(),
            "Loaded {} members and {} rotations",
            roster.len(),
            history.len()
        );

        Ok(RotationSnapshot { roster, history })
    }

    /// Extend the schedule toward `target`.
    ///
    /// Slots appended before an insufficient-members stop are still written.
    /// With `dry_run` nothing is written.
    pub async fn extend(
        &self,
        now: DateTime<Utc>,
        target: ExtendTarget,
        dry_run: bool,
    ) -> RotationResult<ExtendReport> {
        let snapshot = self.load_snapshot().await?;

        // An unrepresentable horizon is reported by the extender below
        let horizon_end = match target {
            ExtendTarget::Horizon(horizon) => now.checked_add_signed(horizon).map(|end| (horizon, end)),
            ExtendTarget::Count(_) => None,
        };
        if let Some((horizon, end)) = horizon_end {
            match calculate_rotations_to_cover(end, &snapshot.history) {
                Some(0) => {
                    command_info!(
                        CommandId::current(),
                        "Current rotations already cover the next {} weeks; no new rotations needed",
                        horizon.num_weeks()
                    );
                }
                Some(needed) => logging::log_progress(
                    CommandId::current(),
                    "Ensuring coverage",
                    &format!(
                        "{} weeks with {} rotations ({} weeks per rotation)",
                        horizon.num_weeks(),
                        needed,
                        self.config.rotation_length_weeks
                    ),
                ),
                None => logging::log_progress(
                    CommandId::current(),
                    "Starting a new schedule",
                    &format!("covering {} weeks", horizon.num_weeks()),
                ),
            }
        }

        let extender = RotationExtender::from_config(&self.config);
        let extension = extender.extend(&snapshot.roster, &snapshot.history, now, target)?;

        if let ExtensionState::Aborted(shortfall) = &extension.state {
            command_warn!(
                CommandId::current(),
                "Stopped after {} new rotations: {}",
                extension.appended,
                shortfall
            );
        }

        let committed = if extension.appended == 0 || dry_run {
            false
        } else {
            self.store
                .save_rotations(&RotationFile::from_history(&extension.history))
                .await?;
            logging::log_success(
                CommandId::current(),
                &format!(
                    "Wrote {} new rotations to {}",
                    extension.appended,
                    self.store.rotations_location()
                ),
            );
            true
        };

        Ok(ExtendReport {
            extension,
            committed,
        })
    }

    /// Report who is on call at `at` and whether the schedule runs short
    pub async fn status(&self, at: DateTime<Utc>) -> RotationResult<ScheduleStatus> {
        let rotations = self.store.load_rotations().await?;
        let history = rotations.to_history(self.config.period())?;
        let status = ScheduleStatus::evaluate(&history, at, self.config.nag_window());

        if status.running_short {
            command_warn!(
                CommandId::current(),
                "Rotation schedule is running short; please extend it"
            );
        }
        Ok(status)
    }

    /// Check that both documents load and agree with each other
    pub async fn verify(&self, now: DateTime<Utc>) -> RotationResult<VerifyReport> {
        let snapshot = self.load_snapshot().await?;

        if snapshot.roster.is_empty() {
            return Err(RotationError::config(
                "members_file",
                "no rotation members could be parsed",
            ));
        }
        if snapshot.history.is_empty() {
            return Err(RotationError::config(
                "rotation_file",
                "no rotations could be parsed",
            ));
        }
        snapshot.history.check_roster(&snapshot.roster, now)?;

        Ok(VerifyReport {
            members: snapshot.roster.len(),
            rotations: snapshot.history.len(),
        })
    }
}
