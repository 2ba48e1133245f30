use classictv_model::{PlaylistID, UserRef};
use serde::Serialize;

/// Why a run did nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoOpReason {
    NoSeriesConfigured,
    NoUsersConfigured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum RunStatus {
    /// Configuration was empty; no user was attempted.
    NoOp(NoOpReason),
    /// Every configured user was attempted (or skipped after cancellation).
    Completed,
}

/// Why a single user produced no playlist without anything going wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    InvalidUserId,
    UserNotFound,
    NoUnwatchedEpisodes,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UserOutcome {
    Synced {
        user: UserRef,
        playlist_name: String,
        playlist_id: PlaylistID,
        episodes: usize,
        replaced: usize,
    },
    Skipped {
        reason: SkipReason,
    },
    Failed {
        reason: String,
    },
}

impl UserOutcome {
    pub fn skipped(reason: SkipReason) -> Self {
        UserOutcome::Skipped { reason }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserReport {
    /// The user identifier exactly as configured.
    pub configured_id: String,
    #[serde(flatten)]
    pub outcome: UserOutcome,
}

/// Aggregate result of one run, one entry per configured user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub status: RunStatus,
    pub users: Vec<UserReport>,
}

impl GenerationReport {
    pub fn no_op(reason: NoOpReason) -> Self {
        Self {
            status: RunStatus::NoOp(reason),
            users: Vec::new(),
        }
    }

    pub fn is_no_op(&self) -> bool {
        matches!(self.status, RunStatus::NoOp(_))
    }

    pub fn synced(&self) -> usize {
        self.count(|outcome| matches!(outcome, UserOutcome::Synced { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, UserOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, UserOutcome::Failed { .. }))
    }

    pub fn was_cancelled(&self) -> bool {
        self.users.iter().any(|report| {
            report.outcome == UserOutcome::skipped(SkipReason::Cancelled)
        })
    }

    pub fn outcome_for(&self, configured_id: &str) -> Option<&UserOutcome> {
        self.users
            .iter()
            .find(|report| report.configured_id == configured_id)
            .map(|report| &report.outcome)
    }

    fn count(&self, predicate: impl Fn(&UserOutcome) -> bool) -> usize {
        self.users
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}
