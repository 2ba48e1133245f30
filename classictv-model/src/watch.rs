//! Per-user watch state as the host attaches it to an episode.
//!
//! Hosts expose this data in different shapes and not always completely, so
//! the model keeps the "we could not tell" cases explicit instead of folding
//! them into a boolean.

use crate::ids::UserID;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Played flag recorded by the host for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserPlayState {
    pub user_id: UserID,
    /// `None` when the host returned a record without a readable flag.
    #[cfg_attr(feature = "serde", serde(default))]
    pub played: Option<bool>,
}

impl UserPlayState {
    pub fn new(user_id: UserID, played: bool) -> Self {
        Self {
            user_id,
            played: Some(played),
        }
    }
}

/// Watch-state attachment carried by an [`crate::Episode`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "state", content = "data", rename_all = "snake_case")
)]
pub enum EpisodeWatchState {
    /// The host attached nothing.
    #[default]
    Missing,
    /// The host attached something we could not interpret.
    Unreadable { reason: String },
    /// One record per user the host tracks for this episode.
    Records(Vec<UserPlayState>),
}

/// Result of asking an attachment about one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchLookup {
    Played,
    Unplayed,
    Indeterminate,
}

impl EpisodeWatchState {
    pub fn from_records(
        records: impl IntoIterator<Item = UserPlayState>,
    ) -> Self {
        EpisodeWatchState::Records(records.into_iter().collect())
    }

    /// Played state for `user_id`. Hosts may repeat a user; the first of
    /// its records that carries a flag decides.
    pub fn lookup(&self, user_id: &UserID) -> WatchLookup {
        let EpisodeWatchState::Records(records) = self else {
            return WatchLookup::Indeterminate;
        };

        match records
            .iter()
            .filter(|record| &record.user_id == user_id)
            .find_map(|record| record.played)
        {
            Some(true) => WatchLookup::Played,
            Some(false) => WatchLookup::Unplayed,
            None => WatchLookup::Indeterminate,
        }
    }
}
