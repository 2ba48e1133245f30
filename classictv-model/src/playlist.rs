use chrono::{DateTime, Utc};

use crate::error::ModelError;
use crate::ids::{EpisodeID, PlaylistID, UserID};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A playlist as persisted by the host's playlist store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaylistRecord {
    pub id: PlaylistID,
    pub owner: UserID,
    pub name: String,
    pub items: Vec<EpisodeID>,
    pub created_at: DateTime<Utc>,
}

impl PlaylistRecord {
    /// Name equality used to decide whether this is the playlist we manage:
    /// surrounding whitespace is ignored and case is folded.
    pub fn matches_name(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Creation request handed to the playlist store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NewPlaylist {
    pub owner: UserID,
    pub name: String,
    pub items: Vec<EpisodeID>,
}

impl NewPlaylist {
    pub fn new(
        owner: UserID,
        name: impl Into<String>,
        items: Vec<EpisodeID>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyName("playlist"));
        }
        Ok(Self { owner, name, items })
    }

    pub fn into_record(self, id: PlaylistID) -> PlaylistRecord {
        PlaylistRecord {
            id,
            owner: self.owner,
            name: self.name,
            items: self.items,
            created_at: Utc::now(),
        }
    }
}
