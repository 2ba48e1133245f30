use crate::ids::{EpisodeID, SeriesID};
use crate::numbers::{EpisodeNumber, SeasonNumber};
use crate::watch::EpisodeWatchState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A show as the catalog knows it. Episodes stay owned by the catalog and are
/// fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Series {
    pub id: SeriesID,
    pub name: String,
}

impl Series {
    pub fn new(id: SeriesID, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A single playable episode.
///
/// `series_id` is a plain back-reference; the episode never owns its series.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Episode {
    pub id: EpisodeID,
    pub series_id: SeriesID,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub season_number: Option<SeasonNumber>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub episode_number: Option<EpisodeNumber>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub watch_state: EpisodeWatchState,
}

impl Episode {
    pub fn new(id: EpisodeID, series_id: SeriesID) -> Self {
        Self {
            id,
            series_id,
            name: String::new(),
            season_number: None,
            episode_number: None,
            watch_state: EpisodeWatchState::Missing,
        }
    }

    pub fn with_position(mut self, season: u16, episode: u16) -> Self {
        self.season_number = Some(SeasonNumber::new(season));
        self.episode_number = Some(EpisodeNumber::new(episode));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_watch_state(mut self, state: EpisodeWatchState) -> Self {
        self.watch_state = state;
        self
    }

    /// Canonical `(season, episode)` position, absent indices counting as 0.
    pub fn position(&self) -> (u16, u16) {
        (
            self.season_number.map(|s| s.value()).unwrap_or(0),
            self.episode_number.map(|e| e.value()).unwrap_or(0),
        )
    }
}

/// Whatever the catalog resolves an identifier to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum CatalogItem {
    Series(Series),
    Episode(Episode),
    /// Movies, folders, music and anything else that is not a series.
    Other { id: uuid::Uuid, kind: String },
}

impl CatalogItem {
    pub fn into_series(self) -> Option<Series> {
        match self {
            CatalogItem::Series(series) => Some(series),
            _ => None,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            CatalogItem::Series(_) => "series",
            CatalogItem::Episode(_) => "episode",
            CatalogItem::Other { kind, .. } => kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_indices_sort_as_zero() {
        let series = SeriesID::new();
        let bare = Episode::new(EpisodeID::new(), series);
        let placed = Episode::new(EpisodeID::new(), series).with_position(2, 5);

        assert_eq!(bare.position(), (0, 0));
        assert_eq!(placed.position(), (2, 5));
    }
}
