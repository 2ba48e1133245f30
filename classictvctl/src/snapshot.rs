//! JSON library snapshot: the host adapter used by `classictvctl`.
//!
//! A snapshot holds series with their episodes, users and playlists. Hosts
//! export watch state in more than one shape, so each episode keeps its raw
//! `watch_state` value and [`watch_state_from_json`] normalises it into an
//! [`EpisodeWatchState`] when the catalog is built. Only the `playlists`
//! list is rewritten when a run is saved.

use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use classictv_core::infra::{
    InMemoryCatalog, InMemoryPlaylistStore, InMemoryUserDirectory,
};
use classictv_model::{
    CatalogItem, Episode, EpisodeID, EpisodeNumber, EpisodeWatchState,
    PlaylistRecord, SeasonNumber, Series, SeriesID, UserID, UserPlayState,
    UserRef,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read library snapshot {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid library snapshot {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SnapshotEpisode {
    pub id: EpisodeID,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub season: Option<u16>,
    #[serde(
        default,
        deserialize_with = "lenient_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub episode: Option<u16>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub watch_state: Value,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SnapshotSeries {
    pub id: SeriesID,
    pub name: String,
    #[serde(default)]
    pub episodes: Vec<SnapshotEpisode>,
}

/// Catalog entry that is not a series (a movie, a folder).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SnapshotItem {
    pub id: Uuid,
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySnapshot {
    pub series: Vec<SnapshotSeries>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_items: Vec<SnapshotItem>,
    pub users: Vec<UserRef>,
    pub playlists: Vec<PlaylistRecord>,
}

/// Port implementations backed by one snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotStores {
    pub catalog: Arc<InMemoryCatalog>,
    pub users: Arc<InMemoryUserDirectory>,
    pub playlists: Arc<InMemoryPlaylistStore>,
}

impl LibrarySnapshot {
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let contents =
            fs::read_to_string(path).map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&contents).map_err(|source| {
            SnapshotError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Write the snapshot next to `path` and rename it into place.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to stage {}", path.display()))?;
        serde_json::to_writer_pretty(&mut file, self)?;
        file.write_all(b"\n")?;
        file.persist(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn series_names(&self) -> HashMap<SeriesID, String> {
        self.series
            .iter()
            .map(|series| (series.id, series.name.clone()))
            .collect()
    }

    /// Build the in-memory ports this snapshot describes.
    pub async fn stores(&self) -> SnapshotStores {
        let catalog = Arc::new(InMemoryCatalog::new());
        for series in &self.series {
            let episodes = series
                .episodes
                .iter()
                .map(|episode| episode.to_episode(series.id))
                .collect();
            catalog
                .insert_series(Series::new(series.id, &series.name), episodes)
                .await;
        }
        for item in &self.other_items {
            catalog
                .insert_item(
                    item.id,
                    CatalogItem::Other {
                        id: item.id,
                        kind: item.kind.clone(),
                    },
                )
                .await;
        }
        debug!(
            series = self.series.len(),
            users = self.users.len(),
            playlists = self.playlists.len(),
            "library snapshot loaded"
        );

        SnapshotStores {
            catalog,
            users: Arc::new(InMemoryUserDirectory::new(
                self.users.iter().cloned(),
            )),
            playlists: Arc::new(InMemoryPlaylistStore::with_playlists(
                self.playlists.iter().cloned(),
            )),
        }
    }
}

impl SnapshotEpisode {
    fn to_episode(&self, series_id: SeriesID) -> Episode {
        let mut episode = Episode::new(self.id, series_id)
            .with_name(&self.name)
            .with_watch_state(watch_state_from_json(&self.watch_state));
        episode.season_number = self.season.map(SeasonNumber::new);
        episode.episode_number = self.episode.map(EpisodeNumber::new);
        if let EpisodeWatchState::Unreadable { reason } = &episode.watch_state
        {
            warn!(episode_id = %self.id, "unreadable watch state: {reason}");
        }
        episode
    }
}

/// Season or episode index as a host exported it. Integers outside the
/// `u16` range are clamped; anything that is not an integer counts as absent.
fn lenient_index<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(index_from_json))
}

fn index_from_json(value: &Value) -> Option<u16> {
    if let Some(n) = value.as_u64() {
        return Some(u16::try_from(n).unwrap_or(u16::MAX));
    }
    value.as_i64().map(|_| 0)
}

/// Normalise a host watch-state value.
///
/// Accepted shapes:
/// - `null` or absent: nothing attached
/// - `[{"user_id": "..", "played": true}, ..]`
/// - `{"<user id>": true, ..}`
/// - `{"<user id>": {"played": true}, ..}`
///
/// Anything else, including records with unparsable user ids, is kept as
/// [`EpisodeWatchState::Unreadable`].
pub fn watch_state_from_json(value: &Value) -> EpisodeWatchState {
    match value {
        Value::Null => EpisodeWatchState::Missing,
        Value::Array(_) => {
            match serde_json::from_value::<Vec<UserPlayState>>(value.clone()) {
                Ok(records) => EpisodeWatchState::Records(records),
                Err(err) => unreadable(format!("bad record list: {err}")),
            }
        }
        Value::Object(map) => {
            let mut records = Vec::with_capacity(map.len());
            for (raw_user, entry) in map {
                let Ok(user_id) = UserID::parse(raw_user) else {
                    return unreadable(format!("bad user id '{raw_user}'"));
                };
                let Some(played) = played_flag(entry) else {
                    return unreadable(format!(
                        "no played flag for user {raw_user}"
                    ));
                };
                records.push(UserPlayState { user_id, played });
            }
            EpisodeWatchState::Records(records)
        }
        other => unreadable(format!("unexpected value {other}")),
    }
}

/// `Some(flag)` when `entry` is a recognised per-user shape. A `null` flag
/// is recognised but carries no answer.
fn played_flag(entry: &Value) -> Option<Option<bool>> {
    match entry {
        Value::Bool(played) => Some(Some(*played)),
        Value::Null => Some(None),
        Value::Object(fields) => match fields.get("played") {
            Some(Value::Bool(played)) => Some(Some(*played)),
            Some(Value::Null) | None => Some(None),
            Some(_) => None,
        },
        _ => None,
    }
}

fn unreadable(reason: String) -> EpisodeWatchState {
    EpisodeWatchState::Unreadable { reason }
}
