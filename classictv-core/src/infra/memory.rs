//! In-memory implementations of the collaborator ports.
//!
//! Used by tests and by hosts that load a library snapshot up front (the
//! `classictvctl` JSON adapter builds these from a file).

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use classictv_model::{
    CatalogItem, Episode, NewPlaylist, PlaylistID, PlaylistRecord, Series,
    SeriesID, UserID, UserRef,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{ClassicTvError, Result};
use crate::ports::{CatalogStore, PlaylistStore, UserDirectory};

#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    items: Arc<Mutex<HashMap<Uuid, CatalogItem>>>,
    episodes: Arc<Mutex<HashMap<SeriesID, Vec<Episode>>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a series together with its episodes. Episodes are returned
    /// by [`CatalogStore::episodes_of`] in the order given here.
    pub async fn insert_series(&self, series: Series, episodes: Vec<Episode>) {
        let id = series.id;
        self.items
            .lock()
            .await
            .insert(id.to_uuid(), CatalogItem::Series(series));
        self.episodes.lock().await.insert(id, episodes);
    }

    /// Register a non-series item (movie, folder, ...) under `id`.
    pub async fn insert_item(&self, id: Uuid, item: CatalogItem) {
        self.items.lock().await.insert(id, item);
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn resolve_by_id(
        &self,
        id: SeriesID,
    ) -> Result<Option<CatalogItem>> {
        Ok(self.items.lock().await.get(id.as_uuid()).cloned())
    }

    async fn episodes_of(&self, series: &Series) -> Result<Vec<Episode>> {
        Ok(self
            .episodes
            .lock()
            .await
            .get(&series.id)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<Mutex<Vec<UserRef>>>,
}

impl InMemoryUserDirectory {
    pub fn new(users: impl IntoIterator<Item = UserRef>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users.into_iter().collect())),
        }
    }

    pub async fn insert(&self, user: UserRef) {
        self.users.lock().await.push(user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn all_users(&self) -> Result<Vec<UserRef>> {
        Ok(self.users.lock().await.clone())
    }

    async fn user_by_id(&self, id: UserID) -> Result<Option<UserRef>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }
}

/// Number of calls an [`InMemoryPlaylistStore`] has served.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaylistStoreCalls {
    pub lists: usize,
    pub deletes: usize,
    pub creates: usize,
}

impl PlaylistStoreCalls {
    pub fn writes(&self) -> usize {
        self.deletes + self.creates
    }
}

#[derive(Debug, Default)]
struct CallCounters {
    lists: AtomicUsize,
    deletes: AtomicUsize,
    creates: AtomicUsize,
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryPlaylistStore {
    playlists: Arc<Mutex<Vec<PlaylistRecord>>>,
    calls: Arc<CallCounters>,
}

impl InMemoryPlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlists(
        playlists: impl IntoIterator<Item = PlaylistRecord>,
    ) -> Self {
        Self {
            playlists: Arc::new(Mutex::new(playlists.into_iter().collect())),
            calls: Arc::default(),
        }
    }

    /// Every stored playlist, in creation order.
    pub async fn snapshot(&self) -> Vec<PlaylistRecord> {
        self.playlists.lock().await.clone()
    }

    pub fn calls(&self) -> PlaylistStoreCalls {
        PlaylistStoreCalls {
            lists: self.calls.lists.load(Ordering::Relaxed),
            deletes: self.calls.deletes.load(Ordering::Relaxed),
            creates: self.calls.creates.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl PlaylistStore for InMemoryPlaylistStore {
    async fn playlists_owned_by(
        &self,
        owner: UserID,
    ) -> Result<Vec<PlaylistRecord>> {
        self.calls.lists.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .playlists
            .lock()
            .await
            .iter()
            .filter(|playlist| playlist.owner == owner)
            .cloned()
            .collect())
    }

    async fn delete_playlist(&self, playlist: &PlaylistRecord) -> Result<()> {
        self.calls.deletes.fetch_add(1, Ordering::Relaxed);
        let mut guard = self.playlists.lock().await;
        let before = guard.len();
        guard.retain(|existing| existing.id != playlist.id);
        if guard.len() == before {
            return Err(ClassicTvError::PlaylistStore(format!(
                "playlist {} does not exist",
                playlist.id
            )));
        }
        Ok(())
    }

    async fn create_playlist(
        &self,
        request: NewPlaylist,
    ) -> Result<PlaylistRecord> {
        self.calls.creates.fetch_add(1, Ordering::Relaxed);
        let record = request.into_record(PlaylistID::new());
        self.playlists.lock().await.push(record.clone());
        Ok(record)
    }
}
