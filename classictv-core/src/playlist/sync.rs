use std::{any::type_name_of_val, fmt, sync::Arc};

use classictv_model::{
    EpisodeID, NewPlaylist, PlaylistID, PlaylistRecord, UserRef,
};
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::ports::PlaylistStore;

/// What a sync did for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No items to write; the store was not touched.
    Skipped,
    /// A fresh playlist was created. `replaced` lists the stale playlists of
    /// the same name that were removed first.
    Created {
        playlist: PlaylistRecord,
        replaced: Vec<PlaylistID>,
    },
}

/// Keeps exactly one playlist of a given name per user, holding the latest
/// mix. Existing playlists are replaced (delete, then create) rather than
/// edited in place, so each sync yields a new playlist identity.
#[derive(Clone)]
pub struct PlaylistSync<P>
where
    P: PlaylistStore + ?Sized,
{
    store: Arc<P>,
}

impl<P> fmt::Debug for PlaylistSync<P>
where
    P: PlaylistStore + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaylistSync")
            .field("store", &type_name_of_val(self.store.as_ref()))
            .finish()
    }
}

impl<P> PlaylistSync<P>
where
    P: PlaylistStore + ?Sized,
{
    pub fn new(store: Arc<P>) -> Self {
        Self { store }
    }

    /// Replace `owner`'s playlist called `name` with one holding `items`.
    ///
    /// Lookup and delete failures are logged and do not stop the create
    /// step. Only a failed create is returned as an error.
    pub async fn sync(
        &self,
        owner: &UserRef,
        name: &str,
        items: Vec<EpisodeID>,
    ) -> Result<SyncOutcome> {
        if items.is_empty() {
            info!(
                user = %owner.name,
                playlist = name,
                "no episodes to write, skipping playlist sync"
            );
            return Ok(SyncOutcome::Skipped);
        }

        let stale_playlists = self.find_matching(owner, name).await;
        let found_stale = !stale_playlists.is_empty();
        let mut replaced = Vec::new();
        for stale in stale_playlists {
            info!(
                user = %owner.name,
                playlist = name,
                playlist_id = %stale.id,
                "found existing playlist, deleting it"
            );
            match self.store.delete_playlist(&stale).await {
                Ok(()) => {
                    info!(
                        user = %owner.name,
                        playlist = name,
                        "deleted playlist"
                    );
                    replaced.push(stale.id);
                }
                Err(err) => error!(
                    user = %owner.name,
                    playlist = name,
                    error = %err,
                    "error deleting playlist"
                ),
            }
        }

        if found_stale
            && !self.find_matching(owner, name).await.is_empty()
        {
            warn!(
                user = %owner.name,
                playlist = name,
                "playlist still exists after deletion"
            );
        }

        info!(
            user = %owner.name,
            playlist = name,
            episodes = items.len(),
            "creating playlist"
        );
        let request = NewPlaylist::new(owner.id, name, items)?;
        let playlist = self.store.create_playlist(request).await?;
        info!(
            user = %owner.name,
            playlist = name,
            playlist_id = %playlist.id,
            episodes = playlist.items.len(),
            "playlist created"
        );

        Ok(SyncOutcome::Created { playlist, replaced })
    }

    /// Playlists owned by `owner` whose name matches `name`. A failed lookup
    /// is logged and treated as "none found".
    async fn find_matching(
        &self,
        owner: &UserRef,
        name: &str,
    ) -> Vec<PlaylistRecord> {
        let owned = match self.store.playlists_owned_by(owner.id).await {
            Ok(owned) => owned,
            Err(err) => {
                warn!(
                    user = %owner.name,
                    error = %err,
                    "error while checking existing playlists"
                );
                return Vec::new();
            }
        };

        for playlist in &owned {
            debug!(
                user = %owner.name,
                playlist = %playlist.name,
                "found playlist"
            );
        }

        let matching: Vec<PlaylistRecord> = owned
            .into_iter()
            .filter(|playlist| playlist.matches_name(name))
            .collect();
        if matching.is_empty() {
            debug!(
                user = %owner.name,
                playlist = name,
                "no existing playlist with this name"
            );
        }
        matching
    }
}
