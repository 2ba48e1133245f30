use async_trait::async_trait;
use classictv_model::{NewPlaylist, PlaylistRecord, UserID};

use crate::error::Result;

// Playlist persistence owned by the host
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    async fn playlists_owned_by(
        &self,
        owner: UserID,
    ) -> Result<Vec<PlaylistRecord>>;
    async fn delete_playlist(&self, playlist: &PlaylistRecord) -> Result<()>;
    async fn create_playlist(
        &self,
        request: NewPlaylist,
    ) -> Result<PlaylistRecord>;
}
