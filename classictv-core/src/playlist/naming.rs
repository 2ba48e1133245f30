use classictv_model::UserRef;
use serde::{Deserialize, Serialize};

pub const PLAYLIST_NAME_PREFIX: &str = "ClassicTV Playlist";

/// How generated playlists are named.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistNaming {
    /// `"ClassicTV Playlist - {user name}"`
    #[default]
    PerUser,
    /// `"ClassicTV Playlist"` for every user
    Shared,
}

impl PlaylistNaming {
    pub fn playlist_name(&self, user: &UserRef) -> String {
        match self {
            PlaylistNaming::PerUser => {
                format!("{PLAYLIST_NAME_PREFIX} - {}", user.name)
            }
            PlaylistNaming::Shared => PLAYLIST_NAME_PREFIX.to_string(),
        }
    }
}
