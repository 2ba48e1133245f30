use serde::{Deserialize, Serialize};

use crate::mix::MAX_EPISODES;
use crate::playlist::PlaylistNaming;

fn default_max_episodes() -> usize {
    MAX_EPISODES
}

/// Inputs for one generation run. Loaded once by the host and passed in
/// explicitly; it does not change while the run is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Series identifiers, in the order their episodes should interleave.
    pub series_ids: Vec<String>,
    /// Users to build playlists for, processed in this order.
    pub user_ids: Vec<String>,
    pub naming: PlaylistNaming,
    /// Cap on the number of episodes per generated playlist. Never more
    /// than [`MAX_EPISODES`], whatever is configured.
    #[serde(default = "default_max_episodes")]
    pub max_episodes: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            series_ids: Vec::new(),
            user_ids: Vec::new(),
            naming: PlaylistNaming::default(),
            max_episodes: MAX_EPISODES,
        }
    }
}

impl GenerationConfig {
    pub fn new(
        series_ids: impl IntoIterator<Item = impl Into<String>>,
        user_ids: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            series_ids: series_ids.into_iter().map(Into::into).collect(),
            user_ids: user_ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_naming(mut self, naming: PlaylistNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_max_episodes(mut self, max_episodes: usize) -> Self {
        self.max_episodes = max_episodes;
        self
    }
}
