//! Round-robin interleaving across series.

use classictv_model::{Episode, EpisodeID};

use crate::episodes::SeriesEpisodeMap;

/// Upper bound on the length of a generated playlist.
pub const MAX_EPISODES: usize = 1000;

/// Flat, bounded sequence of episodes produced for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MixedPlaylist {
    episodes: Vec<Episode>,
}

impl MixedPlaylist {
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn item_ids(&self) -> Vec<EpisodeID> {
        self.episodes.iter().map(|episode| episode.id).collect()
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobinMixer {
    max_episodes: usize,
}

impl Default for RoundRobinMixer {
    fn default() -> Self {
        Self::new(MAX_EPISODES)
    }
}

impl RoundRobinMixer {
    /// A mixer stopping at `max_episodes`. Values above [`MAX_EPISODES`]
    /// are clamped to it.
    pub fn new(max_episodes: usize) -> Self {
        Self {
            max_episodes: max_episodes.min(MAX_EPISODES),
        }
    }

    pub fn max_episodes(&self) -> usize {
        self.max_episodes
    }

    /// Interleave series one episode at a time, in map order.
    ///
    /// Each round visits every series once and takes its next episode if it
    /// has one. Exhausted series drop out while longer ones keep going, and
    /// the first round that yields nothing ends the mix. Output stops at the
    /// cap even in the middle of a round.
    pub fn mix(&self, by_series: &SeriesEpisodeMap) -> MixedPlaylist {
        let total: usize = by_series.values().map(Vec::len).sum();
        let mut episodes = Vec::with_capacity(total.min(self.max_episodes));
        let mut cursors = vec![0usize; by_series.len()];

        'rounds: loop {
            let mut yielded = false;
            for (cursor, series) in cursors.iter_mut().zip(by_series.values())
            {
                if episodes.len() >= self.max_episodes {
                    break 'rounds;
                }
                if let Some(episode) = series.get(*cursor) {
                    episodes.push(episode.clone());
                    *cursor += 1;
                    yielded = true;
                }
            }
            if !yielded {
                break;
            }
        }

        MixedPlaylist { episodes }
    }
}
