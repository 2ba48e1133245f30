use std::path::PathBuf;

use classictv_core::{GenerationConfig, MAX_EPISODES};
use classictv_core::playlist::PlaylistNaming;
use serde::{Deserialize, Serialize};

fn default_max_episodes() -> usize {
    MAX_EPISODES
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "built-in defaults"),
            ConfigSource::EnvPath(path) => {
                write!(f, "{} (from environment)", path.display())
            }
            ConfigSource::EnvInline => write!(f, "inline JSON (environment)"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Location of the host library the CLI operates on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// JSON snapshot holding series, episodes, users and playlists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

/// Operator-facing settings. Every field has a default so partial files
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassicTvConfig {
    /// Series to interleave, in the order they should appear in each round.
    pub series_ids: Vec<String>,
    /// Users that get a playlist.
    pub user_ids: Vec<String>,
    pub naming: PlaylistNaming,
    /// Upper bound on playlist length.
    #[serde(default = "default_max_episodes")]
    pub max_episodes: usize,
    pub library: LibraryConfig,
}

impl Default for ClassicTvConfig {
    fn default() -> Self {
        Self {
            series_ids: Vec::new(),
            user_ids: Vec::new(),
            naming: PlaylistNaming::default(),
            max_episodes: MAX_EPISODES,
            library: LibraryConfig::default(),
        }
    }
}

impl ClassicTvConfig {
    /// The run inputs handed to the generator.
    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig::new(
            self.series_ids.iter().cloned(),
            self.user_ids.iter().cloned(),
        )
        .with_naming(self.naming)
        .with_max_episodes(self.max_episodes)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_carries_every_run_setting() {
        let config = ClassicTvConfig {
            series_ids: vec!["a".into(), "b".into()],
            user_ids: vec!["u".into()],
            naming: PlaylistNaming::Shared,
            max_episodes: 50,
            library: LibraryConfig::default(),
        };

        let generation = config.generation();

        assert_eq!(generation.series_ids, vec!["a", "b"]);
        assert_eq!(generation.user_ids, vec!["u"]);
        assert_eq!(generation.naming, PlaylistNaming::Shared);
        assert_eq!(generation.max_episodes, 50);
    }

    #[test]
    fn toml_output_uses_snake_case_naming() {
        let text = ClassicTvConfig::default()
            .to_toml_string()
            .expect("serialize");
        assert!(text.contains("naming = \"per_user\""), "{text}");
        assert!(text.contains("max_episodes = 1000"), "{text}");
    }
}
