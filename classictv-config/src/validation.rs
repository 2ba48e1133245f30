//! Non-fatal checks over a loaded [`ClassicTvConfig`].

use std::collections::HashSet;

use classictv_core::MAX_EPISODES;
use classictv_model::{ModelError, SeriesID, UserID};

use crate::models::ClassicTvConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl ClassicTvConfig {
    /// Check the configuration. Nothing found here stops a run; invalid
    /// entries are skipped at run time and an empty selection is a no-op.
    pub fn validate(&self) -> ConfigWarnings {
        let mut warnings = ConfigWarnings::default();

        if self.series_ids.is_empty() {
            warnings.push_with_hint(
                "No series configured; generation will do nothing",
                "Add series identifiers to `series_ids`",
            );
        }
        if self.user_ids.is_empty() {
            warnings.push_with_hint(
                "No users configured; generation will do nothing",
                "Add user identifiers to `user_ids`",
            );
        }

        check_ids("series", &self.series_ids, SeriesID::parse, &mut warnings);
        check_ids("user", &self.user_ids, UserID::parse, &mut warnings);

        if self.max_episodes == 0 {
            warnings.push_with_hint(
                "max_episodes is 0; every generated playlist will be empty",
                "Remove `max_episodes` to use the default of 1000",
            );
        } else if self.max_episodes > MAX_EPISODES {
            warnings.push_with_hint(
                format!(
                    "max_episodes is {}; playlists are capped at \
                     {MAX_EPISODES}",
                    self.max_episodes
                ),
                format!("Set `max_episodes` to {MAX_EPISODES} or less"),
            );
        }

        warnings
    }
}

fn check_ids<T>(
    kind: &str,
    raw_ids: &[String],
    parse: impl Fn(&str) -> Result<T, ModelError>,
    warnings: &mut ConfigWarnings,
) where
    T: Eq + std::hash::Hash,
{
    let mut seen = HashSet::new();
    for raw in raw_ids {
        match parse(raw) {
            Ok(id) => {
                if !seen.insert(id) {
                    warnings.push(format!(
                        "{kind} id '{raw}' is listed more than once"
                    ));
                }
            }
            Err(_) => warnings.push_with_hint(
                format!("{kind} id '{raw}' is not a valid identifier"),
                "It will be skipped on every run",
            ),
        }
    }
}
