//! Locating and parsing the configuration file.

pub mod error;

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::anyhow;
use tracing::{debug, info};

use crate::models::{ClassicTvConfig, ConfigSource};
use error::ConfigLoadError;

/// Path to a TOML or JSON configuration file.
pub const CONFIG_PATH_VAR: &str = "CLASSICTV_CONFIG_PATH";
/// Whole configuration as inline JSON.
pub const CONFIG_JSON_VAR: &str = "CLASSICTV_CONFIG_JSON";

const CANDIDATES: &[&str] = &[
    "classictv.toml",
    "classictv.json",
    "config/classictv.toml",
    "config/classictv.json",
];

impl ClassicTvConfig {
    /// Load configuration using environment variables.
    /// Evaluation order:
    /// 1) `$CLASSICTV_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$CLASSICTV_CONFIG_JSON` (inline JSON),
    /// 3) the first existing default file in the working directory,
    /// 4) defaults.
    pub fn load_from_env()
    -> Result<(Self, ConfigSource), ConfigLoadError> {
        Self::load_with(|key| env::var(key).ok(), Path::new("."))
    }

    /// Same as [`load_from_env`](Self::load_from_env) with an explicit
    /// variable lookup and base directory for the default candidates.
    pub fn load_with(
        lookup: impl Fn(&str) -> Option<String>,
        base_dir: &Path,
    ) -> Result<(Self, ConfigSource), ConfigLoadError> {
        if let Some(path_str) = lookup(CONFIG_PATH_VAR)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str.trim());
            if !path.exists() {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            let config = Self::load_from_file(&path)?;
            info!(path = %path.display(), "loaded configuration");
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = lookup(CONFIG_JSON_VAR)
            && !raw.trim().is_empty()
        {
            let config = Self::parse_json(&raw, CONFIG_JSON_VAR)?;
            info!("loaded configuration from {CONFIG_JSON_VAR}");
            return Ok((config, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(base_dir) {
            let config = Self::load_from_file(&path)?;
            info!(path = %path.display(), "loaded configuration");
            return Ok((config, ConfigSource::File(path)));
        }

        debug!("no configuration found, using defaults");
        Ok((Self::default(), ConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                Self::parse_json(&contents, &path.display().to_string())
            }
            Some("toml") | Some("tml") => toml::from_str(&contents)
                .map_err(|source| ConfigLoadError::ParseToml {
                    path: path.to_path_buf(),
                    source,
                }),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    /// Parse text of unknown format, trying TOML first and then JSON.
    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> Result<Self, ConfigLoadError> {
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                ConfigLoadError::Unrecognised {
                    origin: origin.to_string(),
                    source: anyhow!(
                        "toml error: {toml_err}; json error: {json_err}"
                    ),
                }
            })
        })
    }

    pub fn parse_json(raw: &str, origin: &str) -> Result<Self, ConfigLoadError> {
        serde_json::from_str(raw).map_err(|source| ConfigLoadError::ParseJson {
            origin: origin.to_string(),
            source,
        })
    }

    fn find_default_file(base_dir: &Path) -> Option<PathBuf> {
        CANDIDATES
            .iter()
            .map(|candidate| base_dir.join(candidate))
            .find(|path| path.exists())
    }
}
