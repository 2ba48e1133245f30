//! Configuration for ClassicTV.
//!
//! Loads the series and user selection, playlist naming mode, episode cap and
//! library snapshot location from a TOML or JSON file (or inline JSON in the
//! environment), and turns suspicious values into warnings rather than
//! errors. A run with an empty selection is a no-op, not a failure.

#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{CONFIG_JSON_VAR, CONFIG_PATH_VAR, error::ConfigLoadError};
pub use models::{ClassicTvConfig, ConfigSource, LibraryConfig};
pub use validation::{ConfigWarning, ConfigWarnings};
