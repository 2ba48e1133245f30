//! Core data model definitions shared across ClassicTV crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod media;
pub mod numbers;
pub mod playlist;
pub mod user;
pub mod watch;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use ids::{EpisodeID, PlaylistID, SeriesID, UserID};
pub use media::{CatalogItem, Episode, Series};
pub use numbers::{EpisodeNumber, SeasonNumber};
pub use playlist::{NewPlaylist, PlaylistRecord};
pub use user::UserRef;
pub use watch::{EpisodeWatchState, UserPlayState, WatchLookup};
