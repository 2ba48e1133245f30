//! # ClassicTV Core
//!
//! Builds "classic TV" playlists: for every configured user, the unwatched
//! episodes of a configured set of series are put into viewing order,
//! interleaved one episode per series at a time, capped, and written back to
//! the host as a single named playlist that replaces the previous one.
//!
//! ## Architecture
//!
//! - [`ports`]: async traits for the host catalog, user directory and
//!   playlist persistence
//! - [`infra`]: in-memory implementations of those ports
//! - [`episodes`]: canonical ordering, the unwatched filter and per-series
//!   collection
//! - [`mix`]: the round-robin mixer
//! - [`playlist`]: naming and create-or-replace sync
//! - [`generation`]: the per-user orchestrator, its config and report
//! - [`task`]: the scheduled-task descriptor
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use classictv_core::generation::{GenerationConfig, PlaylistGenerator};
//! use classictv_core::infra::{
//!     InMemoryCatalog, InMemoryPlaylistStore, InMemoryUserDirectory,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! async fn run_once() {
//!     let generator = PlaylistGenerator::new(
//!         Arc::new(InMemoryCatalog::new()),
//!         Arc::new(InMemoryUserDirectory::default()),
//!         Arc::new(InMemoryPlaylistStore::new()),
//!     );
//!     let config = GenerationConfig::new(
//!         ["6f1c2a9e-2d3b-4c5d-8e7f-0a1b2c3d4e5f"],
//!         ["0b7e4c1d-9a8f-4e2d-b3c4-5d6e7f8a9b0c"],
//!     );
//!     let report = generator.run(&config, &CancellationToken::new()).await;
//!     println!("synced {} users", report.synced());
//! }
//! ```

#![allow(missing_docs)]

/// Error types shared by every component
pub mod error;

/// Collaborator interfaces implemented by the host
pub mod ports;

/// In-memory port implementations
pub mod infra;

pub mod episodes;
pub mod generation;
pub mod mix;
pub mod playlist;
pub mod task;

pub use error::{ClassicTvError, Result};
pub use generation::{GenerationConfig, GenerationReport, PlaylistGenerator};
pub use mix::{MAX_EPISODES, MixedPlaylist, RoundRobinMixer};
pub use task::GeneratePlaylistTask;
