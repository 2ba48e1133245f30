//! Materialising a mixed episode sequence as a named, user-owned playlist.

pub mod naming;
pub mod sync;

pub use naming::{PLAYLIST_NAME_PREFIX, PlaylistNaming};
pub use sync::{PlaylistSync, SyncOutcome};
