//! Collaborator ports (interfaces) the core consumes from its host.
//!
//! The host platform owns the catalog, the user directory and playlist
//! persistence. A thin adapter outside the core translates whatever concrete
//! host API is present into these shapes; nothing in the core branches on the
//! host's version.

pub mod catalog;
pub mod playlists;
pub mod users;

pub use catalog::CatalogStore;
pub use playlists::PlaylistStore;
pub use users::UserDirectory;
