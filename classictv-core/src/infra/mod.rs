pub mod memory;

pub use memory::{
    InMemoryCatalog, InMemoryPlaylistStore, InMemoryUserDirectory,
    PlaylistStoreCalls,
};
