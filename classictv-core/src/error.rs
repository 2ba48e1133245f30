use classictv_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassicTvError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("User directory error: {0}")]
    Users(String),

    #[error("Playlist store error: {0}")]
    PlaylistStore(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, ClassicTvError>;
