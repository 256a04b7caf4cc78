//! Error types for rush-presets

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] rush_fs::Error),

    #[error("Failed to serialize lint profile: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown lint profile \"{name}\" (available: {available})")]
    UnknownProfile { name: String, available: String },

    #[error("{path} already exists; pass force to overwrite it")]
    AlreadyExists { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
