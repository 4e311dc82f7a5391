use std::path::PathBuf;

use thiserror::Error;

/// Failure to write progression to durable storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create save directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize progression: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write save file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
