use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("failed to read batch file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid prediction batch: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prediction batch is empty")]
    EmptyBatch,
}

pub type FeedResult<T> = std::result::Result<T, FeedError>;
