use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CovsetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed branch location key: '{0}'")]
    MalformedKey(String),

    #[error(
        "No resultset found in {} (tried coverage.json and .resultset.json)",
        .0.display()
    )]
    ResultsetNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, CovsetError>;
