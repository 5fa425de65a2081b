//! Application error types.

use std::path::PathBuf;

use sgf_core::SgfError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to access config at {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("not a directory: {0}")]
    DirectoryMissing(String),

    #[error("directory already indexed: {0}")]
    DirectoryListed(String),

    #[error("directory {dir} is inside indexed directory {parent}")]
    DirectoryNested { dir: String, parent: String },

    #[error("directory {dir} contains indexed directories: {}", .children.join(", "))]
    DirectoryContains { dir: String, children: Vec<String> },

    #[error("directory not indexed: {0}")]
    DirectoryNotListed(String),

    #[error(transparent)]
    Sgf(#[from] SgfError),
}
