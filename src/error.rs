//! Error type shared by the loader, serializer, file transaction and config layers.
//!
//! Validation findings are not errors; see `models::Warning`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocodeError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unable to write to file: {}", .0.display())]
    Unwritable(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl LocodeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LocodeError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LocodeError>;
