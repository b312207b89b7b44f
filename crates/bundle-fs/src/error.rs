//! Error types for bundle-fs

use std::path::PathBuf;

/// Result type for bundle-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bundle-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    /// Opaque failure reported by a storage gateway. Displays the bare message.
    #[error("{message}")]
    Storage { message: String },

    #[error(transparent)]
    Path(#[from] PathError),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound { path };
        }
        Self::Io { path, source }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// Rejections produced while normalizing or classifying a bundle path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("{path} is not a .toml file")]
    NotToml { path: String },

    #[error("{path} contains an invalid segment {segment:?}")]
    InvalidSegment { path: String, segment: String },

    #[error("{path} is not a supported bundle file")]
    NotWhitelisted { path: String },

    #[error("file name {file_name} matches several bundle files: {}", candidates.join(", "))]
    AmbiguousFileName {
        file_name: String,
        candidates: Vec<String>,
    },

    #[error("{path} is listed more than once")]
    DuplicatePath { path: String },

    #[error("required file list does not include {path}")]
    MissingManifestPath { path: String },
}
