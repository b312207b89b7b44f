//! Error types for bundle-core

use std::path::PathBuf;

/// Result type for bundle-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside a transfer operation: manifest loading, settings,
/// logging setup.
///
/// Transfer operations report [`crate::TransferError`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Manifest content does not describe a usable bundle
    #[error("Invalid bundle manifest: {message}")]
    InvalidManifest { message: String },

    /// No manifest at the expected location
    #[error("Bundle manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// The startup check needs a configuration root and none was configured
    #[error("No configuration root configured")]
    MissingConfigRoot,

    #[error("Logging setup failed: {message}")]
    Logging { message: String },

    /// Filesystem error from bundle-fs
    #[error(transparent)]
    Fs(#[from] bundle_fs::Error),

    /// Path rejected by the bundle path policy
    #[error(transparent)]
    Path(#[from] bundle_fs::PathError),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
