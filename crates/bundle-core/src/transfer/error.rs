//! Failure kinds of a transfer operation

use bundle_fs::{ConfigPath, PathError};

use super::RollbackOutcome;
use crate::Profile;

/// Why an export or import failed.
///
/// `Display` yields the detail shown after "Export failed: " or
/// "Import failed: " in a [`super::TransferReport`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// A supplied path is malformed or not on the whitelist
    #[error("unsupported TOML file {raw:?}: {source}")]
    Path {
        raw: String,
        #[source]
        source: PathError,
    },

    /// Two supplied entries target the same canonical path
    #[error("duplicate TOML target: {path}")]
    DuplicateTarget { path: ConfigPath },

    /// A full import lacks required files
    #[error("missing required TOML file(s): {}", join_paths(.missing))]
    MissingRequiredFiles { missing: Vec<ConfigPath> },

    #[error("invalid TOML in {path}: {detail}")]
    TomlSyntax { path: ConfigPath, detail: String },

    /// The manifest declares a different platform, or none
    #[error("{path} profile must be \"{expected}\".")]
    ProfileMismatch {
        path: ConfigPath,
        expected: Profile,
        found: Option<String>,
    },

    #[error("{path} is missing from the bundle")]
    ManifestMissing { path: ConfigPath },

    /// A partial import recognized none of the supplied files
    #[error("no recognized {} config TOML files found.", display_name(.profile))]
    NoRecognizedFiles { profile: Profile },

    /// Export could not read a bundle file
    #[error("{path} -> {message}")]
    Read { path: ConfigPath, message: String },

    /// The gateway served a path other than the one requested
    #[error("{requested} -> gateway resolved unexpected path {resolved:?}")]
    UnexpectedResolvedPath {
        requested: ConfigPath,
        resolved: String,
    },

    /// Current content could not be captured before committing
    #[error("backup of {path} failed -> {message}")]
    BackupRead { path: ConfigPath, message: String },

    /// A commit write failed; earlier writes were rolled back
    #[error("{path} -> {message}{}", rollback_suffix(.rollback))]
    Write {
        path: ConfigPath,
        message: String,
        rollback: RollbackOutcome,
    },
}

/// Programmatic tag for a [`TransferError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Path,
    DuplicateTarget,
    MissingRequiredFile,
    TomlSyntax,
    ProfileMismatch,
    ManifestMissing,
    NoRecognizedFiles,
    Read,
    UnexpectedResolvedPath,
    BackupRead,
    Write,
}

impl TransferError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Path { .. } => ErrorKind::Path,
            Self::DuplicateTarget { .. } => ErrorKind::DuplicateTarget,
            Self::MissingRequiredFiles { .. } => ErrorKind::MissingRequiredFile,
            Self::TomlSyntax { .. } => ErrorKind::TomlSyntax,
            Self::ProfileMismatch { .. } => ErrorKind::ProfileMismatch,
            Self::ManifestMissing { .. } => ErrorKind::ManifestMissing,
            Self::NoRecognizedFiles { .. } => ErrorKind::NoRecognizedFiles,
            Self::Read { .. } => ErrorKind::Read,
            Self::UnexpectedResolvedPath { .. } => ErrorKind::UnexpectedResolvedPath,
            Self::BackupRead { .. } => ErrorKind::BackupRead,
            Self::Write { .. } => ErrorKind::Write,
        }
    }

    /// Files left in an unknown state because rollback could not restore them.
    pub fn manual_recovery(&self) -> &[super::RestoreFailure] {
        match self {
            Self::Write { rollback, .. } => &rollback.failed,
            _ => &[],
        }
    }
}

fn join_paths(paths: &[ConfigPath]) -> String {
    paths
        .iter()
        .map(ConfigPath::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_name(profile: &Profile) -> &'static str {
    profile.display_name()
}

fn rollback_suffix(rollback: &RollbackOutcome) -> String {
    if rollback.needs_manual_recovery() {
        let paths: Vec<_> = rollback.failed.iter().map(|f| f.path.clone()).collect();
        format!(
            " (rollback failed for {}; manual recovery required)",
            join_paths(&paths)
        )
    } else {
        String::new()
    }
}
