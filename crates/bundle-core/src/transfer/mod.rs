//! Bundle export and import
//!
//! Every operation runs as a fixed sequence of stages. Each validation stage
//! is a plain function returning `Result`, so the first failure aborts the
//! operation before anything is written:
//!
//! 1. classify paths against the [`bundle_fs::PathPolicy`]
//! 2. check completeness (full import only)
//! 3. normalize content (BOM, line endings)
//! 4. syntax gate
//! 5. profile gate
//! 6. backup current content
//! 7. commit, rolling back already-written files if a write fails
//!
//! Only the commit stage can leave side effects behind.

mod backup;
mod engine;
mod entries;
mod error;
mod report;
pub mod stages;

pub use backup::{BackupSnapshot, RestoreFailure, RollbackOutcome};
pub use engine::TransferEngine;
pub use entries::OrderedEntries;
pub use error::{ErrorKind, TransferError};
pub use report::TransferReport;

use bundle_fs::ConfigPath;

/// One file of a bundle in transit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Relative path. Canonical in exported bundles; raw caller input on import.
    pub path: String,
    pub content: String,
}

impl ConfigEntry {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Whether an import replaces the whole bundle or a recognized subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Every whitelist path must be supplied; unknown paths are rejected.
    Full,
    /// Any recognized subset is applied; unknown files are skipped.
    Partial,
}

/// The files of an exported bundle, one per whitelist path, sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportBundle {
    entries: Vec<ConfigEntry>,
}

impl ExportBundle {
    pub(crate) fn from_sorted(entries: Vec<(ConfigPath, String)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(path, content)| ConfigEntry::new(path.to_string(), content))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ConfigEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.content.as_str())
    }
}

/// What a successful import changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub mode: ImportMode,
    /// Written files, in commit order
    pub replaced: Vec<ConfigPath>,
    /// Raw paths of supplied files that were not recognized (partial import)
    pub skipped: Vec<String>,
}
