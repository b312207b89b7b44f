//! Validation stages shared by export and import
//!
//! Each stage is pure: it inspects its input and either passes it on or
//! returns the [`TransferError`] that aborts the operation.

use bundle_fs::{ConfigPath, PathPolicy};

use super::{ConfigEntry, OrderedEntries, TransferError};
use crate::{Profile, TomlGate};

/// Recognized import targets plus the raw paths that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub targets: OrderedEntries,
    pub skipped: Vec<String>,
}

/// Full import: every path must be an exact whitelist member.
pub fn classify_full(
    policy: &PathPolicy,
    entries: &[ConfigEntry],
) -> Result<OrderedEntries, TransferError> {
    let mut targets = OrderedEntries::new();
    for entry in entries {
        let path = policy
            .classify(&entry.path)
            .map_err(|source| TransferError::Path {
                raw: entry.path.clone(),
                source,
            })?;
        targets
            .insert(path, entry.content.clone())
            .map_err(|path| TransferError::DuplicateTarget { path })?;
    }
    Ok(targets)
}

/// Partial import: resolve each path leniently, skipping the unrecognized.
pub fn classify_partial(
    policy: &PathPolicy,
    entries: &[ConfigEntry],
    profile: Profile,
) -> Result<Classified, TransferError> {
    let mut classified = Classified::default();
    for entry in entries {
        match policy.resolve_partial(&entry.path) {
            Ok(path) => classified
                .targets
                .insert(path, entry.content.clone())
                .map_err(|path| TransferError::DuplicateTarget { path })?,
            Err(reason) => {
                tracing::debug!(path = %entry.path, %reason, "Skipping unrecognized file");
                classified.skipped.push(entry.path.clone());
            }
        }
    }

    if classified.targets.is_empty() {
        return Err(TransferError::NoRecognizedFiles { profile });
    }
    Ok(classified)
}

/// Every policy path must be among `targets`; reports all that are not.
pub fn check_completeness(
    policy: &PathPolicy,
    targets: &OrderedEntries,
) -> Result<(), TransferError> {
    let missing: Vec<ConfigPath> = policy
        .paths()
        .iter()
        .filter(|path| !targets.contains(path))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(TransferError::MissingRequiredFiles { missing })
    }
}

pub fn normalize_contents(targets: OrderedEntries) -> OrderedEntries {
    targets.map_contents(TomlGate::normalize_content)
}

pub fn check_file_syntax(path: &ConfigPath, content: &str) -> Result<(), TransferError> {
    TomlGate::validate_syntax(content).map_err(|detail| TransferError::TomlSyntax {
        path: path.clone(),
        detail,
    })
}

/// Fails on the first file, in insertion order, that does not parse.
pub fn check_syntax(targets: &OrderedEntries) -> Result<(), TransferError> {
    targets
        .iter()
        .try_for_each(|(path, content)| check_file_syntax(path, content))
}

pub fn check_profile(
    manifest_path: &ConfigPath,
    content: &str,
    expected: Profile,
) -> Result<(), TransferError> {
    let found = TomlGate::read_profile(content);
    match found {
        Some(ref declared) if expected.matches(declared) => Ok(()),
        _ => Err(TransferError::ProfileMismatch {
            path: manifest_path.clone(),
            expected,
            found,
        }),
    }
}
