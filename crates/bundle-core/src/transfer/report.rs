//! Display-ready outcome of a transfer

use bundle_fs::ConfigPath;

use super::{ErrorKind, ExportBundle, ImportMode, ImportSummary, TransferError};
use crate::Profile;

/// Pass/fail outcome with a human-readable message, for UI layers.
///
/// `error_kind` lets callers react without matching on `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReport {
    pub ok: bool,
    pub message: String,
    pub error_kind: Option<ErrorKind>,
    /// The exported files, on a successful export
    pub bundle: Option<ExportBundle>,
    /// Files rollback could not restore
    pub manual_recovery: Vec<ConfigPath>,
}

impl TransferReport {
    pub fn exported(bundle: ExportBundle, profile: Profile) -> Self {
        Self {
            ok: true,
            message: format!(
                "Prepared {} {} config TOML file(s).",
                bundle.len(),
                profile.display_name()
            ),
            error_kind: None,
            bundle: Some(bundle),
            manual_recovery: Vec::new(),
        }
    }

    pub fn imported(summary: &ImportSummary, profile: Profile) -> Self {
        let mut message = format!(
            "Import success: replaced {} {} config TOML file(s)",
            summary.replaced.len(),
            profile.display_name()
        );
        if summary.mode == ImportMode::Partial {
            message.push_str(&format!(
                " (skipped {} unsupported TOML file(s))",
                summary.skipped.len()
            ));
        }
        message.push('.');

        Self {
            ok: true,
            message,
            error_kind: None,
            bundle: None,
            manual_recovery: Vec::new(),
        }
    }

    /// `operation` is "Export" or "Import".
    pub fn failed(operation: &str, error: TransferError) -> Self {
        Self {
            ok: false,
            message: format!("{operation} failed: {error}"),
            error_kind: Some(error.kind()),
            bundle: None,
            manual_recovery: error
                .manual_recovery()
                .iter()
                .map(|failure| failure.path.clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::{RestoreFailure, RollbackOutcome};
    use bundle_fs::normalize;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_import_message_reports_skipped() {
        let summary = ImportSummary {
            mode: ImportMode::Partial,
            replaced: vec![normalize("reports/markdown/day.toml").unwrap()],
            skipped: vec!["readme.txt".into()],
        };
        let report = TransferReport::imported(&summary, Profile::Android);
        assert_eq!(
            report.message,
            "Import success: replaced 1 Android config TOML file(s) (skipped 1 unsupported TOML file(s))."
        );
    }

    #[test]
    fn test_full_import_message() {
        let summary = ImportSummary {
            mode: ImportMode::Full,
            replaced: vec![normalize("config.toml").unwrap()],
            skipped: Vec::new(),
        };
        let report = TransferReport::imported(&summary, Profile::Android);
        assert_eq!(report.message, "Import success: replaced 1 Android config TOML file(s).");
    }

    #[test]
    fn test_failed_write_lists_manual_recovery() {
        let error = TransferError::Write {
            path: normalize("converter/duration_rules.toml").unwrap(),
            message: "disk full".into(),
            rollback: RollbackOutcome {
                restored: vec![normalize("config.toml").unwrap()],
                failed: vec![RestoreFailure {
                    path: normalize("meta/bundle.toml").unwrap(),
                    message: "disk full".into(),
                }],
            },
        };

        let report = TransferReport::failed("Import", error);
        assert!(!report.ok);
        assert_eq!(report.error_kind, Some(ErrorKind::Write));
        assert_eq!(report.manual_recovery, vec![normalize("meta/bundle.toml").unwrap()]);
        assert_eq!(
            report.message,
            "Import failed: converter/duration_rules.toml -> disk full \
             (rollback failed for meta/bundle.toml; manual recovery required)"
        );
    }
}
