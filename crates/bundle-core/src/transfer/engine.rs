//! The transfer engine

use bundle_fs::{ConfigStorageGateway, PathPolicy, normalize};
use tokio::sync::Mutex;
use tracing::info;

use super::backup::{self, BackupSnapshot};
use super::stages::{self, Classified};
use super::{
    ConfigEntry, ExportBundle, ImportMode, ImportSummary, OrderedEntries, TransferError,
    TransferReport,
};
use crate::TransferSettings;

/// Exports and imports bundles through a [`ConfigStorageGateway`].
///
/// Operations are serialized: an internal lock ensures at most one export or
/// import runs against the gateway at a time.
pub struct TransferEngine<G> {
    gateway: G,
    policy: PathPolicy,
    settings: TransferSettings,
    operation: Mutex<()>,
}

impl<G: ConfigStorageGateway> TransferEngine<G> {
    /// Engine for the built-in Android bundle with default settings.
    pub fn new(gateway: G) -> Self {
        Self::with_policy(gateway, PathPolicy::android_default(), TransferSettings::default())
    }

    /// Engine over a policy loaded elsewhere, typically from the manifest
    /// accepted by the startup check.
    pub fn with_policy(gateway: G, policy: PathPolicy, settings: TransferSettings) -> Self {
        Self {
            gateway,
            policy,
            settings,
            operation: Mutex::new(()),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn policy(&self) -> &PathPolicy {
        &self.policy
    }

    pub fn settings(&self) -> &TransferSettings {
        &self.settings
    }

    /// Read every bundle file and return them sorted by path.
    ///
    /// Fails on the first unreadable file; no partial bundle is returned.
    /// The manifest must parse and declare the target profile.
    pub async fn export(&self) -> Result<ExportBundle, TransferError> {
        let _guard = self.operation.lock().await;
        let profile = self.settings.target_profile;
        info!(files = self.policy.len(), %profile, "Starting bundle export");

        let mut entries = OrderedEntries::new();
        for path in self.policy.paths() {
            let stored = self
                .gateway
                .read(path)
                .await
                .map_err(|e| TransferError::Read {
                    path: path.clone(),
                    message: e.to_string(),
                })?;

            let unexpected = || TransferError::UnexpectedResolvedPath {
                requested: path.clone(),
                resolved: stored.resolved_path.clone(),
            };
            let resolved = normalize(&stored.resolved_path)
                .ok()
                .filter(|resolved| self.policy.is_whitelisted(resolved))
                .ok_or_else(unexpected)?;
            entries
                .insert(resolved, stored.content.clone())
                .map_err(|_| unexpected())?;
        }

        let manifest_path = self.policy.manifest_path();
        let manifest = entries
            .get(&manifest_path)
            .ok_or_else(|| TransferError::ManifestMissing {
                path: manifest_path.clone(),
            })?;
        stages::check_file_syntax(&manifest_path, manifest)?;
        stages::check_profile(&manifest_path, manifest, profile)?;

        let bundle = ExportBundle::from_sorted(entries.into_sorted());
        info!(files = bundle.len(), "Bundle export prepared");
        Ok(bundle)
    }

    /// Validate `entries` and write them through the gateway.
    ///
    /// Every validation stage runs before the first write. If a write fails,
    /// files already written are restored from the backup and the returned
    /// [`TransferError::Write`] carries the rollback outcome.
    ///
    /// Dropping the returned future while it is committing does not roll
    /// back: files written so far keep their new content.
    pub async fn import(
        &self,
        entries: &[ConfigEntry],
        mode: ImportMode,
    ) -> Result<ImportSummary, TransferError> {
        let _guard = self.operation.lock().await;
        let profile = self.settings.target_profile;
        info!(supplied = entries.len(), ?mode, %profile, "Starting bundle import");

        let Classified { targets, skipped } = match mode {
            ImportMode::Full => {
                let targets = stages::classify_full(&self.policy, entries)?;
                stages::check_completeness(&self.policy, &targets)?;
                Classified {
                    targets,
                    skipped: Vec::new(),
                }
            }
            ImportMode::Partial => stages::classify_partial(&self.policy, entries, profile)?,
        };

        let targets = stages::normalize_contents(targets);
        stages::check_syntax(&targets)?;

        let manifest_path = self.policy.manifest_path();
        match targets.get(&manifest_path) {
            Some(manifest) => stages::check_profile(&manifest_path, manifest, profile)?,
            None if mode == ImportMode::Full => {
                return Err(TransferError::ManifestMissing {
                    path: manifest_path,
                });
            }
            None => {}
        }

        let plan = targets.ordered_by(self.policy.paths());
        let plan_paths: Vec<_> = plan.iter().map(|(path, _)| path.clone()).collect();

        let backup = BackupSnapshot::capture(&self.gateway, &plan_paths).await?;
        backup::commit(&self.gateway, &plan, &backup).await?;

        info!(
            replaced = plan_paths.len(),
            skipped = skipped.len(),
            "Bundle import committed"
        );
        Ok(ImportSummary {
            mode,
            replaced: plan_paths,
            skipped,
        })
    }

    /// [`Self::export`] folded into a report for display.
    pub async fn export_report(&self) -> TransferReport {
        let profile = self.settings.target_profile;
        match self.export().await {
            Ok(bundle) => TransferReport::exported(bundle, profile),
            Err(e) => TransferReport::failed("Export", e),
        }
    }

    /// [`Self::import`] folded into a report for display.
    pub async fn import_report(&self, entries: &[ConfigEntry], mode: ImportMode) -> TransferReport {
        let profile = self.settings.target_profile;
        match self.import(entries, mode).await {
            Ok(summary) => TransferReport::imported(&summary, profile),
            Err(e) => TransferReport::failed("Import", e),
        }
    }
}
