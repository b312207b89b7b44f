//! Backup, commit and rollback over the storage gateway
//!
//! A [`BackupSnapshot`] holds the pre-import content of every target. If a
//! commit write fails, each file written so far is restored from the
//! snapshot in reverse order. Restore failures are collected into a
//! [`RollbackOutcome`] and never retried.

use bundle_fs::{ConfigPath, ConfigStorageGateway};

use super::TransferError;

/// Pre-import content of each target, in capture order.
#[derive(Debug, Clone, Default)]
pub struct BackupSnapshot {
    entries: Vec<(ConfigPath, String)>,
}

impl BackupSnapshot {
    /// Read the current content of every target. Fails on the first read
    /// error, before anything has been written.
    pub async fn capture<G>(gateway: &G, targets: &[ConfigPath]) -> Result<Self, TransferError>
    where
        G: ConfigStorageGateway + ?Sized,
    {
        let mut entries = Vec::with_capacity(targets.len());
        for path in targets {
            let stored = gateway
                .read(path)
                .await
                .map_err(|e| TransferError::BackupRead {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            entries.push((path.clone(), stored.content));
        }
        tracing::debug!(files = entries.len(), "Captured backup snapshot");
        Ok(Self { entries })
    }

    pub fn get(&self, path: &ConfigPath) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, content)| content.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A file rollback could not restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreFailure {
    pub path: ConfigPath,
    pub message: String,
}

/// Result of replaying a backup after a failed commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollbackOutcome {
    /// Files restored to their pre-import content, in restore order
    pub restored: Vec<ConfigPath>,
    pub failed: Vec<RestoreFailure>,
}

impl RollbackOutcome {
    /// True when at least one file may still hold new content.
    pub fn needs_manual_recovery(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Write `plan` in order. On the first failed write, roll back and return
/// [`TransferError::Write`] carrying the rollback outcome.
pub async fn commit<G>(
    gateway: &G,
    plan: &[(ConfigPath, String)],
    backup: &BackupSnapshot,
) -> Result<(), TransferError>
where
    G: ConfigStorageGateway + ?Sized,
{
    let mut written: Vec<&ConfigPath> = Vec::with_capacity(plan.len());
    for (path, content) in plan {
        match gateway.write(path, content).await {
            Ok(resolved) => {
                tracing::debug!(path = %path, %resolved, "Committed file");
                written.push(path);
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, written = written.len(), "Commit failed, rolling back");
                let rollback = rollback(gateway, &written, backup).await;
                return Err(TransferError::Write {
                    path: path.clone(),
                    message: e.to_string(),
                    rollback,
                });
            }
        }
    }
    Ok(())
}

async fn rollback<G>(gateway: &G, written: &[&ConfigPath], backup: &BackupSnapshot) -> RollbackOutcome
where
    G: ConfigStorageGateway + ?Sized,
{
    let mut outcome = RollbackOutcome::default();
    for path in written.iter().rev() {
        let Some(original) = backup.get(path) else {
            outcome.failed.push(RestoreFailure {
                path: (*path).clone(),
                message: "no backup captured".to_string(),
            });
            continue;
        };
        match gateway.write(path, original).await {
            Ok(_) => outcome.restored.push((*path).clone()),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Rollback failed to restore file");
                outcome.failed.push(RestoreFailure {
                    path: (*path).clone(),
                    message: e.to_string(),
                });
            }
        }
    }
    if outcome.needs_manual_recovery() {
        tracing::warn!(
            failed = outcome.failed.len(),
            "Rollback incomplete, manual recovery required"
        );
    } else {
        tracing::info!(restored = outcome.restored.len(), "Rollback complete");
    }
    outcome
}
