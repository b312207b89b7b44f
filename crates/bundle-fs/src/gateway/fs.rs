//! Gateway over a configuration root on disk

use std::path::Path;

use async_trait::async_trait;

use super::{ConfigStorageGateway, StoredFile};
use crate::{ConfigPath, Error, NormalizedPath, Result, io};

/// Stores bundle files beneath a root directory.
///
/// Writes go through [`io::write_atomic`] on the blocking pool.
#[derive(Debug, Clone)]
pub struct FsGateway {
    root: NormalizedPath,
}

impl FsGateway {
    pub fn new(root: impl AsRef<Path>) -> Self {
        // Canonicalize when the root exists; keep the given path otherwise
        let root = dunce::canonicalize(root.as_ref())
            .map(NormalizedPath::new)
            .unwrap_or_else(|_| NormalizedPath::new(root.as_ref()));
        Self { root }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn location(&self, path: &ConfigPath) -> NormalizedPath {
        self.root.join_config(path)
    }
}

#[async_trait]
impl ConfigStorageGateway for FsGateway {
    async fn read(&self, path: &ConfigPath) -> Result<StoredFile> {
        let native = self.location(path).to_native();
        let content = tokio::fs::read_to_string(&native)
            .await
            .map_err(|e| Error::io(&native, e))?;

        tracing::debug!(path = %path, bytes = content.len(), "Read bundle file");
        Ok(StoredFile {
            resolved_path: path.to_string(),
            content,
        })
    }

    async fn write(&self, path: &ConfigPath, content: &str) -> Result<String> {
        let location = self.location(path);
        let content = content.to_owned();

        tokio::task::spawn_blocking(move || io::write_text(&location, &content))
            .await
            .map_err(|e| Error::storage(format!("write task failed: {e}")))??;

        tracing::debug!(path = %path, "Wrote bundle file");
        Ok(path.to_string())
    }
}
