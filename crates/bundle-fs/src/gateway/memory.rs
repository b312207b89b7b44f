//! In-process gateway

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ConfigStorageGateway, StoredFile};
use crate::{ConfigPath, Error, Result};

/// Keeps bundle files in memory, keyed by canonical path string.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    files: RwLock<BTreeMap<String, String>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files<P, C>(files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<String>,
        C: Into<String>,
    {
        let files = files
            .into_iter()
            .map(|(path, content)| (path.into(), content.into()))
            .collect();
        Self {
            files: RwLock::new(files),
        }
    }

    pub async fn get(&self, path: &str) -> Option<String> {
        self.files.read().await.get(path).cloned()
    }

    /// Copy of every stored file, ordered by path.
    pub async fn snapshot(&self) -> BTreeMap<String, String> {
        self.files.read().await.clone()
    }
}

#[async_trait]
impl ConfigStorageGateway for MemoryGateway {
    async fn read(&self, path: &ConfigPath) -> Result<StoredFile> {
        let files = self.files.read().await;
        let content = files.get(path.as_str()).cloned().ok_or_else(|| Error::NotFound {
            path: PathBuf::from(path.as_str()),
        })?;
        Ok(StoredFile {
            resolved_path: path.to_string(),
            content,
        })
    }

    async fn write(&self, path: &ConfigPath, content: &str) -> Result<String> {
        self.files
            .write()
            .await
            .insert(path.to_string(), content.to_owned());
        Ok(path.to_string())
    }
}
