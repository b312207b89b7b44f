//! Storage gateway seam
//!
//! The transfer engine persists and retrieves bundle files only through
//! [`ConfigStorageGateway`]. Two implementations ship with the crate:
//! [`FsGateway`] over a configuration root on disk, and [`MemoryGateway`]
//! for hosts that keep configuration in process.

mod fs;
mod memory;

pub use fs::FsGateway;
pub use memory::MemoryGateway;

use async_trait::async_trait;

use crate::{ConfigPath, Result};

/// A file as returned by a gateway read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Path the gateway actually served, as the gateway reports it
    pub resolved_path: String,
    pub content: String,
}

/// Reads and writes one bundle file by relative path.
#[async_trait]
pub trait ConfigStorageGateway: Send + Sync {
    async fn read(&self, path: &ConfigPath) -> Result<StoredFile>;

    /// Persist `content` and return the path the gateway wrote to.
    async fn write(&self, path: &ConfigPath, content: &str) -> Result<String>;
}

#[async_trait]
impl<G: ConfigStorageGateway + ?Sized> ConfigStorageGateway for std::sync::Arc<G> {
    async fn read(&self, path: &ConfigPath) -> Result<StoredFile> {
        (**self).read(path).await
    }

    async fn write(&self, path: &ConfigPath, content: &str) -> Result<String> {
        (**self).write(path, content).await
    }
}
