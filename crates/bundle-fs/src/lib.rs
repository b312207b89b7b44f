//! Filesystem layer for configuration bundles
//!
//! Provides canonical bundle paths, the whitelist policy, the storage
//! gateway seam and safe I/O operations.

pub mod config;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod io;
pub mod path;
pub mod policy;

pub use config::{ConfigStore, SettingsFormat};
pub use constants::{BundleFile, MANIFEST_PATH};
pub use error::{Error, PathError, Result};
pub use gateway::{ConfigStorageGateway, FsGateway, MemoryGateway, StoredFile};
pub use path::{ConfigPath, NormalizedPath, normalize};
pub use policy::PathPolicy;
