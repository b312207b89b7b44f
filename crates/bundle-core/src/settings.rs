//! Engine settings
//!
//! Loaded from a TOML or JSON file through [`bundle_fs::ConfigStore`]:
//!
//! ```toml
//! target_profile = "android"
//! supported_schema_version = 1
//! config_root = "/data/user/0/app/files/config"
//! ```
//!
//! Every field has a default, so an empty file is valid.

use std::path::PathBuf;

use bundle_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::manifest::{CURRENT_SCHEMA_VERSION, Profile};

fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferSettings {
    /// Platform this engine accepts bundles for
    pub target_profile: Profile,
    /// Newest manifest schema the startup check accepts
    #[serde(default = "default_schema_version")]
    pub supported_schema_version: u32,
    /// Configuration root checked at startup
    pub config_root: Option<PathBuf>,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            target_profile: Profile::default(),
            supported_schema_version: default_schema_version(),
            config_root: None,
        }
    }
}

impl TransferSettings {
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let settings = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path, ?settings, "Loaded transfer settings");
        Ok(settings)
    }
}
