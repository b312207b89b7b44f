//! Configuration bundle validation and transfer engine
//!
//! Treats a fixed set of TOML configuration files as one logical bundle:
//!
//! - **Manifest model**: the `meta/bundle.toml` shape shared by every validator
//! - **TomlGate**: pre-flight syntax and profile checks run before any write
//! - **TransferEngine**: export, full import and partial import with
//!   backup, commit and rollback
//! - **BundleManifestValidator**: startup integrity check over the
//!   configuration root on disk
//!
//! # Architecture
//!
//! ```text
//!            host / UI
//!                |
//!           bundle-core
//!                |
//!           bundle-fs  (PathPolicy, ConfigStorageGateway, atomic I/O)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use bundle_core::{ImportMode, TransferEngine};
//! use bundle_fs::FsGateway;
//!
//! let engine = TransferEngine::new(FsGateway::new("/data/config"));
//! let report = engine.export_report().await;
//! assert!(report.ok, "{}", report.message);
//! ```

pub mod error;
pub mod gate;
pub mod logging;
pub mod manifest;
pub mod settings;
pub mod transfer;
pub mod validator;

pub use error::{Error, Result};
pub use gate::TomlGate;
pub use manifest::{BundleManifest, Profile};
pub use settings::TransferSettings;
pub use transfer::{
    BackupSnapshot, ConfigEntry, ErrorKind, ExportBundle, ImportMode, ImportSummary,
    OrderedEntries, RestoreFailure, RollbackOutcome, TransferEngine, TransferError,
    TransferReport,
};
pub use validator::{BundleManifestValidator, ManifestReport};
