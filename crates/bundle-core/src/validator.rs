//! Startup integrity check of the on-disk bundle
//!
//! Reads `meta/bundle.toml` directly from the configuration root, without
//! going through a storage gateway, and checks that every declared file
//! exists and that the declared profile matches this platform.

use std::collections::HashSet;
use std::path::Path;

use bundle_fs::{ConfigPath, MANIFEST_PATH, NormalizedPath, PathPolicy, io, normalize};

use crate::manifest::{CURRENT_SCHEMA_VERSION, RawManifest};
use crate::{BundleManifest, Error, Profile, Result, TransferSettings};

/// Outcome of a startup check.
#[derive(Debug, Clone)]
pub struct ManifestReport {
    pub ok: bool,
    pub schema_version: Option<u32>,
    pub profile: Option<String>,
    /// Declared files absent from disk
    pub missing_files: Vec<String>,
    pub message: String,
    manifest: Option<BundleManifest>,
}

impl ManifestReport {
    fn failed(message: String) -> Self {
        Self {
            ok: false,
            schema_version: None,
            profile: None,
            missing_files: Vec::new(),
            message,
            manifest: None,
        }
    }

    /// The parsed manifest, when it was well-formed.
    pub fn manifest(&self) -> Option<&BundleManifest> {
        self.manifest.as_ref()
    }

    /// Whitelist policy declared by a manifest that passed the check.
    ///
    /// This is the policy the transfer engine should be built with, so both
    /// validators agree on the same file list.
    pub fn path_policy(&self) -> Result<PathPolicy> {
        match (&self.manifest, self.ok) {
            (Some(manifest), true) => manifest.path_policy(),
            _ => Err(Error::InvalidManifest {
                message: self.message.clone(),
            }),
        }
    }
}

/// Checks a configuration root against its own manifest.
#[derive(Debug, Clone)]
pub struct BundleManifestValidator {
    root: NormalizedPath,
    expected_profile: Profile,
    supported_schema_version: u32,
}

impl BundleManifestValidator {
    pub fn new(root: impl AsRef<Path>, expected_profile: Profile) -> Self {
        Self {
            root: NormalizedPath::new(root),
            expected_profile,
            supported_schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Validator for `settings.config_root`, using the configured profile
    /// and schema limit.
    pub fn from_settings(settings: &TransferSettings) -> Result<Self> {
        let root = settings.config_root.as_ref().ok_or(Error::MissingConfigRoot)?;
        Ok(Self::new(root, settings.target_profile)
            .with_supported_schema_version(settings.supported_schema_version))
    }

    pub fn with_supported_schema_version(mut self, version: u32) -> Self {
        self.supported_schema_version = version;
        self
    }

    pub fn manifest_location(&self) -> NormalizedPath {
        self.root.join(MANIFEST_PATH)
    }

    pub fn validate(&self) -> ManifestReport {
        let location = self.manifest_location();
        if !location.is_file() {
            let missing = Error::ManifestNotFound {
                path: location.to_native(),
            };
            tracing::warn!(path = %location, "Bundle manifest not found");
            return ManifestReport::failed(missing.to_string());
        }

        let raw = match io::read_text(&location)
            .map_err(Error::from)
            .and_then(|content| RawManifest::parse(&content))
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %location, error = %e, "Bundle manifest unreadable");
                return ManifestReport::failed(format!("Bundle manifest is invalid: {e}"));
            }
        };

        let mut problems = Vec::new();
        let schema_version = raw.schema_version();
        match schema_version {
            None => problems.push("schema_version is missing or invalid".to_string()),
            Some(v) if v > self.supported_schema_version => problems.push(format!(
                "schema_version {v} is newer than supported {}",
                self.supported_schema_version
            )),
            Some(_) => {}
        }

        let profile = raw.profile().map(str::to_string);
        match profile.as_deref() {
            None => problems.push("profile is missing".to_string()),
            Some(declared) if !self.expected_profile.matches(declared) => problems.push(format!(
                "profile must be \"{}\" (found \"{declared}\")",
                self.expected_profile
            )),
            Some(_) => {}
        }

        let declared = self.declared_paths(&raw, &mut problems);
        let missing_files: Vec<String> = declared
            .iter()
            .filter(|path| !self.root.join_config(path).is_file())
            .map(ToString::to_string)
            .collect();
        if !missing_files.is_empty() {
            problems.push(format!(
                "missing required file(s): {}",
                missing_files.join(", ")
            ));
        }

        let ok = problems.is_empty();
        let message = if ok {
            format!(
                "Bundle manifest OK: schema {}, profile {}, {} required file(s) present.",
                schema_version.unwrap_or_default(),
                self.expected_profile,
                declared.len()
            )
        } else {
            format!("Bundle manifest check failed: {}", problems.join("; "))
        };

        if ok {
            tracing::info!(root = %self.root, files = declared.len(), "Bundle manifest verified");
        } else {
            tracing::warn!(root = %self.root, %message, "Bundle manifest check failed");
        }

        ManifestReport {
            ok,
            schema_version,
            profile,
            missing_files,
            message,
            manifest: BundleManifest::from_raw(raw).ok(),
        }
    }

    /// Normalized, de-duplicated required paths; malformed entries are
    /// reported as problems and left out.
    fn declared_paths(&self, raw: &RawManifest, problems: &mut Vec<String>) -> Vec<ConfigPath> {
        let mut seen = HashSet::new();
        let mut declared = Vec::new();
        for entry in &raw.file_list.required {
            match normalize(entry) {
                Ok(path) => {
                    if seen.insert(path.clone()) {
                        declared.push(path);
                    } else {
                        problems.push(format!("{path} is listed more than once"));
                    }
                }
                Err(e) => problems.push(format!("invalid required path {entry:?}: {e}")),
            }
        }

        if raw.file_list.required.is_empty() {
            problems.push("file_list.required is empty".to_string());
        } else if !declared.iter().any(|p| p.as_str() == MANIFEST_PATH) {
            problems.push(format!("file_list.required does not include {MANIFEST_PATH}"));
        }
        declared
    }
}
