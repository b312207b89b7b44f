//! Bundle manifest model
//!
//! The manifest is stored inside the bundle as `meta/bundle.toml`:
//!
//! ```toml
//! schema_version = 1
//! profile = "android"
//! bundle_name = "default"
//!
//! [file_list]
//! required = ["config.toml", "meta/bundle.toml"]
//! ```
//!
//! Its `file_list.required` list is the source of truth for which files a
//! complete bundle contains; [`BundleManifest::path_policy`] turns it into the
//! [`PathPolicy`] shared by the transfer engine and the startup check.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use bundle_fs::{BundleFile, ConfigPath, PathPolicy, normalize};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Schema version written by this crate.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Platform a bundle is produced for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Android,
    Desktop,
}

impl Profile {
    /// Wire value, as written in the manifest's `profile` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Desktop => "desktop",
        }
    }

    /// Human-facing name used in report messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Desktop => "Desktop",
        }
    }

    /// Whether a declared profile string names this profile.
    pub fn matches(&self, declared: &str) -> bool {
        declared.trim() == self.as_str()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "android" => Ok(Self::Android),
            "desktop" => Ok(Self::Desktop),
            other => Err(Error::InvalidManifest {
                message: format!("unknown profile {other:?}"),
            }),
        }
    }
}

/// Manifest as it appears on the wire. Every field is optional so that
/// validators can report exactly what is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct RawManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_name: Option<String>,
    #[serde(default)]
    pub file_list: RawFileList,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct RawFileList {
    #[serde(default)]
    pub required: Vec<String>,
}

impl RawManifest {
    pub(crate) fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub(crate) fn schema_version(&self) -> Option<u32> {
        self.schema_version.and_then(|v| u32::try_from(v).ok())
    }

    pub(crate) fn profile(&self) -> Option<&str> {
        self.profile
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// A validated bundle manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleManifest {
    pub schema_version: u32,
    /// Declared profile, trimmed. Kept as text so an unknown platform can be
    /// reported instead of failing to parse.
    pub profile: String,
    pub bundle_name: Option<String>,
    /// Required files in declared order, normalized and unique
    pub required_paths: Vec<ConfigPath>,
}

impl BundleManifest {
    /// Manifest describing the built-in Android bundle.
    pub fn android_default(bundle_name: impl Into<String>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            profile: Profile::Android.as_str().to_string(),
            bundle_name: Some(bundle_name.into()),
            required_paths: BundleFile::ALL.iter().map(BundleFile::config_path).collect(),
        }
    }

    /// Parse and validate manifest content.
    ///
    /// # Example
    ///
    /// ```
    /// use bundle_core::BundleManifest;
    ///
    /// let manifest = BundleManifest::parse(r#"
    /// schema_version = 1
    /// profile = "android"
    ///
    /// [file_list]
    /// required = ["config.toml", "meta/bundle.toml"]
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.required_paths.len(), 2);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        Self::from_raw(RawManifest::parse(content)?)
    }

    pub(crate) fn from_raw(raw: RawManifest) -> Result<Self> {
        let schema_version = match raw.schema_version {
            None => return Err(invalid("schema_version is missing")),
            Some(v) => u32::try_from(v)
                .map_err(|_| invalid(format!("schema_version {v} is out of range")))?,
        };
        let profile = raw
            .profile()
            .ok_or_else(|| invalid("profile is missing"))?
            .to_string();

        let mut seen = HashSet::new();
        let mut required_paths = Vec::with_capacity(raw.file_list.required.len());
        for entry in &raw.file_list.required {
            let path = normalize(entry)?;
            if !seen.insert(path.clone()) {
                return Err(invalid(format!("{path} is listed more than once")));
            }
            required_paths.push(path);
        }
        if required_paths.is_empty() {
            return Err(invalid("file_list.required is empty"));
        }

        Ok(Self {
            schema_version,
            profile,
            bundle_name: raw.bundle_name,
            required_paths,
        })
    }

    /// Whitelist policy derived from the required file list.
    pub fn path_policy(&self) -> Result<PathPolicy> {
        Ok(PathPolicy::new(self.required_paths.iter().cloned())?)
    }

    /// Render as TOML, suitable for writing to `meta/bundle.toml`.
    pub fn to_toml(&self) -> Result<String> {
        let raw = RawManifest {
            schema_version: Some(i64::from(self.schema_version)),
            profile: Some(self.profile.clone()),
            bundle_name: self.bundle_name.clone(),
            file_list: RawFileList {
                required: self.required_paths.iter().map(ToString::to_string).collect(),
            },
        };
        Ok(toml::to_string_pretty(&raw)?)
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidManifest {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ANDROID_MANIFEST: &str = r#"
schema_version = 1
profile = " android "
bundle_name = "default"

[file_list]
required = ["config.toml", "meta/bundle.toml", "reports/markdown/day.toml"]
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = BundleManifest::parse(ANDROID_MANIFEST).unwrap();
        assert_eq!(manifest.schema_version, 1);
        assert_eq!(manifest.profile, "android");
        assert!(Profile::Android.matches(&manifest.profile));
        assert_eq!(manifest.bundle_name.as_deref(), Some("default"));
        let paths: Vec<_> = manifest.required_paths.iter().map(|p| p.as_str()).collect();
        assert_eq!(
            paths,
            vec!["config.toml", "meta/bundle.toml", "reports/markdown/day.toml"]
        );
    }

    #[test]
    fn test_parse_rejects_missing_profile() {
        let err = BundleManifest::parse("schema_version = 1\n[file_list]\nrequired = [\"meta/bundle.toml\"]\n")
            .unwrap_err();
        assert!(err.to_string().contains("profile is missing"), "got: {err}");
    }

    #[test]
    fn test_parse_rejects_duplicate_required_paths() {
        let content = r#"
schema_version = 1
profile = "android"
[file_list]
required = ["meta/bundle.toml", "config.toml", "\\config.toml"]
"#;
        let err = BundleManifest::parse(content).unwrap_err();
        assert!(err.to_string().contains("more than once"), "got: {err}");
    }

    #[test]
    fn test_unknown_profile_is_kept_as_text() {
        let content = r#"
schema_version = 2
profile = "ios"
[file_list]
required = ["meta/bundle.toml"]
"#;
        let manifest = BundleManifest::parse(content).unwrap();
        assert_eq!(manifest.profile, "ios");
        assert!(manifest.profile.parse::<Profile>().is_err());
    }

    #[test]
    fn test_android_default_round_trips_through_toml() {
        let manifest = BundleManifest::android_default("default");
        let rendered = manifest.to_toml().unwrap();
        let parsed = BundleManifest::parse(&rendered).unwrap();
        assert_eq!(parsed, manifest);
        assert_eq!(parsed.path_policy().unwrap().len(), BundleFile::ALL.len());
    }

    #[test]
    fn test_profile_matches_trimmed_value() {
        assert!(Profile::Android.matches(" android\n"));
        assert!(!Profile::Android.matches("Android"));
        assert!(!Profile::Android.matches("desktop"));
    }
}
