//! Whitelist policy for bundle paths
//!
//! A [`PathPolicy`] is the closed, ordered set of paths a bundle may contain.
//! Its order is the order files are read on export and written on import.

use std::collections::{HashMap, HashSet};

use crate::{BundleFile, ConfigPath, MANIFEST_PATH, PathError, normalize};

#[derive(Debug, Clone)]
enum FileNameMatch {
    Unique(ConfigPath),
    Ambiguous(Vec<ConfigPath>),
}

/// The set of paths accepted by export and import.
#[derive(Debug, Clone)]
pub struct PathPolicy {
    paths: Vec<ConfigPath>,
    members: HashSet<ConfigPath>,
    by_file_name: HashMap<String, FileNameMatch>,
}

impl PathPolicy {
    /// The built-in Android bundle: every [`BundleFile`] in declaration order.
    pub fn android_default() -> Self {
        Self::build(BundleFile::ALL.iter().map(BundleFile::config_path).collect())
    }

    /// Build a policy from canonical paths.
    ///
    /// Rejects duplicate entries and a list that omits the manifest.
    pub fn new(paths: impl IntoIterator<Item = ConfigPath>) -> Result<Self, PathError> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for path in paths {
            if !seen.insert(path.clone()) {
                return Err(PathError::DuplicatePath {
                    path: path.to_string(),
                });
            }
            ordered.push(path);
        }

        if !ordered.iter().any(|p| p.as_str() == MANIFEST_PATH) {
            return Err(PathError::MissingManifestPath {
                path: MANIFEST_PATH.to_string(),
            });
        }

        Ok(Self::build(ordered))
    }

    /// Build a policy from raw strings, e.g. a manifest's required file list.
    pub fn from_required<S: AsRef<str>>(required: &[S]) -> Result<Self, PathError> {
        let paths = required
            .iter()
            .map(|raw| normalize(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(paths)
    }

    fn build(paths: Vec<ConfigPath>) -> Self {
        let members = paths.iter().cloned().collect();
        let mut by_file_name: HashMap<String, FileNameMatch> = HashMap::new();

        for path in &paths {
            let key = path.file_name().to_lowercase();
            match by_file_name.remove(&key) {
                None => {
                    by_file_name.insert(key, FileNameMatch::Unique(path.clone()));
                }
                Some(FileNameMatch::Unique(first)) => {
                    by_file_name.insert(key, FileNameMatch::Ambiguous(vec![first, path.clone()]));
                }
                Some(FileNameMatch::Ambiguous(mut all)) => {
                    all.push(path.clone());
                    by_file_name.insert(key, FileNameMatch::Ambiguous(all));
                }
            }
        }

        Self {
            paths,
            members,
            by_file_name,
        }
    }

    /// Paths in policy order.
    pub fn paths(&self) -> &[ConfigPath] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn manifest_path(&self) -> ConfigPath {
        BundleFile::Manifest.config_path()
    }

    pub fn is_whitelisted(&self, path: &ConfigPath) -> bool {
        self.members.contains(path)
    }

    /// Normalize `raw` and require an exact whitelist match.
    pub fn classify(&self, raw: &str) -> Result<ConfigPath, PathError> {
        let path = normalize(raw)?;
        if self.is_whitelisted(&path) {
            Ok(path)
        } else {
            Err(PathError::NotWhitelisted {
                path: path.to_string(),
            })
        }
    }

    /// Resolve `raw` for a partial import.
    ///
    /// An exact whitelist match wins. Otherwise the final file name is
    /// matched case-insensitively against the whitelist, which accepts a
    /// file moved to another directory. A file name shared by several
    /// whitelist entries is rejected rather than guessed.
    pub fn resolve_partial(&self, raw: &str) -> Result<ConfigPath, PathError> {
        let path = normalize(raw)?;
        if self.is_whitelisted(&path) {
            return Ok(path);
        }

        let key = path.file_name().to_lowercase();
        match self.by_file_name.get(&key) {
            Some(FileNameMatch::Unique(canonical)) => Ok(canonical.clone()),
            Some(FileNameMatch::Ambiguous(candidates)) => Err(PathError::AmbiguousFileName {
                file_name: key,
                candidates: candidates.iter().map(ToString::to_string).collect(),
            }),
            None => Err(PathError::NotWhitelisted {
                path: path.to_string(),
            }),
        }
    }
}

impl Default for PathPolicy {
    fn default() -> Self {
        Self::android_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_android_default_contains_every_bundle_file() {
        let policy = PathPolicy::android_default();
        assert_eq!(policy.len(), BundleFile::ALL.len());
        assert_eq!(policy.paths()[0].as_str(), "config.toml");
        assert_eq!(policy.paths()[1].as_str(), MANIFEST_PATH);
    }

    #[rstest]
    #[case("day.toml", "reports/markdown/day.toml")]
    #[case("DAY.toml", "reports/markdown/day.toml")]
    #[case("exported/converter/alias_mapping.toml", "converter/alias_mapping.toml")]
    #[case("\\meta\\bundle.toml", "meta/bundle.toml")]
    fn test_resolve_partial(#[case] raw: &str, #[case] expected: &str) {
        let policy = PathPolicy::android_default();
        assert_eq!(policy.resolve_partial(raw).unwrap().as_str(), expected);
    }

    #[test]
    fn test_resolve_partial_unknown_file() {
        let policy = PathPolicy::android_default();
        assert!(matches!(
            policy.resolve_partial("notes.toml"),
            Err(PathError::NotWhitelisted { .. })
        ));
        assert!(matches!(
            policy.resolve_partial("readme.txt"),
            Err(PathError::NotToml { .. })
        ));
    }

    #[test]
    fn test_resolve_partial_rejects_ambiguous_file_name() {
        let policy =
            PathPolicy::from_required(&["meta/bundle.toml", "a/rules.toml", "b/rules.toml"])
                .unwrap();

        let err = policy.resolve_partial("rules.toml").unwrap_err();
        assert_eq!(
            err,
            PathError::AmbiguousFileName {
                file_name: "rules.toml".into(),
                candidates: vec!["a/rules.toml".into(), "b/rules.toml".into()],
            }
        );
        // Exact paths still resolve.
        assert_eq!(policy.resolve_partial("b/rules.toml").unwrap().as_str(), "b/rules.toml");
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        let policy = PathPolicy::android_default();
        assert!(policy.classify("config.toml").is_ok());
        assert!(matches!(
            policy.classify("Config.toml"),
            Err(PathError::NotWhitelisted { .. })
        ));
    }

    #[test]
    fn test_from_required_rejects_duplicates() {
        let err = PathPolicy::from_required(&["meta/bundle.toml", "config.toml", "/config.toml"])
            .unwrap_err();
        assert_eq!(
            err,
            PathError::DuplicatePath {
                path: "config.toml".into()
            }
        );
    }

    #[test]
    fn test_from_required_requires_manifest() {
        let err = PathPolicy::from_required(&["config.toml"]).unwrap_err();
        assert!(matches!(err, PathError::MissingManifestPath { .. }));
    }
}
