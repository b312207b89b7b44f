//! Path handling for bundle files and their on-disk locations

use std::path::{Path, PathBuf};

use crate::PathError;

/// A filesystem path normalized to use forward slashes internally.
///
/// Used for the on-disk root a gateway or validator operates under.
/// Converted to platform-native form only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner: joined }
    }

    /// Location of a bundle file beneath this root.
    pub fn join_config(&self, path: &ConfigPath) -> Self {
        self.join(path.as_str())
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

/// A relative, forward-slash path naming one TOML file of a bundle.
///
/// Only [`normalize`] produces values, so every `ConfigPath` satisfies:
/// no leading or trailing `/`, no empty, `.` or `..` segments, and a
/// `.toml` suffix (any casing). Ordering is plain byte order of the string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigPath {
    inner: String,
}

impl ConfigPath {
    /// Wrap a path literal that is already canonical.
    pub(crate) fn from_canonical(path: &'static str) -> Self {
        Self {
            inner: path.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Final segment, e.g. `day.toml` for `reports/markdown/day.toml`.
    pub fn file_name(&self) -> &str {
        match self.inner.rfind('/') {
            Some(idx) => &self.inner[idx + 1..],
            None => &self.inner,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/')
    }
}

impl std::str::FromStr for ConfigPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

impl AsRef<str> for ConfigPath {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl std::fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Normalize a raw, caller-supplied path into a [`ConfigPath`].
///
/// Trims surrounding whitespace and slashes, converts `\` to `/`, requires a
/// `.toml` suffix and rejects empty, `.` and `..` segments. Pure and
/// idempotent.
pub fn normalize(raw: &str) -> Result<ConfigPath, PathError> {
    let replaced = raw.trim().replace('\\', "/");
    let trimmed = replaced.trim_matches(|c: char| c == '/' || c.is_whitespace());

    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }
    if !trimmed.to_ascii_lowercase().ends_with(".toml") {
        return Err(PathError::NotToml {
            path: trimmed.to_string(),
        });
    }
    if let Some(segment) = trimmed
        .split('/')
        .find(|segment| segment.is_empty() || *segment == "." || *segment == "..")
    {
        return Err(PathError::InvalidSegment {
            path: trimmed.to_string(),
            segment: segment.to_string(),
        });
    }

    Ok(ConfigPath {
        inner: trimmed.to_string(),
    })
}
