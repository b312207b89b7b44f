//! [`TestBundle`]: a configuration root in a temporary directory.

use std::fs;
use std::path::Path;

use bundle_fs::FsGateway;
use tempfile::TempDir;

use crate::fixtures;

/// A temporary configuration root with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use bundle_test_utils::bundle::TestBundle;
///
/// let bundle = TestBundle::android();
/// bundle.assert_file_contains("meta/bundle.toml", "profile = \"android\"");
/// ```
pub struct TestBundle {
    temp_dir: TempDir,
}

impl Default for TestBundle {
    fn default() -> Self {
        Self::empty()
    }
}

impl TestBundle {
    /// An empty configuration root.
    pub fn empty() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// A root holding every file of the Android bundle.
    pub fn android() -> Self {
        let bundle = Self::empty();
        for (path, content) in fixtures::android_files() {
            bundle.write(&path, &content);
        }
        bundle
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A gateway over this root.
    pub fn gateway(&self) -> FsGateway {
        FsGateway::new(self.root())
    }

    /// Write `content` to `path` (relative to the root), creating directories.
    pub fn write(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    pub fn remove(&self, path: &str) {
        fs::remove_file(self.root().join(path)).unwrap();
    }

    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "Expected {path} to contain {content:?}, got:\n{file_content}"
        );
    }
}
