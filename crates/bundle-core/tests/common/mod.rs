#![allow(dead_code)]

use bundle_core::{BundleManifest, ConfigEntry, TransferEngine, TransferSettings};
use bundle_fs::{BundleFile, MemoryGateway, PathPolicy};
use bundle_test_utils::fixtures;

/// Memory gateway holding the full Android bundle.
pub fn android_gateway() -> MemoryGateway {
    MemoryGateway::with_files(fixtures::android_files())
}

pub fn android_engine() -> TransferEngine<MemoryGateway> {
    TransferEngine::new(android_gateway())
}

pub fn entries(files: Vec<(String, String)>) -> Vec<ConfigEntry> {
    files
        .into_iter()
        .map(|(path, content)| ConfigEntry::new(path, content))
        .collect()
}

/// The updated bundle as import entries, with the manifest's profile replaced.
pub fn updated_entries_with_profile(profile: &str) -> Vec<ConfigEntry> {
    entries(
        fixtures::updated_android_files()
            .into_iter()
            .map(|(path, content)| {
                if path == BundleFile::Manifest.as_str() {
                    let content =
                        content.replace("profile = \"android\"", &format!("profile = \"{profile}\""));
                    (path, content)
                } else {
                    (path, content)
                }
            })
            .collect(),
    )
}

/// Engine whose policy comes from a manifest listing `required`.
pub fn engine_with_required(gateway: MemoryGateway, required: &[BundleFile]) -> TransferEngine<MemoryGateway> {
    let mut manifest = BundleManifest::android_default("custom");
    manifest.required_paths = required.iter().map(BundleFile::config_path).collect();
    let policy = manifest.path_policy().unwrap();
    TransferEngine::with_policy(gateway, policy, TransferSettings::default())
}

/// Engine over an ad-hoc whitelist, with every listed file stored as `a = 1`.
pub fn engine_with_paths(paths: &[&str]) -> TransferEngine<MemoryGateway> {
    let policy = PathPolicy::from_required(paths).unwrap();
    let gateway = MemoryGateway::with_files(paths.iter().map(|p| (*p, "a = 1\n")));
    TransferEngine::with_policy(gateway, policy, TransferSettings::default())
}
