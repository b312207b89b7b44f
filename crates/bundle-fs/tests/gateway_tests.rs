use bundle_fs::{ConfigStorageGateway, Error, FsGateway, MemoryGateway, normalize};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_fs_gateway_write_then_read() {
    let temp = TempDir::new().unwrap();
    let gateway = FsGateway::new(temp.path());
    let path = normalize("converter/duration_rules.toml").unwrap();

    let resolved = gateway.write(&path, "min_minutes = 5\n").await.unwrap();
    assert_eq!(resolved, "converter/duration_rules.toml");

    let stored = gateway.read(&path).await.unwrap();
    assert_eq!(stored.resolved_path, "converter/duration_rules.toml");
    assert_eq!(stored.content, "min_minutes = 5\n");
    assert!(temp.path().join("converter").join("duration_rules.toml").is_file());
}

#[tokio::test]
async fn test_fs_gateway_read_missing_file() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("meta")).unwrap();
    let gateway = FsGateway::new(temp.path());

    let err = gateway
        .read(&normalize("meta/bundle.toml").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_memory_gateway_round_trip() {
    let gateway = MemoryGateway::with_files([("config.toml", "a = 1\n")]);
    let path = normalize("config.toml").unwrap();

    assert_eq!(gateway.read(&path).await.unwrap().content, "a = 1\n");
    gateway.write(&path, "a = 2\n").await.unwrap();
    assert_eq!(gateway.get("config.toml").await.as_deref(), Some("a = 2\n"));

    let missing = gateway.read(&normalize("meta/bundle.toml").unwrap()).await;
    assert!(matches!(missing, Err(Error::NotFound { .. })));
}

#[test]
fn test_storage_error_displays_bare_message() {
    assert_eq!(Error::storage("disk error").to_string(), "disk error");
}
