use bundle_fs::{Error, NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path()).join("reports/markdown/day.toml");

    io::write_text(&path, "title = \"Day\"\n").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "title = \"Day\"\n");
}

#[test]
fn test_write_atomic_overwrites_and_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.toml");
    fs::write(&file_path, "original = true\n").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated = true\n").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated = true\n");
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn test_read_text_missing_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path()).join("missing.toml");

    let err = io::read_text(&path).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");
}
