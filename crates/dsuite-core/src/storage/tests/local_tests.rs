use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use crate::kernel::error::{Error, Result};
use crate::storage::error::StorageSystemError;
use crate::storage::local::LocalStorageProvider;
use crate::storage::provider::StorageProvider;

// Helper function to create PathBuf from str for tests
fn p(s: &str) -> PathBuf {
    PathBuf::from(s)
}

#[test]
fn test_write_and_read_bytes() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    provider.write_bytes(&p("META-INF/MANIFEST.MF"), b"Manifest-Version: 1.0\n\n")?;

    // Parent directories are created on demand
    assert!(provider.is_dir(&p("META-INF")));
    assert!(provider.is_file(&p("META-INF/MANIFEST.MF")));
    assert_eq!(
        provider.read_to_string(&p("META-INF/MANIFEST.MF"))?,
        "Manifest-Version: 1.0\n\n"
    );
    Ok(())
}

#[test]
fn test_write_replaces_existing_file() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    provider.write_bytes(&p("out.txt"), b"first")?;
    provider.write_bytes(&p("out.txt"), b"second")?;
    assert_eq!(provider.read_to_string(&p("out.txt"))?, "second");

    // No temp files left behind
    assert_eq!(provider.read_dir(&p(""))?, vec![p("out.txt")]);
    Ok(())
}

#[test]
fn test_read_missing_file_is_file_not_found() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    let result = provider.read_to_string(&p("missing.toml"));
    assert!(matches!(
        result,
        Err(Error::StorageSystem(StorageSystemError::FileNotFound(_)))
    ));
}

#[test]
fn test_read_dir_returns_sorted_relative_paths() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    let config_dir = temp_dir.path().join("config");
    fs::create_dir_all(config_dir.join("registry")).expect("Failed to create config dirs");
    fs::write(config_dir.join("b.toml"), "").expect("Failed to write b.toml");
    fs::write(config_dir.join("a.toml"), "").expect("Failed to write a.toml");

    let entries = provider.read_dir(&p("config"))?;
    assert_eq!(
        entries,
        vec![p("config/a.toml"), p("config/b.toml"), p("config/registry")]
    );
    assert!(provider.is_file(&entries[0]));
    assert!(provider.is_dir(&entries[2]));
    Ok(())
}

#[test]
fn test_read_dir_missing_directory_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    match provider.read_dir(&p("nope")) {
        Err(Error::StorageSystem(StorageSystemError::Io { operation, .. })) => {
            assert_eq!(operation, "read_dir")
        }
        other => panic!("expected Io error, got {:?}", other),
    }
}
