//! Tests for error handling under adverse filesystem conditions
//!
//! Guards must fail before any side effect, and anything the guards do
//! not cover must surface as the underlying I/O error.

use fhandle::{Encoding, Error, ErrorKind, PathHandle, RobustnessConfig};
use tempfile::tempdir;

#[test]
fn rename_with_wrong_source_type_leaves_tree_untouched() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("folder")).unwrap();
    let handle = PathHandle::new(dir.path().join("folder")).unwrap();

    let err = handle.rename_file("elsewhere").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::WrongType);
    assert!(dir.path().join("folder").is_dir());
    assert!(!dir.path().join("elsewhere").exists());
}

#[test]
fn error_messages_name_operation_and_path() {
    let dir = tempdir().unwrap();
    let handle = PathHandle::new(dir.path().join("absent.txt")).unwrap();

    for (operation, err) in [
        ("delete_file", handle.delete_file().unwrap_err()),
        ("read_text", handle.read_text(Encoding::Utf8).unwrap_err()),
        ("copy_file", handle.copy_file("b.txt").unwrap_err()),
        ("read_file_offset", handle.read_file_offset(0, None).unwrap_err()),
    ] {
        let message = err.to_string();
        assert!(message.contains(operation), "{message} should name {operation}");
        assert!(message.contains("absent.txt"), "{message} should name the path");
    }
}

#[test]
fn read_structured_missing_file_is_io_passthrough() {
    let dir = tempdir().unwrap();
    let handle = PathHandle::new(dir.path().join("config.json")).unwrap();

    let err = handle.read_structured::<serde_json::Value>().unwrap_err();

    match err {
        Error::Io { source, .. } => assert_eq!(source.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected passthrough I/O error, got {other:?}"),
    }
}

#[test]
fn write_atomic_to_missing_parent_creates_directories() {
    // write_atomic calls create_dir_all, so writing through missing parents should work
    let dir = tempdir().unwrap();
    let handle = PathHandle::new(dir.path().join("a").join("b").join("file.txt")).unwrap();

    handle
        .write_atomic("deep content", RobustnessConfig::default())
        .unwrap();

    assert_eq!(handle.read_text(Encoding::Utf8).unwrap(), "deep content");
}

#[test]
fn write_to_missing_parent_fails() {
    let dir = tempdir().unwrap();
    let handle = PathHandle::new(dir.path().join("no").join("such").join("file.txt")).unwrap();

    let err = handle.write("content").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Other);
}

#[test]
fn write_atomic_cleans_up_temp_file_on_success() {
    let dir = tempdir().unwrap();
    let handle = PathHandle::new(dir.path().join("target.txt")).unwrap();

    handle.write_atomic("content", RobustnessConfig::default()).unwrap();

    // The temp file pattern is .{filename}.{pid}.tmp
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();

    assert!(
        entries.is_empty(),
        "No temp files should remain after successful write, found: {:?}",
        entries.iter().map(|e| e.file_name()).collect::<Vec<_>>()
    );
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use std::fs::{self, Permissions};
    use std::os::unix::fs::PermissionsExt;

    fn is_root() -> bool {
        match std::process::Command::new("id").arg("-u").output() {
            Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "0",
            Err(_) => false,
        }
    }

    #[test]
    fn write_to_readonly_directory_returns_error() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let dir = tempdir().unwrap();
        let readonly_dir = dir.path().join("readonly");
        fs::create_dir(&readonly_dir).unwrap();
        fs::set_permissions(&readonly_dir, Permissions::from_mode(0o555)).unwrap();

        let handle = PathHandle::new(readonly_dir.join("file.txt")).unwrap();
        let result = handle.write("content");

        // Restore permissions before assertions (for cleanup)
        let _ = fs::set_permissions(&readonly_dir, Permissions::from_mode(0o755));

        let err = result.unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "got {err:?}");
    }

    #[test]
    fn read_permission_denied_is_passthrough() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("secret.txt");
        fs::write(&file_path, "secret content").unwrap();
        fs::set_permissions(&file_path, Permissions::from_mode(0o000)).unwrap();

        let handle = PathHandle::new(&file_path).unwrap();
        let result = handle.read_bytes();

        let _ = fs::set_permissions(&file_path, Permissions::from_mode(0o644));

        match result.unwrap_err() {
            Error::Io { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied)
            }
            other => panic!("expected passthrough I/O error, got {other:?}"),
        }
    }

    #[test]
    fn write_atomic_unwritable_parent_preserves_original() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let dir = tempdir().unwrap();
        let parent = dir.path().join("parent");
        fs::create_dir(&parent).unwrap();

        let file_path = parent.join("existing.txt");
        fs::write(&file_path, "original").unwrap();
        fs::set_permissions(&parent, Permissions::from_mode(0o555)).unwrap();

        // Neither the lock file nor the temp file can be created
        let handle = PathHandle::new(&file_path).unwrap();
        let result = handle.write_atomic("new content", RobustnessConfig::default());

        let _ = fs::set_permissions(&parent, Permissions::from_mode(0o755));

        assert!(
            result.is_err(),
            "Writing when parent is read-only should fail"
        );
        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(
            content, "original",
            "Original file content must be preserved when write fails"
        );
    }
}
