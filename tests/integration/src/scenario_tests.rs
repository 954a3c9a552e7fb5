//! End-to-end scenarios for `PathHandle`
//!
//! Cargo runs these with the `integration-tests` package directory as the
//! working directory, which holds the `package.json` fixture.

use fhandle::{Encoding, ErrorKind, PathHandle, PathKind};
use fhandle_test_utils::TestTree;
use pretty_assertions::assert_eq;

#[test]
fn test_package_json_in_working_directory() {
    let handle = PathHandle::new("./package.json").unwrap();

    assert_eq!(handle.ext(), ".json");
    assert_eq!(handle.name(), "package");
    assert_eq!(handle.fullname(), "package.json");
    assert_eq!(handle.kind(), PathKind::File);
    assert_eq!(handle.strict_kind().unwrap(), PathKind::File);

    let manifest: serde_json::Value = handle.read_structured().unwrap();
    assert_eq!(manifest["name"], "integration-fixture");
}

#[test]
fn test_working_directory_itself() {
    let cwd = std::env::current_dir().unwrap();
    let handle = PathHandle::new("./").unwrap();

    assert_eq!(handle.ext(), "");
    assert_eq!(handle.kind(), PathKind::Directory);
    assert_eq!(handle.path(), cwd.as_path());
    assert_eq!(Some(handle.root()), cwd.parent());
}

#[test]
fn test_missing_package_json2_uses_heuristic() {
    let handle = PathHandle::new("./package.json2").unwrap();

    assert!(!handle.exists());
    assert_eq!(handle.ext(), ".json2");
    assert_eq!(handle.kind(), PathKind::File);
    assert_eq!(handle.strict_kind().unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn test_read_file_offset_scenarios() {
    let tree = TestTree::new();
    let data: Vec<u8> = (0..200u8).collect();
    tree.file("blob.bin", &data);
    let handle = PathHandle::new(tree.path("blob.bin")).unwrap();

    let head = handle.read_file_offset(0, Some(64)).unwrap();
    assert_eq!(head.len(), 64);
    assert_eq!(head, data[..64].to_vec());

    let tail = handle.read_file_offset(10, None).unwrap();
    assert_eq!(tail, data[10..].to_vec());
}

#[test]
fn test_rename_onto_existing_leaves_source() {
    let tree = TestTree::new();
    tree.file("source.txt", "source content");
    tree.file("dest.txt", "dest content");
    let handle = PathHandle::new(tree.path("source.txt")).unwrap();

    let err = handle.rename_file(tree.path("dest.txt")).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    tree.assert_file_contains("source.txt", "source content");
    tree.assert_file_contains("dest.txt", "dest content");
}

#[test]
fn test_write_twice_final_state() {
    let tree = TestTree::new();
    let handle = PathHandle::new(tree.path("state.txt")).unwrap();

    handle.write("first").unwrap();
    handle.write("second").unwrap();

    assert_eq!(handle.read_text(Encoding::Utf8).unwrap(), "second");
    let parent = PathHandle::new(tree.root()).unwrap();
    assert_eq!(parent.list_dir(false).unwrap().len(), 1);
}

#[test]
fn test_change_file_ext_with_and_without_dot() {
    let tree = TestTree::new();
    tree.file("page.html", "<html/>");
    let handle = PathHandle::new(tree.path("page.html")).unwrap();

    let a = handle.change_file_ext("md").unwrap();
    let b = handle.change_file_ext(".md").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.path(), tree.path("page.md"));

    let dir = PathHandle::new(tree.root()).unwrap();
    assert_eq!(dir.change_file_ext("md").unwrap_err().kind(), ErrorKind::WrongType);
}
