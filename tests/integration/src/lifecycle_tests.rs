//! A project directory built, moved around and torn down through handles,
//! once with the blocking API and once with the async one.

use fhandle::{Encoding, Fragment, PathHandle, PathKind};
use fhandle_test_utils::TestTree;
use std::io::Write;
use std::path::PathBuf;

#[test]
fn test_project_lifecycle_blocking() {
    let tree = TestTree::new();
    let root = PathHandle::new(tree.root()).unwrap();

    let project = PathHandle::from_handle(&root, ["project"]).unwrap();
    project.make_dir(false).unwrap();

    let readme = project.create_file("README.md", "# Project\n").unwrap();
    let config = project
        .create_file("config.json", r#"{"debug": true}"#)
        .unwrap();

    let log = PathHandle::from_fragments([Fragment::from(&project), Fragment::from("run.log")]).unwrap();
    let mut stream = log.create_write_stream().unwrap();
    for i in 0..3 {
        writeln!(stream, "step {i}").unwrap();
    }
    stream.finish().unwrap();

    let renamed = readme.rename_file("INDEX.md").unwrap();
    let backup = config.copy_file(config.change_file_ext("json.bak").unwrap().path()).unwrap();
    assert_eq!(backup.fullname(), "config.json.bak");

    assert_eq!(
        project.list_dir(false).unwrap(),
        vec![
            PathBuf::from("INDEX.md"),
            PathBuf::from("config.json"),
            PathBuf::from("config.json.bak"),
            PathBuf::from("run.log"),
        ]
    );
    assert_eq!(renamed.read_text(Encoding::Utf8).unwrap(), "# Project\n");
    assert_eq!(log.read_file_offset(7, Some(6)).unwrap(), b"step 1");

    let archive = project.change_dir_name("project.old").unwrap();
    assert_eq!(archive.kind(), PathKind::File);

    project.delete_dir(true).unwrap();
    tree.assert_not_exists("project");
}

#[tokio::test]
async fn test_project_lifecycle_async() {
    let tree = TestTree::new();
    let project = PathHandle::new(tree.path("async-project")).unwrap();
    project.make_dir_async(false).await.unwrap();

    let data = project.create_file_async("data.yaml", "items: [1, 2]\n").await.unwrap();
    let parsed: serde_json::Value = data.read_structured_async().await.unwrap();
    assert_eq!(parsed["items"][1], 2);

    let moved = data.rename_file_async("renamed.yaml").await.unwrap();
    assert!(!data.exists_async().await);
    assert!(moved.is_file_async().await);

    let names = project.list_dir_async(true).await.unwrap();
    assert_eq!(names, vec![tree.path("async-project").join("renamed.yaml")]);

    project.delete_dir_async(true).await.unwrap();
    assert!(!project.exists_async().await);
}
