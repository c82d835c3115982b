use std::{fs, io::ErrorKind, path::Path};

use futures::StreamExt;
use yard_walk::{BatchKind, FsTraversal, RecordKind, Traversal, WalkBatch, WalkOptions};

fn names(batch: &WalkBatch) -> Vec<&str> {
    batch
        .records
        .iter()
        .map(|r| r.name.to_str().unwrap())
        .collect()
}

fn create_tree(root: &Path) {
    fs::create_dir_all(root.join("b/inner")).unwrap();
    fs::create_dir_all(root.join("a")).unwrap();
    fs::write(root.join("z.txt"), "zz").unwrap();
    fs::write(root.join("x.txt"), "x").unwrap();
    fs::write(root.join("b/inner/deep.log"), "deep").unwrap();
}

#[tokio::test]
async fn walk_yields_directories_then_files_per_directory() {
    let dir = tempfile::tempdir().unwrap();
    create_tree(dir.path());

    let batches: Vec<_> = FsTraversal
        .walk(dir.path(), WalkOptions::default())
        .map(|batch| batch.unwrap())
        .collect()
        .await;

    println!("{:?}", batches);

    // root, a, b, b/inner
    assert_eq!(8, batches.len());

    assert_eq!(dir.path(), batches[0].root);
    assert_eq!(BatchKind::Directories, batches[0].kind);
    assert_eq!(vec!["a", "b"], names(&batches[0]));

    assert_eq!(dir.path(), batches[1].root);
    assert_eq!(BatchKind::Files, batches[1].kind);
    assert_eq!(vec!["x.txt", "z.txt"], names(&batches[1]));
    assert_eq!(1, batches[1].records[0].size);
    assert_eq!(2, batches[1].records[1].size);

    assert_eq!(dir.path().join("a"), batches[2].root);
    assert!(batches[2].records.is_empty());
    assert!(batches[3].records.is_empty());

    assert_eq!(dir.path().join("b"), batches[4].root);
    assert_eq!(vec!["inner"], names(&batches[4]));
    assert_eq!(RecordKind::Directory, batches[4].records[0].kind);

    assert_eq!(dir.path().join("b/inner"), batches[7].root);
    assert_eq!(BatchKind::Files, batches[7].kind);
    assert_eq!(vec!["deep.log"], names(&batches[7]));
    assert_eq!(RecordKind::File, batches[7].records[0].kind);
}

#[tokio::test]
async fn walk_missing_root_yields_single_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let results: Vec<_> = FsTraversal
        .walk(&missing, WalkOptions::default())
        .collect()
        .await;

    assert_eq!(1, results.len());

    let error = results.into_iter().next().unwrap().unwrap_err();
    assert_eq!(ErrorKind::NotFound, error.kind());
    assert_eq!(missing, error.path());
}

#[tokio::test]
async fn walk_is_pulled_batch_by_batch() {
    let dir = tempfile::tempdir().unwrap();
    create_tree(dir.path());

    let mut stream = FsTraversal.walk(dir.path(), WalkOptions::default());
    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(BatchKind::Directories, first.kind);

    // a directory is only read once the consumer pulls past the batches before it
    fs::write(dir.path().join("a/late.txt"), "late").unwrap();

    let rest: Vec<_> = stream.map(|batch| batch.unwrap()).collect().await;
    let a_files = rest
        .iter()
        .find(|batch| batch.root == dir.path().join("a") && batch.kind == BatchKind::Files)
        .unwrap();

    assert_eq!(vec!["late.txt"], names(a_files));
}

#[cfg(unix)]
#[tokio::test]
async fn walk_does_not_follow_links_by_default() {
    let dir = tempfile::tempdir().unwrap();
    create_tree(dir.path());
    std::os::unix::fs::symlink(dir.path().join("b"), dir.path().join("link")).unwrap();

    let batches: Vec<_> = FsTraversal
        .walk(dir.path(), WalkOptions::default())
        .map(|batch| batch.unwrap())
        .collect()
        .await;

    assert_eq!(vec!["a", "b"], names(&batches[0]));
    assert_eq!(vec!["link", "x.txt", "z.txt"], names(&batches[1]));
    assert_eq!(RecordKind::SymbolicLink, batches[1].records[0].kind);

    let followed: Vec<_> = FsTraversal
        .walk(dir.path(), WalkOptions { follow_links: true })
        .map(|batch| batch.unwrap())
        .collect()
        .await;

    assert_eq!(vec!["a", "b", "link"], names(&followed[0]));
}

#[cfg(unix)]
#[tokio::test]
async fn walk_keeps_names_that_are_not_utf8() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let dir = tempfile::tempdir().unwrap();
    let directory = OsStr::from_bytes(b"caf\xe9");
    let file = OsStr::from_bytes(b"f\xff.txt");

    fs::create_dir(dir.path().join(directory)).unwrap();
    fs::write(dir.path().join(directory).join(file), "x").unwrap();

    let batches: Vec<_> = FsTraversal
        .walk(dir.path(), WalkOptions::default())
        .map(|batch| batch.unwrap())
        .collect()
        .await;

    assert_eq!(4, batches.len());
    assert_eq!(directory, batches[0].records[0].name.as_os_str());
    assert_eq!(dir.path().join(directory), batches[2].root);
    assert_eq!(file, batches[3].records[0].name.as_os_str());
    assert_eq!(1, batches[3].records[0].size);
}
