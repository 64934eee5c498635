use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::fs;

use batchfs::{ErrorKind, InlineExecutor, Modes, Ops, PathPair};

#[test]
fn copy_tree_mirrors_layout() {
    let td = TempDir::new().unwrap();
    let root = dunce::canonicalize(td.path()).unwrap();
    let src = td.child("project");
    src.child("README.md").write_str("readme").unwrap();
    src.child("src/main.rs").write_str("fn main() {}").unwrap();
    src.child("empty").create_dir_all().unwrap();
    src.child("target/debug/.keep").touch().unwrap();

    let dest = root.join("backup/project");
    let ops = Ops::new(InlineExecutor, Modes::default());
    ops.copy_all(vec![PathPair::new(src.path(), &dest)]).unwrap();

    assert_eq!(fs::read_to_string(dest.join("README.md")).unwrap(), "readme");
    assert_eq!(fs::read_to_string(dest.join("src/main.rs")).unwrap(), "fn main() {}");
    assert!(dest.join("empty").is_dir());
    assert!(dest.join("target/debug/.keep").is_file());
}

#[test]
fn copy_tree_into_itself_is_rejected() {
    let td = TempDir::new().unwrap();
    let src = td.child("loop");
    src.child("f").touch().unwrap();

    let ops = Ops::new(InlineExecutor, Modes::default());
    let failure = ops
        .copy_all(vec![PathPair::new(src.path(), src.path().join("inner"))])
        .unwrap_err();
    assert_eq!(failure.failures[0].kind(), ErrorKind::Other);
    assert!(!src.path().join("inner").exists());
}
