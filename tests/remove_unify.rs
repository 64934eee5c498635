use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::tempdir;

use batchfs::{ErrorKind, InlineExecutor, Modes, NumericIds, Ops, PoolExecutor, unify_ancestors};

#[test]
fn unified_remove_succeeds_for_nested_paths() {
    let td = tempdir().unwrap();
    let root = td.path().join("tree");
    fs::create_dir_all(root.join("a/b")).unwrap();
    fs::write(root.join("a/b/f.txt"), "f").unwrap();
    fs::write(root.join("a/g.txt"), "g").unwrap();

    let set: HashSet<PathBuf> = [
        root.clone(),
        root.join("a"),
        root.join("a/b/f.txt"),
        root.join("a/g.txt"),
    ]
    .into_iter()
    .collect();
    let roots: Vec<PathBuf> = unify_ancestors(&set).into_iter().collect();
    assert_eq!(roots, vec![root.clone()]);

    let ops = Ops::with_resolver(PoolExecutor::new(Some(2)).unwrap(), Modes::default(), Arc::new(NumericIds));
    let report = ops.remove_all(roots).unwrap();
    assert_eq!(report.completed, 1);
    assert!(!root.exists());
}

#[test]
fn remove_of_missing_path_is_not_found() {
    let td = tempdir().unwrap();
    let ops = Ops::with_resolver(InlineExecutor, Modes::default(), Arc::new(NumericIds));
    let failure = ops.remove_all(vec![td.path().join("nope")]).unwrap_err();
    assert_eq!(failure.failures.len(), 1);
    assert_eq!(failure.failures[0].kind(), ErrorKind::NotFound);
}

#[test]
fn sequential_remove_of_parent_then_child_reports_child() {
    let td = tempdir().unwrap();
    let root = td.path().join("t");
    fs::create_dir_all(&root).unwrap();
    let child = root.join("c.txt");
    fs::write(&child, "c").unwrap();

    // Without unification the child is gone by the time its own removal runs.
    let ops = Ops::with_resolver(InlineExecutor, Modes::default(), Arc::new(NumericIds));
    let failure = ops.remove_all(vec![root.clone(), child.clone()]).unwrap_err();
    assert_eq!(failure.succeeded(), 1);
    assert_eq!(failure.failures[0].path(), child.as_path());
    assert!(!root.exists());
}

#[test]
fn unified_remove_with_directory_marker_root() {
    let td = tempdir().unwrap();
    let dir = td.path().join("d");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("x.txt"), "x").unwrap();

    let mut marked: OsString = dir.clone().into_os_string();
    marked.push(std::path::MAIN_SEPARATOR_STR);
    let set: HashSet<PathBuf> = [PathBuf::from(marked), dir.join("x.txt")].into_iter().collect();

    let roots: Vec<PathBuf> = unify_ancestors(&set).into_iter().collect();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0], dir);

    let ops = Ops::with_resolver(PoolExecutor::new(Some(2)).unwrap(), Modes::default(), Arc::new(NumericIds));
    let report = ops.remove_all(roots).unwrap();
    assert_eq!(report.completed, 1);
    assert!(!dir.exists());
}
