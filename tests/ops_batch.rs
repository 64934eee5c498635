use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use batchfs::{
    EntryType, ErrorKind, InlineExecutor, Modes, NumericIds, OperationKind, Ops, PathPair,
    PoolExecutor,
};
use std::sync::Arc;

fn dir_path(p: &Path) -> PathBuf {
    let mut s: OsString = p.as_os_str().to_owned();
    s.push(std::path::MAIN_SEPARATOR_STR);
    PathBuf::from(s)
}

fn pool_ops() -> Ops {
    let exec = PoolExecutor::new(Some(4)).unwrap();
    Ops::with_resolver(exec, Modes::default(), Arc::new(NumericIds))
}

#[test]
fn create_all_makes_files_and_directories() {
    let td = tempdir().unwrap();
    let file = td.path().join("a/b/file.txt");
    let dir = td.path().join("c/d");
    let ops = pool_ops();

    let report = ops.create_all(vec![file.clone(), dir_path(&dir)]).unwrap();
    assert_eq!(report.operation, OperationKind::Create);
    assert_eq!(report.completed, 2);
    assert!(file.is_file());
    assert_eq!(fs::metadata(&file).unwrap().len(), 0);
    assert!(dir.is_dir());
}

#[test]
fn empty_batch_succeeds_immediately() {
    let ops = pool_ops();
    let report = ops.copy_all(Vec::new()).unwrap();
    assert_eq!(report.completed, 0);
}

#[test]
fn rename_all_provisions_parents_but_cut_does_not() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.txt");
    let b = td.path().join("b.txt");
    fs::write(&a, "a").unwrap();
    fs::write(&b, "b").unwrap();
    let ops = Ops::with_resolver(InlineExecutor, Modes::default(), Arc::new(NumericIds));

    let renamed = td.path().join("new/deep/a.txt");
    ops.rename_all(vec![PathPair::new(&a, &renamed)]).unwrap();
    assert!(renamed.is_file());
    assert!(!a.exists());

    let cut_dest = td.path().join("missing/b.txt");
    let failure = ops.cut_all(vec![PathPair::new(&b, &cut_dest)]).unwrap_err();
    assert_eq!(failure.kind(), ErrorKind::PartialBatchFailure);
    assert_eq!(failure.failures.len(), 1);
    assert_eq!(failure.failures[0].kind(), ErrorKind::NotFound);
    assert!(b.exists(), "source stays put when the cut fails");
}

#[test]
fn partial_failure_keeps_successful_items() {
    let td = tempdir().unwrap();
    let good = td.path().join("good.txt");
    let missing = td.path().join("missing.txt");
    fs::write(&good, "x").unwrap();
    let ops = pool_ops();

    let failure = ops
        .copy_all(vec![
            PathPair::new(&good, td.path().join("good.copy")),
            PathPair::new(&missing, td.path().join("missing.copy")),
        ])
        .unwrap_err();
    assert_eq!(failure.operation, OperationKind::Copy);
    assert_eq!(failure.attempted, 2);
    assert_eq!(failure.succeeded(), 1);
    assert_eq!(failure.failures[0].kind(), ErrorKind::NotFound);
    assert_eq!(failure.failures[0].path(), missing.as_path());
    assert_eq!(fs::read_to_string(td.path().join("good.copy")).unwrap(), "x");
}

#[test]
fn copy_all_copies_trees() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    fs::create_dir_all(src.join("nested")).unwrap();
    fs::write(src.join("top.txt"), "top").unwrap();
    fs::write(src.join("nested/inner.txt"), "inner").unwrap();
    let dest = td.path().join("out/copy");
    let ops = pool_ops();

    ops.copy_all(vec![PathPair::new(&src, &dest)]).unwrap();
    assert_eq!(fs::read_to_string(dest.join("top.txt")).unwrap(), "top");
    assert_eq!(fs::read_to_string(dest.join("nested/inner.txt")).unwrap(), "inner");
    assert!(src.join("nested/inner.txt").exists());

    let again = ops.copy_all(vec![PathPair::new(&src, &dest)]).unwrap_err();
    assert_eq!(again.failures[0].kind(), ErrorKind::AlreadyExists);
}

#[test]
fn many_items_on_the_pool() {
    let td = tempdir().unwrap();
    let paths: Vec<PathBuf> = (0..64).map(|i| td.path().join(format!("d{i}/f.txt"))).collect();
    let ops = pool_ops();

    let report = ops.create_all(paths.clone()).unwrap();
    assert_eq!(report.completed, 64);
    assert!(paths.iter().all(|p| p.is_file()));

    let report = ops.remove_all(paths.clone()).unwrap();
    assert_eq!(report.completed, 64);
    assert!(paths.iter().all(|p| !p.exists()));
}

#[test]
fn created_entry_type_follows_directory_marker() {
    let td = tempdir().unwrap();
    let ops = pool_ops();
    let file = td.path().join("made/file");
    let dir = td.path().join("made/dir");

    ops.create_all(vec![file.clone()]).unwrap();
    ops.create_all(vec![dir_path(&dir)]).unwrap();

    assert_eq!(ops.stat(&file).unwrap().entry_type, EntryType::File);
    assert_eq!(ops.stat(&dir).unwrap().entry_type, EntryType::Directory);

    // Creating again is a no-op for both kinds.
    ops.create_all(vec![file.clone(), dir_path(&dir)]).unwrap();
    assert_eq!(ops.stat(&file).unwrap().entry_type, EntryType::File);
    assert_eq!(ops.stat(&dir).unwrap().entry_type, EntryType::Directory);
}
