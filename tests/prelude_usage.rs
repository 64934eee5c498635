use batchfs::prelude::*;

#[test]
fn prelude_exports_expected_items() {
    let ops = Ops::new(InlineExecutor, Modes::default());
    assert_eq!(ops.modes(), Modes::default());

    let pair: PathPair = ("/a", "/b").into();
    assert_eq!(pair, PathPair::new("/a", "/b"));

    let _ = ErrorKind::PartialBatchFailure;
    let _ = EntryType::Directory;
    let _reduce: fn(&std::collections::HashSet<std::path::PathBuf>) -> _ = unify_ancestors;
    let _anc: fn(&std::path::Path) -> _ = ancestors;
    let _stat: Option<FsStat> = None;
    let _fail: Option<BatchFailure> = None;
    let _err: Option<FsOpError> = None;
    let _pool: Option<PoolExecutor> = None;
}
