//! Ancestor relations over path sets.
//! Used to collapse a set of paths into recursive roots before batched removals/copies,
//! so no subtree is visited twice.
//!
//! Paths compare by components: `/tmp/a/` and `/tmp/a` are the same member.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Every proper ancestor of `path`, up to and including the root.
/// Pure; no I/O.
pub fn ancestors(path: &Path) -> HashSet<PathBuf> {
    proper_ancestors(path).map(Path::to_path_buf).collect()
}

/// Members of `paths` that have no ancestor inside `paths`.
///
/// Idempotent, always a subset of the input, and no two members of the result
/// are in an ancestor relationship.
pub fn unify_ancestors(paths: &HashSet<PathBuf>) -> HashSet<PathBuf> {
    paths
        .iter()
        .filter(|p| !proper_ancestors(p).any(|a| paths.contains(a)))
        .cloned()
        .collect()
}

// `Path::ancestors` yields the path itself first; relative paths end in "".
fn proper_ancestors(path: &Path) -> impl Iterator<Item = &Path> {
    path.ancestors()
        .skip(1)
        .filter(|a| !a.as_os_str().is_empty())
}
