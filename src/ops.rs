//! Engine handle: the batch entry points.
//!
//! `Ops` is built explicitly by the embedding application with its executor, creation
//! modes and identity resolver. Every batch entry point is best-effort: all items run,
//! successes stay applied, and failures come back together in a `BatchFailure`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::{BatchFailure, FsOpError};
use crate::executor::{BatchReport, Executor, OperationKind, PoolExecutor, run_batch};
use crate::fs_ops::{self, Modes, PathPair};
use crate::platform::{IdentityResolver, default_resolver};
use crate::stat::{self, FsStat};

pub type BatchResult = Result<BatchReport, BatchFailure>;

#[derive(Clone)]
pub struct Ops<E: Executor = PoolExecutor> {
    executor: E,
    modes: Modes,
    ids: Arc<dyn IdentityResolver>,
}

impl<E: Executor> Ops<E> {
    /// Engine with the platform's default identity resolver.
    pub fn new(executor: E, modes: Modes) -> Self {
        Self::with_resolver(executor, modes, default_resolver())
    }

    pub fn with_resolver(executor: E, modes: Modes, ids: Arc<dyn IdentityResolver>) -> Self {
        Self {
            executor,
            modes,
            ids,
        }
    }

    pub fn modes(&self) -> Modes {
        self.modes
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Normalized metadata for one path (symlinks are not followed).
    pub fn stat(&self, path: &Path) -> Result<FsStat, FsOpError> {
        stat::stat(path, self.ids.as_ref())
    }

    /// Stat every path concurrently; results are in input order.
    pub fn stat_all(&self, paths: Vec<PathBuf>) -> Vec<Result<FsStat, FsOpError>> {
        let ids = self.ids.as_ref();
        self.executor.map_all(paths, |p| stat::stat(&p, ids))
    }

    /// Create every path: trailing separator = directory, otherwise an empty file.
    pub fn create_all(&self, paths: Vec<PathBuf>) -> BatchResult {
        let modes = self.modes;
        run_batch(&self.executor, OperationKind::Create, paths, |p| {
            fs_ops::create(&p, &modes)
        })
    }

    /// Move each source to its destination, creating missing destination parents.
    pub fn rename_all(&self, pairs: Vec<PathPair>) -> BatchResult {
        let modes = self.modes;
        run_batch(&self.executor, OperationKind::Rename, pairs, |pair| {
            fs_ops::rename(&pair.src, &pair.dest, &modes)
        })
    }

    /// Remove every path (directories recursively).
    ///
    /// Entries are not reduced here: pass the output of `unify_ancestors` when the set
    /// may contain both a directory and something inside it.
    pub fn remove_all(&self, paths: Vec<PathBuf>) -> BatchResult {
        run_batch(&self.executor, OperationKind::Remove, paths, |p| {
            fs_ops::remove(&p)
        })
    }

    /// Move each source to its destination; destination parents must already exist.
    pub fn cut_all(&self, pairs: Vec<PathPair>) -> BatchResult {
        run_batch(&self.executor, OperationKind::Cut, pairs, |pair| {
            fs_ops::cut(&pair.src, &pair.dest)
        })
    }

    /// Copy each source (file or whole tree) to its destination.
    pub fn copy_all(&self, pairs: Vec<PathPair>) -> BatchResult {
        run_batch(&self.executor, OperationKind::Copy, pairs, |pair| {
            fs_ops::copy(&pair.src, &pair.dest)
        })
    }
}

impl<E: Executor + std::fmt::Debug> std::fmt::Debug for Ops<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ops")
            .field("executor", &self.executor)
            .field("modes", &self.modes)
            .finish_non_exhaustive()
    }
}
