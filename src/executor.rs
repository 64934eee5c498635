//! Batch executor.
//!
//! The embedding application builds one long-lived executor and hands it to `Ops`;
//! this crate never spawns threads itself. A batch maps one unit of work per item,
//! blocks until every unit has finished, and never cancels siblings of a failed unit.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::errors::{BatchFailure, FsOpError};

/// "Map this function over these items, run them all, return when all are done."
pub trait Executor: Send + Sync {
    /// Results come back in input order.
    fn map_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync;
}

/// Runs work on a shared rayon pool. Clones share the same pool.
#[derive(Clone)]
pub struct PoolExecutor {
    pool: Arc<ThreadPool>,
}

impl PoolExecutor {
    /// Build a dedicated pool; `None` lets rayon pick one thread per CPU.
    pub fn new(threads: Option<usize>) -> Result<Self, ThreadPoolBuildError> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("batchfs-{i}"));
        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }
        Ok(Self::from_pool(Arc::new(builder.build()?)))
    }

    /// Share a pool the application already owns.
    pub fn from_pool(pool: Arc<ThreadPool>) -> Self {
        Self { pool }
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl fmt::Debug for PoolExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolExecutor")
            .field("threads", &self.threads())
            .finish()
    }
}

impl Executor for PoolExecutor {
    fn map_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync,
    {
        self.pool.install(|| items.into_par_iter().map(f).collect())
    }
}

/// Runs every item on the calling thread, in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn map_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync,
    {
        items.into_iter().map(f).collect()
    }
}

/// Which batch entry point produced a report or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Create,
    Rename,
    Remove,
    Cut,
    Copy,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationKind::Create => "create",
            OperationKind::Rename => "rename",
            OperationKind::Remove => "remove",
            OperationKind::Cut => "cut",
            OperationKind::Copy => "copy",
        };
        f.write_str(s)
    }
}

/// Summary of a batch in which every item succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub operation: OperationKind,
    pub completed: usize,
}

/// Run `op` over every item and aggregate the failures.
pub(crate) fn run_batch<E, T, F>(
    executor: &E,
    operation: OperationKind,
    items: Vec<T>,
    op: F,
) -> Result<BatchReport, BatchFailure>
where
    E: Executor,
    T: Send,
    F: Fn(T) -> Result<(), FsOpError> + Send + Sync,
{
    let attempted = items.len();
    if attempted == 0 {
        return Ok(BatchReport {
            operation,
            completed: 0,
        });
    }

    let started = Instant::now();
    let failures: Vec<FsOpError> = executor
        .map_all(items, op)
        .into_iter()
        .filter_map(Result::err)
        .collect();

    for e in &failures {
        warn!(%operation, kind = %e.kind(), path = %e.path().display(), error = %e, "batch item failed");
    }
    info!(
        %operation,
        attempted,
        failed = failures.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "batch finished"
    );

    if failures.is_empty() {
        Ok(BatchReport {
            operation,
            completed: attempted,
        })
    } else {
        Err(BatchFailure {
            operation,
            attempted,
            failures,
        })
    }
}
