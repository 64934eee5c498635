//! Core library for `batchfs`.
//!
//! Applies batches of filesystem mutations (create, rename, cut, copy, remove)
//! concurrently on an injected executor and reports per-path metadata in a
//! platform-independent shape.
//!
//! - `paths`: ancestor relations; collapse path sets into recursive roots.
//! - `stat`: metadata prober producing `FsStat`.
//! - `fs_ops`: single-item mutation primitives.
//! - `executor` / `ops`: the batch layer.

pub mod cli;
pub mod config;
pub mod errors;
pub mod executor;
pub mod fs_ops;
pub mod ops;
pub mod output;
pub mod paths;
pub mod platform;
pub mod stat;

pub use config::{Config, LogLevel, default_config_path, load_config};
pub use errors::{BatchFailure, ErrorKind, FsOpError};
pub use executor::{BatchReport, Executor, InlineExecutor, OperationKind, PoolExecutor};
pub use fs_ops::{Modes, PathPair};
pub use ops::{BatchResult, Ops};
pub use paths::{ancestors, unify_ancestors};
pub use platform::{IdentityResolver, NumericIds, default_resolver};
pub use stat::{EntryType, FsStat, stat};

/// Convenient imports for embedders.
pub mod prelude {
    pub use crate::errors::{BatchFailure, ErrorKind, FsOpError};
    pub use crate::executor::{Executor, InlineExecutor, PoolExecutor};
    pub use crate::fs_ops::{Modes, PathPair};
    pub use crate::ops::Ops;
    pub use crate::paths::{ancestors, unify_ancestors};
    pub use crate::stat::{EntryType, FsStat};
}
