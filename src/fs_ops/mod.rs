//! Filesystem mutation primitives.
//!
//! Each primitive acts on one path or one (source, destination) pair and shares no
//! mutable state with other invocations, so unrelated calls may run concurrently.
//! Two entries of one batch touching the same path is the caller's problem.

mod copy;
mod create;
mod metadata;
mod mv;
mod remove;

pub use copy::copy;
pub use create::create;
pub use metadata::preserve_metadata;
pub use mv::{cut, rename};
pub use remove::remove;

use serde::Serialize;
use std::path::PathBuf;

/// Default permission mode for newly created files.
pub const FILE_MODE_DEFAULT: u32 = 0o644;
/// Default permission mode for newly created directories.
pub const FOLDER_MODE_DEFAULT: u32 = 0o755;

/// Permission modes applied to entries this crate creates (before umask).
/// Ignored on platforms without POSIX modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modes {
    pub file: u32,
    pub folder: u32,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            file: FILE_MODE_DEFAULT,
            folder: FOLDER_MODE_DEFAULT,
        }
    }
}

/// One source -> destination request for rename, cut and copy batches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PathPair {
    pub src: PathBuf,
    pub dest: PathBuf,
}

impl PathPair {
    pub fn new(src: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
        }
    }
}

impl<S: Into<PathBuf>, D: Into<PathBuf>> From<(S, D)> for PathPair {
    fn from((src, dest): (S, D)) -> Self {
        Self::new(src, dest)
    }
}
