//! CLI definition and parsing.
//!
//! Notes:
//! - Two-path commands take SOURCE DEST pairs, repeated: `copy a b c d` copies a->b and c->d.
//! - `remove` collapses nested paths to their outermost ancestor unless `--no-unify`.
//! - A trailing `/` on a `new` path creates a directory.
//! - --debug is a shorthand for --log-level debug.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};
use crate::fs_ops::PathPair;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Apply batches of filesystem operations concurrently"
)]
pub struct Args {
    /// Config file (overrides BATCHFS_CONFIG and the default location).
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Write logs to this file as well as stderr.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Number of worker threads (default: one per CPU).
    #[arg(short = 'j', long, global = true)]
    pub workers: Option<usize>,

    /// Print numeric uid/gid instead of names.
    #[arg(long, global = true)]
    pub numeric_ids: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create files (or directories, with a trailing separator) and missing parents.
    New {
        #[arg(required = true, value_hint = ValueHint::AnyPath)]
        paths: Vec<PathBuf>,
    },
    /// Move SOURCE to DEST, creating missing parents of DEST.
    Rename {
        #[arg(required = true, value_name = "SOURCE DEST", value_hint = ValueHint::AnyPath)]
        pairs: Vec<PathBuf>,
    },
    /// Delete files and directory trees.
    Remove {
        #[arg(required = true, value_hint = ValueHint::AnyPath)]
        paths: Vec<PathBuf>,
        /// Do not drop paths already covered by another path in the set.
        #[arg(long)]
        no_unify: bool,
    },
    /// Move SOURCE to DEST; parents of DEST must exist.
    Cut {
        #[arg(required = true, value_name = "SOURCE DEST", value_hint = ValueHint::AnyPath)]
        pairs: Vec<PathBuf>,
    },
    /// Copy files or whole directory trees.
    Copy {
        #[arg(required = true, value_name = "SOURCE DEST", value_hint = ValueHint::AnyPath)]
        pairs: Vec<PathBuf>,
    },
    /// Show normalized metadata without following symlinks.
    Stat {
        #[arg(required = true, value_hint = ValueHint::AnyPath)]
        paths: Vec<PathBuf>,
        /// One JSON object per line.
        #[arg(long)]
        json: bool,
    },
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(lvl) = self.effective_log_level() {
            cfg.log_level = lvl;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Some(n) = self.workers {
            cfg.workers = Some(n);
        }
        if self.numeric_ids {
            cfg.numeric_ids = true;
        }
    }
}

/// Group a flat SOURCE DEST SOURCE DEST ... list into pairs.
pub fn into_pairs(flat: &[PathBuf]) -> Result<Vec<PathPair>> {
    if flat.len() % 2 != 0 {
        bail!(
            "expected SOURCE DEST pairs, got {} paths (odd count); last: {}",
            flat.len(),
            flat.last().map(|p| p.display().to_string()).unwrap_or_default()
        );
    }
    Ok(flat
        .chunks_exact(2)
        .map(|c| PathPair::new(absolutize(&c[0]), absolutize(&c[1])))
        .collect())
}

/// Make `p` absolute against the current directory without touching the filesystem.
/// A trailing separator survives so `new dir/` still means a directory.
pub fn absolutize(p: &Path) -> PathBuf {
    let abs = std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf());
    let mut out = dunce::simplified(&abs).as_os_str().to_owned();
    if crate::platform::has_dir_marker(p) && !crate::platform::has_dir_marker(Path::new(&out)) {
        out.push(std::path::MAIN_SEPARATOR_STR);
    }
    PathBuf::from(out)
}

/// Parse the process arguments.
pub fn parse() -> Args {
    Args::parse()
}
