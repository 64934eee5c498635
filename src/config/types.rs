//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::fs_ops::{FILE_MODE_DEFAULT, FOLDER_MODE_DEFAULT, Modes};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// Per-batch and per-item details
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for the `batchfs` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Mode for newly created files (before umask)
    pub file_mode: u32,
    /// Mode for newly created directories (before umask)
    pub folder_mode: u32,
    /// Worker threads; None = one per CPU
    pub workers: Option<usize>,
    /// Skip the user/group database and print numeric ids
    pub numeric_ids: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_mode: FILE_MODE_DEFAULT,
            folder_mode: FOLDER_MODE_DEFAULT,
            workers: None,
            numeric_ids: false,
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    pub fn modes(&self) -> Modes {
        Modes {
            file: self.file_mode,
            folder: self.folder_mode,
        }
    }
}
