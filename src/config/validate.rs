//! Config validation logic.

use anyhow::{Result, bail};
use tracing::debug;

use super::types::Config;

const MODE_MASK: u32 = 0o7777;

impl Config {
    /// Modes must fit in the permission bits; an explicit worker count must be positive.
    pub fn validate(&self) -> Result<()> {
        if self.file_mode & !MODE_MASK != 0 {
            bail!("file_mode {:o} has bits outside {:o}", self.file_mode, MODE_MASK);
        }
        if self.folder_mode & !MODE_MASK != 0 {
            bail!("folder_mode {:o} has bits outside {:o}", self.folder_mode, MODE_MASK);
        }
        if self.workers == Some(0) {
            bail!("workers must be at least 1");
        }
        debug!(
            file_mode = format!("{:o}", self.file_mode),
            folder_mode = format!("{:o}", self.folder_mode),
            workers = ?self.workers,
            "config validated"
        );
        Ok(())
    }
}
