//! Windows implementations of platform helpers.
//!
//! Notes:
//! - Windows has no uid/gid database reachable through std; ids are reported as 0
//!   and formatted by `NumericIds`.
//! - POSIX creation modes are not applicable and are ignored.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Windows exposes no numeric owner/group through std metadata.
pub fn raw_ids(_meta: &fs::Metadata) -> (u32, u32) {
    (0, 0)
}

/// `mkdir -p`; the mode is ignored.
pub fn apply_dir_mode(path: &Path, _mode: u32) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Open-or-create without truncation; the mode is ignored.
pub fn open_touch(path: &Path, _mode: u32) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Directory symlinks and junctions must be removed with RemoveDirectory.
pub fn symlink_dir_remove(path: &Path) -> io::Result<()> {
    fs::remove_dir(path)
}
