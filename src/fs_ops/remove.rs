//! Remove one entry per call: directories recursively, links never followed.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::FsOpError;
use crate::platform::symlink_dir_remove;

/// Remove `path`: directories recursively, everything else as a single entry.
///
/// A symlink is never followed, even when it points at a directory; only the link
/// goes away. A missing path is a `NotFound` error.
pub fn remove(path: &Path) -> Result<(), FsOpError> {
    let meta = fs::symlink_metadata(path).map_err(|e| FsOpError::from_io("remove", path, e))?;
    let ft = meta.file_type();
    debug!(path = %path.display(), is_dir = ft.is_dir(), is_symlink = ft.is_symlink(), "dispatch remove");

    let result = if ft.is_dir() {
        fs::remove_dir_all(path)
    } else if ft.is_symlink() && fs::metadata(path).is_ok_and(|m| m.is_dir()) {
        symlink_dir_remove(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| FsOpError::from_io("remove", path, e))
}
