//! Create files and directories (`touch` / `mkdir -p`).

use filetime::{FileTime, set_file_times};
use std::io;
use std::path::Path;
use tracing::debug;

use super::Modes;
use crate::errors::FsOpError;
use crate::platform::{apply_dir_mode, has_dir_marker, open_touch};

/// Create `path`.
///
/// - Trailing separator: create the directory and any missing ancestors with the
///   folder mode. An existing directory is fine.
/// - Otherwise: create missing ancestors, then create an empty file with the file
///   mode. An existing entry of any type keeps its content; only its timestamps move
///   to now, which needs ownership rather than write access.
pub fn create(path: &Path, modes: &Modes) -> Result<(), FsOpError> {
    if has_dir_marker(path) {
        debug!(path = %path.display(), "create directory");
        return apply_dir_mode(path, modes.folder).map_err(|e| FsOpError::from_io("mkdir", path, e));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        apply_dir_mode(parent, modes.folder).map_err(|e| FsOpError::from_io("mkdir", parent, e))?;
    }

    // utime first: an existing entry is only touched, never opened.
    let now = FileTime::now();
    match set_file_times(path, now, now) {
        Ok(()) => {
            debug!(path = %path.display(), "touched existing entry");
            return Ok(());
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(FsOpError::from_io("touch", path, e)),
    }

    debug!(path = %path.display(), "create file");
    open_touch(path, modes.file)
        .map(drop)
        .map_err(|e| FsOpError::from_io("touch", path, e))
}
