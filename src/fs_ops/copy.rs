//! Copy files and directory trees, preserving timestamps and permissions.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::metadata::{preserve_metadata, preserve_xattrs};
use crate::errors::FsOpError;

/// Copy `src` to `dest`.
///
/// - Directory: the whole subtree is recreated at `dest`, which must not exist yet.
///   Links inside the tree are followed and their targets copied.
/// - Anything else: contents are copied (following a symlink) and metadata preserved.
///   If `dest` is an existing directory the file lands inside it under its own name.
pub fn copy(src: &Path, dest: &Path) -> Result<(), FsOpError> {
    let meta = fs::symlink_metadata(src).map_err(|e| FsOpError::from_io("copy", src, e))?;
    debug!(src = %src.display(), dest = %dest.display(), is_dir = meta.is_dir(), "dispatch copy");
    if meta.is_dir() {
        copy_tree(src, dest)
    } else {
        copy_file(src, dest).map(|_| ())
    }
}

/// Copy one file with metadata; returns the final destination path.
fn copy_file(src: &Path, dest: &Path) -> Result<PathBuf, FsOpError> {
    let target = if dest.is_dir() {
        let name = src.file_name().ok_or_else(|| FsOpError::Io {
            op: "copy",
            path: src.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"),
        })?;
        dest.join(name)
    } else {
        dest.to_path_buf()
    };

    // Read-side failures name the source; anything after names the destination.
    let src_meta = fs::metadata(src).map_err(|e| FsOpError::from_io("stat", src, e))?;
    drop(File::open(src).map_err(|e| FsOpError::from_io("copy", src, e))?);
    fs::copy(src, &target).map_err(|e| FsOpError::from_io("copy", &target, e))?;
    preserve_metadata(&target, &src_meta);
    preserve_xattrs(src, &target);
    Ok(target)
}

/// Absolute form of `p` used to compare tree roots: `.` and `..` are folded
/// lexically, then the longest existing prefix has its symlinks resolved.
fn resolved(p: &Path) -> PathBuf {
    let abs = std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf());
    let mut lexical = PathBuf::new();
    for c in abs.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other),
        }
    }

    let mut existing = lexical.as_path();
    let mut rest: Vec<OsString> = Vec::new();
    loop {
        if let Ok(mut real) = dunce::canonicalize(existing) {
            real.extend(rest.iter().rev());
            return real;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return lexical,
        }
    }
}

fn copy_tree(src: &Path, dest: &Path) -> Result<(), FsOpError> {
    if resolved(dest).starts_with(resolved(src)) {
        return Err(FsOpError::Io {
            op: "copy",
            path: dest.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "destination is inside the source directory",
            ),
        });
    }

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FsOpError::from_io("mkdir", parent, e))?;
    }
    fs::create_dir(dest).map_err(|e| FsOpError::from_io("copy", dest, e))?;

    // Directory metadata is applied once their contents are written.
    let mut dirs = vec![(src.to_path_buf(), dest.to_path_buf())];

    for entry in WalkDir::new(src).min_depth(1).follow_links(true) {
        let entry = entry.map_err(|source| FsOpError::Walk {
            root: src.to_path_buf(),
            source,
        })?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dest.join(rel);
        let ft = entry.file_type();

        if ft.is_dir() {
            fs::create_dir(&target).map_err(|e| FsOpError::from_io("mkdir", &target, e))?;
            dirs.push((entry.path().to_path_buf(), target));
        } else if ft.is_file() {
            copy_file(entry.path(), &target)?;
        } else {
            warn!(path = %entry.path().display(), "skipping special file during tree copy");
        }
    }

    for (from, to) in dirs.iter().rev() {
        match fs::metadata(from) {
            Ok(meta) => preserve_metadata(to, &meta),
            Err(e) => warn!(path = %from.display(), error = %e, "failed to stat source directory"),
        }
        preserve_xattrs(from, to);
    }
    Ok(())
}
