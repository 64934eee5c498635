//! Typed error definitions for batchfs.
//! Every single-path failure carries the path(s) involved plus the OS error it came from,
//! and can be classified into a small, platform-independent `ErrorKind`.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::executor::OperationKind;

/// Platform-independent classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AccessDenied,
    AlreadyExists,
    /// The OS refused a move across devices or does not support it.
    CrossDeviceOrUnsupported,
    /// One or more items of a batch failed.
    PartialBatchFailure,
    Other,
}

impl ErrorKind {
    /// Short actionable hint for user-facing messages.
    pub fn hint(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "path not found; verify it exists.",
            ErrorKind::AccessDenied => "permission denied; check ownership and write permissions.",
            ErrorKind::AlreadyExists => "already exists; remove the target or pick another name.",
            ErrorKind::CrossDeviceOrUnsupported => {
                "cross-filesystem or unsupported move; copy then remove instead."
            }
            ErrorKind::PartialBatchFailure => "some operations in the batch failed.",
            ErrorKind::Other => "",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::AccessDenied => "access_denied",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::CrossDeviceOrUnsupported => "cross_device",
            ErrorKind::PartialBatchFailure => "partial_batch_failure",
            ErrorKind::Other => "other",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum FsOpError {
    #[error("{op} '{path}': not found")]
    NotFound {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{op} '{path}': permission denied")]
    AccessDenied {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{op} '{path}': already exists")]
    AlreadyExists {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{op} '{src}' -> '{dest}': cross-device or unsupported move")]
    CrossDevice {
        op: &'static str,
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create parent '{parent}' of '{dest}'")]
    ParentCreation {
        parent: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{op} '{path}': {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("walk '{root}': {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl FsOpError {
    /// Classify an OS error raised while operating on a single path.
    pub fn from_io(op: &'static str, path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match classify(&source) {
            ErrorKind::NotFound => FsOpError::NotFound { op, path, source },
            ErrorKind::AccessDenied => FsOpError::AccessDenied { op, path, source },
            ErrorKind::AlreadyExists => FsOpError::AlreadyExists { op, path, source },
            _ => FsOpError::Io { op, path, source },
        }
    }

    /// Classify an OS error raised by a move; cross-device failures keep both ends.
    pub fn from_move_io(op: &'static str, src: &Path, dest: &Path, source: io::Error) -> Self {
        if classify(&source) == ErrorKind::CrossDeviceOrUnsupported {
            FsOpError::CrossDevice {
                op,
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                source,
            }
        } else {
            FsOpError::from_io(op, src, source)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FsOpError::NotFound { .. } => ErrorKind::NotFound,
            FsOpError::AccessDenied { .. } => ErrorKind::AccessDenied,
            FsOpError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            FsOpError::CrossDevice { .. } => ErrorKind::CrossDeviceOrUnsupported,
            FsOpError::ParentCreation { source, .. } | FsOpError::Io { source, .. } => {
                classify(source)
            }
            FsOpError::Walk { source, .. } => source
                .io_error()
                .map(classify)
                .unwrap_or(ErrorKind::Other),
        }
    }

    /// The path the failure is attributed to (the source for two-path operations).
    pub fn path(&self) -> &Path {
        match self {
            FsOpError::NotFound { path, .. }
            | FsOpError::AccessDenied { path, .. }
            | FsOpError::AlreadyExists { path, .. }
            | FsOpError::Io { path, .. } => path,
            FsOpError::CrossDevice { src, .. } => src,
            FsOpError::ParentCreation { dest, .. } => dest,
            FsOpError::Walk { root, .. } => root,
        }
    }
}

/// Map an io::Error to an `ErrorKind`, preferring raw OS codes where they are more precise.
pub(crate) fn classify(e: &io::Error) -> ErrorKind {
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EXDEV => return ErrorKind::CrossDeviceOrUnsupported,
                libc::EACCES | libc::EPERM | libc::EROFS => return ErrorKind::AccessDenied,
                libc::ENOENT => return ErrorKind::NotFound,
                libc::EEXIST | libc::ENOTEMPTY => return ErrorKind::AlreadyExists,
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                17 => return ErrorKind::CrossDeviceOrUnsupported, // ERROR_NOT_SAME_DEVICE
                5 => return ErrorKind::AccessDenied,               // ERROR_ACCESS_DENIED
                2 | 3 => return ErrorKind::NotFound,               // FILE / PATH NOT FOUND
                80 | 183 => return ErrorKind::AlreadyExists,       // FILE_EXISTS / ALREADY_EXISTS
                _ => {}
            }
        }
    }
    match e.kind() {
        io::ErrorKind::NotFound => ErrorKind::NotFound,
        io::ErrorKind::PermissionDenied => ErrorKind::AccessDenied,
        io::ErrorKind::AlreadyExists => ErrorKind::AlreadyExists,
        io::ErrorKind::Unsupported => ErrorKind::CrossDeviceOrUnsupported,
        _ => ErrorKind::Other,
    }
}

/// Aggregate failure of a batch: every other item still ran to completion.
#[derive(Debug, Error)]
#[error("{operation}: {} of {attempted} operations failed", failures.len())]
pub struct BatchFailure {
    pub operation: OperationKind,
    pub attempted: usize,
    pub failures: Vec<FsOpError>,
}

impl BatchFailure {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::PartialBatchFailure
    }

    pub fn succeeded(&self) -> usize {
        self.attempted - self.failures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_io_kind() {
        let e = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(classify(&e), ErrorKind::NotFound);
        let e = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(classify(&e), ErrorKind::AccessDenied);
        let e = io::Error::other("boom");
        assert_eq!(classify(&e), ErrorKind::Other);
    }

    #[cfg(unix)]
    #[test]
    fn exdev_is_cross_device() {
        let e = io::Error::from_raw_os_error(libc::EXDEV);
        let err = FsOpError::from_move_io("rename", Path::new("/a"), Path::new("/b"), e);
        assert_eq!(err.kind(), ErrorKind::CrossDeviceOrUnsupported);
        assert_eq!(err.path(), Path::new("/a"));
    }

    #[test]
    fn from_io_keeps_path() {
        let e = io::Error::from(io::ErrorKind::AlreadyExists);
        let err = FsOpError::from_io("copy", Path::new("/x/y"), e);
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(err.path(), Path::new("/x/y"));
        assert!(err.to_string().contains("/x/y"));
    }

    #[test]
    fn parent_creation_classified_by_source() {
        let err = FsOpError::ParentCreation {
            parent: PathBuf::from("/p"),
            dest: PathBuf::from("/p/d"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        assert_eq!(err.path(), Path::new("/p/d"));
    }
}
