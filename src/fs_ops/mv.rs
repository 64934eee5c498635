//! Rename and cut.
//!
//! Both delegate the move to a single OS rename. They differ only in parent handling:
//! - `rename` provisions missing ancestors of the destination first.
//! - `cut` assumes they exist and fails otherwise, skipping the directory check.
//!
//! Callers pick `cut` deliberately for known-deep destinations; keep the two distinct.

use std::fs;
use std::path::Path;
use tracing::debug;

use super::Modes;
use crate::errors::FsOpError;
use crate::platform::apply_dir_mode;

/// Create missing ancestors of `dest` (folder mode), then move `src` to `dest`.
pub fn rename(src: &Path, dest: &Path, modes: &Modes) -> Result<(), FsOpError> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        apply_dir_mode(parent, modes.folder).map_err(|source| FsOpError::ParentCreation {
            parent: parent.to_path_buf(),
            dest: dest.to_path_buf(),
            source,
        })?;
    }
    debug!(src = %src.display(), dest = %dest.display(), "rename");
    fs::rename(src, dest).map_err(|e| FsOpError::from_move_io("rename", src, dest, e))
}

/// Move `src` to `dest`; the destination's parent must already exist.
pub fn cut(src: &Path, dest: &Path) -> Result<(), FsOpError> {
    debug!(src = %src.display(), dest = %dest.display(), "cut");
    fs::rename(src, dest).map_err(|e| FsOpError::from_move_io("cut", src, dest, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn rename_provisions_destination_parents() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        fs::write(&src, b"a").unwrap();
        let dest = td.path().join("deep").join("er").join("b.txt");

        rename(&src, &dest, &Modes::default()).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"a");
    }

    #[test]
    fn cut_requires_existing_parent() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        fs::write(&src, b"a").unwrap();
        let dest = td.path().join("missing").join("b.txt");

        let err = cut(&src, &dest).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(src.exists(), "source must survive a failed cut");
    }

    #[test]
    fn cut_moves_directory() {
        let td = tempdir().unwrap();
        let src = td.path().join("dir");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("inner"), b"x").unwrap();
        let dest = td.path().join("moved");

        cut(&src, &dest).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(dest.join("inner")).unwrap(), b"x");
    }

    #[test]
    fn rename_missing_source_is_not_found() {
        let td = tempdir().unwrap();
        let err = rename(
            &td.path().join("nope"),
            &td.path().join("dest"),
            &Modes::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn rename_parent_blocked_by_file() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        fs::write(&src, b"a").unwrap();
        let blocker = td.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let err = rename(&src, &blocker.join("b.txt"), &Modes::default()).unwrap_err();
        assert!(matches!(err, FsOpError::ParentCreation { .. }));
    }
}
