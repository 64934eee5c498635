//! Metadata prober.
//! Stats a single path without following a terminal symlink and produces a
//! platform-independent `FsStat` snapshot.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::{self, FileType, Metadata};
use std::path::{Path, PathBuf};

use crate::errors::FsOpError;
use crate::platform::{IdentityResolver, raw_ids};

/// Classification of an entry, determined without following a terminal link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    File,
    Directory,
    Symlink,
    Other,
}

impl EntryType {
    pub fn of(ft: &FileType) -> Self {
        if ft.is_symlink() {
            EntryType::Symlink
        } else if ft.is_dir() {
            EntryType::Directory
        } else if ft.is_file() {
            EntryType::File
        } else {
            EntryType::Other
        }
    }
}

/// Snapshot of one path at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FsStat {
    pub entry_type: EntryType,
    /// `ls -l` style mode string, e.g. `drwxr-xr-x`.
    pub permissions: String,
    pub user: String,
    pub group: String,
    pub date_mod: DateTime<Local>,
    pub size: u64,
    /// Present iff the path is a symbolic link.
    pub link: Option<PathBuf>,
}

/// Stat `path` (not following a terminal symlink) and resolve owner/group names.
pub fn stat(path: &Path, ids: &dyn IdentityResolver) -> Result<FsStat, FsOpError> {
    let meta = fs::symlink_metadata(path).map_err(|e| FsOpError::from_io("stat", path, e))?;
    let entry_type = EntryType::of(&meta.file_type());
    let (uid, gid) = raw_ids(&meta);

    let link = if entry_type == EntryType::Symlink {
        Some(fs::read_link(path).map_err(|e| FsOpError::from_io("readlink", path, e))?)
    } else {
        None
    };

    let date_mod = meta
        .modified()
        .map(DateTime::<Local>::from)
        .map_err(|e| FsOpError::from_io("stat", path, e))?;

    Ok(FsStat {
        entry_type,
        permissions: filemode(&meta),
        user: ids.user_name(uid),
        group: ids.group_name(gid),
        date_mod,
        size: meta.len(),
        link,
    })
}

/// Render mode bits the way `ls -l` does.
#[cfg(unix)]
pub fn filemode(meta: &Metadata) -> String {
    use std::os::unix::fs::MetadataExt;
    mode_string(meta.mode())
}

/// Synthesised from the readonly attribute; Windows has no rwx bits.
#[cfg(not(unix))]
pub fn filemode(meta: &Metadata) -> String {
    let ft = meta.file_type();
    let kind = match EntryType::of(&ft) {
        EntryType::Directory => 'd',
        EntryType::Symlink => 'l',
        EntryType::File => '-',
        EntryType::Other => '?',
    };
    let w = if meta.permissions().readonly() { '-' } else { 'w' };
    let x = if ft.is_dir() { 'x' } else { '-' };
    let triplet: String = ['r', w, x].iter().collect();
    format!("{kind}{triplet}{triplet}{triplet}")
}

#[cfg(unix)]
fn mode_string(mode: u32) -> String {
    let kind = match mode & libc::S_IFMT as u32 {
        m if m == libc::S_IFDIR as u32 => 'd',
        m if m == libc::S_IFLNK as u32 => 'l',
        m if m == libc::S_IFCHR as u32 => 'c',
        m if m == libc::S_IFBLK as u32 => 'b',
        m if m == libc::S_IFIFO as u32 => 'p',
        m if m == libc::S_IFSOCK as u32 => 's',
        m if m == libc::S_IFREG as u32 => '-',
        _ => '?',
    };

    let bit = |mask: u32, c: char| if mode & mask != 0 { c } else { '-' };
    // exec slot doubles for setuid/setgid/sticky: lowercase when also executable.
    let special = |exec: u32, flag: u32, set: char| match (mode & exec != 0, mode & flag != 0) {
        (true, true) => set,
        (false, true) => set.to_ascii_uppercase(),
        (true, false) => 'x',
        (false, false) => '-',
    };

    let mut s = String::with_capacity(10);
    s.push(kind);
    s.push(bit(0o400, 'r'));
    s.push(bit(0o200, 'w'));
    s.push(special(0o100, 0o4000, 's'));
    s.push(bit(0o040, 'r'));
    s.push(bit(0o020, 'w'));
    s.push(special(0o010, 0o2000, 's'));
    s.push(bit(0o004, 'r'));
    s.push(bit(0o002, 'w'));
    s.push(special(0o001, 0o1000, 't'));
    s
}
