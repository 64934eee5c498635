//! Unix implementations of platform helpers.

use std::ffi::CStr;
use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io;
use std::os::raw::c_char;
use std::os::unix::fs::{DirBuilderExt, MetadataExt, OpenOptionsExt};
use std::path::Path;
use tracing::trace;

use super::IdentityResolver;

// getpw*_r/getgr*_r report ERANGE until the scratch buffer is large enough.
const INITIAL_BUF: usize = 1024;
const MAX_BUF: usize = 1 << 20;

/// Resolves ids through the local user/group database (`getpwuid_r`/`getgrgid_r`).
/// Unknown ids and lookup errors fall back to the decimal id.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIds;

impl IdentityResolver for SystemIds {
    fn user_name(&self, uid: u32) -> String {
        lookup_user(uid).unwrap_or_else(|| {
            trace!(uid, "no passwd entry; using numeric uid");
            uid.to_string()
        })
    }

    fn group_name(&self, gid: u32) -> String {
        lookup_group(gid).unwrap_or_else(|| {
            trace!(gid, "no group entry; using numeric gid");
            gid.to_string()
        })
    }
}

fn lookup_user(uid: u32) -> Option<String> {
    let mut buf = vec![0 as c_char; INITIAL_BUF];
    loop {
        // SAFETY: passwd is plain old data; getpwuid_r fills it and points its
        // strings into `buf`, which outlives every read below.
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();
        let rc = unsafe {
            libc::getpwuid_r(
                uid as libc::uid_t,
                &mut pwd,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };
        if rc == libc::ERANGE && buf.len() < MAX_BUF {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
            return None;
        }
        let name = unsafe { CStr::from_ptr(pwd.pw_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

fn lookup_group(gid: u32) -> Option<String> {
    let mut buf = vec![0 as c_char; INITIAL_BUF];
    loop {
        // SAFETY: see lookup_user.
        let mut grp: libc::group = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::group = std::ptr::null_mut();
        let rc = unsafe {
            libc::getgrgid_r(
                gid as libc::gid_t,
                &mut grp,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };
        if rc == libc::ERANGE && buf.len() < MAX_BUF {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || result.is_null() || grp.gr_name.is_null() {
            return None;
        }
        let name = unsafe { CStr::from_ptr(grp.gr_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

/// Owner and group ids of an entry.
pub fn raw_ids(meta: &fs::Metadata) -> (u32, u32) {
    (meta.uid(), meta.gid())
}

/// `mkdir -p` applying `mode` (subject to umask) to every directory it creates.
pub fn apply_dir_mode(path: &Path, mode: u32) -> io::Result<()> {
    DirBuilder::new().recursive(true).mode(mode).create(path)
}

/// Open-or-create without truncation; `mode` applies only on creation.
pub fn open_touch(path: &Path, mode: u32) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(mode)
        .open(path)
}

/// Unlink a symlink that points at a directory. On Unix this is a plain unlink.
pub fn symlink_dir_remove(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}
