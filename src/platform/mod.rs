//! Platform-specific helpers.
//! Hides OS differences behind a uniform API so the rest of the codebase stays
//! platform-agnostic: owner/group name resolution, directory-marker detection and
//! creation modes.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{SystemIds, apply_dir_mode, open_touch, raw_ids, symlink_dir_remove};

#[cfg(not(unix))]
pub use windows::{apply_dir_mode, open_touch, raw_ids, symlink_dir_remove};

use std::path::Path;
use std::sync::Arc;

/// Resolves numeric owner/group ids to display names.
///
/// Implementations never fail: unknown ids degrade to their decimal string.
pub trait IdentityResolver: Send + Sync {
    fn user_name(&self, uid: u32) -> String;
    fn group_name(&self, gid: u32) -> String;
}

/// Formats ids as decimal strings. Used where no identity database exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericIds;

impl IdentityResolver for NumericIds {
    fn user_name(&self, uid: u32) -> String {
        uid.to_string()
    }

    fn group_name(&self, gid: u32) -> String {
        gid.to_string()
    }
}

/// Resolver for the current build target: the user/group database on Unix,
/// numeric formatting elsewhere.
pub fn default_resolver() -> Arc<dyn IdentityResolver> {
    #[cfg(unix)]
    {
        Arc::new(SystemIds)
    }
    #[cfg(not(unix))]
    {
        Arc::new(NumericIds)
    }
}

/// True if the raw path ends with a separator (the "create a directory" marker).
pub fn has_dir_marker(path: &Path) -> bool {
    path.as_os_str()
        .as_encoded_bytes()
        .last()
        .is_some_and(|b| std::path::is_separator(*b as char))
}
