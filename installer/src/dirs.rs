//! Host environment abstraction for install path resolution.
//!
//! The installer needs two facts from the host: the user's home directory and
//! whether the process runs with elevated privileges. Both sit behind the
//! [`BaseDirs`] trait so path resolution can be tested without touching the
//! real environment.

use std::path::PathBuf;

/// Access to the host facts that decide where files are installed.
#[cfg_attr(test, mockall::automock)]
pub trait BaseDirs {
    /// The current user's home directory, if it can be determined.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Whether the process runs with elevated privileges (effective UID 0).
    fn is_elevated(&self) -> bool;
}

/// Production [`BaseDirs`] backed by `directories-next` and the process
/// credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn home_dir(&self) -> Option<PathBuf> {
        directories_next::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }

    #[cfg(unix)]
    fn is_elevated(&self) -> bool {
        // SAFETY: geteuid has no preconditions and cannot fail.
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    fn is_elevated(&self) -> bool {
        false
    }
}
