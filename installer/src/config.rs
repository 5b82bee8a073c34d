//! Install configuration: where the jar and launchers go and which
//! repository they come from.
//!
//! An [`InstallTarget`] is built once at startup and passed by reference to
//! every later stage; nothing mutates it afterwards.

use crate::dirs::BaseDirs;
use crate::error::{InstallerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fmt;

/// Maven Central directory holding released `cli` artifacts.
pub const RELEASE_REPOSITORY_URL: &str = "https://repo.maven.org/maven2/org/jboss/pnc/bacon/cli/";

/// JBoss Nexus directory holding snapshot `cli` artifacts.
pub const SNAPSHOT_REPOSITORY_URL: &str =
    "https://repository.jboss.org/nexus/content/repositories/snapshots/org/jboss/pnc/bacon/cli/";

/// Environment variable overriding [`RELEASE_REPOSITORY_URL`].
pub const RELEASE_URL_ENV: &str = "BACON_INSTALL_RELEASE_URL";

/// Environment variable overriding [`SNAPSHOT_REPOSITORY_URL`].
pub const SNAPSHOT_URL_ENV: &str = "BACON_INSTALL_SNAPSHOT_URL";

/// Jar directory used when running with elevated privileges.
pub const SYSTEM_JAR_DIR: &str = "/opt/bacon/bin";

/// Launcher directory used when running with elevated privileges.
pub const SYSTEM_SHELL_DIR: &str = "/usr/local/bin";

/// Jar directory relative to the home directory.
const USER_JAR_SUBDIR: &str = ".pnc-bacon/bin";

/// Launcher directory relative to the home directory.
const USER_SHELL_SUBDIR: &str = "bin";

/// File name of the downloaded jar inside the jar directory.
pub const JAR_FILENAME: &str = "bacon.jar";

/// Which published version to install.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InstallMode {
    /// The latest released version.
    #[default]
    Release,
    /// The latest snapshot build.
    Snapshot,
}

impl InstallMode {
    /// Map the optional positional argument to a mode.
    ///
    /// Only the literal `snapshot` selects [`InstallMode::Snapshot`]; any
    /// other value, or none, selects [`InstallMode::Release`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bacon_installer::config::InstallMode;
    ///
    /// assert_eq!(InstallMode::from_argument(Some("snapshot")), InstallMode::Snapshot);
    /// assert_eq!(InstallMode::from_argument(Some("Snapshot")), InstallMode::Release);
    /// assert_eq!(InstallMode::from_argument(None), InstallMode::Release);
    /// ```
    #[must_use]
    pub fn from_argument(argument: Option<&str>) -> Self {
        match argument {
            Some("snapshot") => Self::Snapshot,
            _ => Self::Release,
        }
    }
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release => f.write_str("release"),
            Self::Snapshot => f.write_str("snapshot"),
        }
    }
}

/// Repository base URLs for both install modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryUrls {
    /// Directory URL for released artifacts.
    pub release: String,
    /// Directory URL for snapshot artifacts.
    pub snapshot: String,
}

impl Default for RepositoryUrls {
    fn default() -> Self {
        Self {
            release: RELEASE_REPOSITORY_URL.to_owned(),
            snapshot: SNAPSHOT_REPOSITORY_URL.to_owned(),
        }
    }
}

impl RepositoryUrls {
    /// Default URLs with non-empty [`RELEASE_URL_ENV`] and
    /// [`SNAPSHOT_URL_ENV`] values applied on top.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            release: env_override(RELEASE_URL_ENV).unwrap_or(defaults.release),
            snapshot: env_override(SNAPSHOT_URL_ENV).unwrap_or(defaults.snapshot),
        }
    }

    /// The URL serving the given mode.
    #[must_use]
    pub fn for_mode(&self, mode: InstallMode) -> &str {
        match mode {
            InstallMode::Release => &self.release,
            InstallMode::Snapshot => &self.snapshot,
        }
    }
}

fn env_override(name: &str) -> Option<String> {
    let value = std::env::var(name).ok().filter(|v| !v.trim().is_empty())?;
    debug!("{name} overrides repository URL with {value}");
    Some(value)
}

/// Resolved install locations and source repository for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    jar_dir: Utf8PathBuf,
    shell_dir: Utf8PathBuf,
    repository_url: String,
    mode: InstallMode,
}

impl InstallTarget {
    /// Build a target from explicit parts.
    #[must_use]
    pub fn new(
        jar_dir: Utf8PathBuf,
        shell_dir: Utf8PathBuf,
        repository_url: impl Into<String>,
        mode: InstallMode,
    ) -> Self {
        Self {
            jar_dir,
            shell_dir,
            repository_url: repository_url.into(),
            mode,
        }
    }

    /// Resolve install paths from the privilege level and home directory.
    ///
    /// Elevated processes install system-wide into [`SYSTEM_JAR_DIR`] and
    /// [`SYSTEM_SHELL_DIR`]; the home directory is not consulted. Otherwise
    /// the jar goes to `~/.pnc-bacon/bin` and the launchers to `~/bin`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::Configuration`] when the process is not
    /// elevated and the home directory is unknown or not valid UTF-8.
    pub fn resolve(dirs: &dyn BaseDirs, mode: InstallMode, urls: &RepositoryUrls) -> Result<Self> {
        let repository_url = urls.for_mode(mode).to_owned();

        if dirs.is_elevated() {
            debug!("elevated privileges detected; using system-wide paths");
            return Ok(Self::new(
                Utf8PathBuf::from(SYSTEM_JAR_DIR),
                Utf8PathBuf::from(SYSTEM_SHELL_DIR),
                repository_url,
                mode,
            ));
        }

        let home = dirs
            .home_dir()
            .ok_or_else(|| InstallerError::Configuration {
                reason: "could not determine home directory".to_owned(),
            })?;
        let home =
            Utf8PathBuf::from_path_buf(home).map_err(|path| InstallerError::Configuration {
                reason: format!("home directory is not valid UTF-8: {}", path.display()),
            })?;

        Ok(Self::new(
            home.join(USER_JAR_SUBDIR),
            home.join(USER_SHELL_SUBDIR),
            repository_url,
            mode,
        ))
    }

    /// Directory receiving the downloaded jar.
    #[must_use]
    pub fn jar_dir(&self) -> &Utf8Path {
        &self.jar_dir
    }

    /// Directory receiving the launcher scripts.
    #[must_use]
    pub fn shell_dir(&self) -> &Utf8Path {
        &self.shell_dir
    }

    /// Repository directory URL for the selected mode.
    #[must_use]
    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    /// The selected install mode.
    #[must_use]
    pub fn mode(&self) -> InstallMode {
        self.mode
    }

    /// Full path of the installed jar.
    #[must_use]
    pub fn jar_path(&self) -> Utf8PathBuf {
        self.jar_dir.join(JAR_FILENAME)
    }

    /// Create the jar and launcher directories if they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::Filesystem`] if either directory cannot be
    /// created.
    pub fn create_directories(&self) -> Result<()> {
        create_dir_if_absent(&self.jar_dir)?;
        create_dir_if_absent(&self.shell_dir)
    }
}

/// Create `dir` and its parents; an existing directory is not an error.
pub(crate) fn create_dir_if_absent(dir: &Utf8Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    debug!("creating directory {dir}");
    std::fs::create_dir_all(dir).map_err(|e| InstallerError::filesystem(dir, e))
}
