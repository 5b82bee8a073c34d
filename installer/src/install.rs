//! Install pipeline: resolve, download, generate.
//!
//! All metadata lookups finish before anything touches the install
//! directories, so a resolution failure leaves the filesystem untouched.

use crate::artifact::{artifact_url, download_artifact};
use crate::config::InstallTarget;
use crate::download::ArtifactDownloader;
use crate::error::Result;
use crate::launcher::{LauncherResult, generate_launchers};
use crate::output::{installed_version_message, jar_location_message, write_stderr_line};
use crate::resolver::VersionResolver;
use camino::Utf8PathBuf;
use std::io::Write;

/// What a successful run installed.
#[derive(Debug)]
pub struct InstallOutcome {
    /// The resolved version (for snapshots, the `-SNAPSHOT` version).
    pub version: String,
    /// Version fragment of the downloaded file name.
    pub file_version: String,
    /// Path of the installed jar.
    pub jar_path: Utf8PathBuf,
    /// The generated launchers.
    pub launchers: LauncherResult,
}

/// Run one installation against `target`.
///
/// # Errors
///
/// Returns the first failure from version resolution, directory creation,
/// artifact download or launcher generation. Nothing is retried.
///
/// # Examples
///
/// ```no_run
/// use bacon_installer::config::{InstallMode, InstallTarget, RepositoryUrls};
/// use bacon_installer::dirs::SystemBaseDirs;
/// use bacon_installer::download::HttpDownloader;
/// use bacon_installer::install::install;
///
/// let target = InstallTarget::resolve(&SystemBaseDirs, InstallMode::Release, &RepositoryUrls::default())?;
/// let outcome = install(&target, &HttpDownloader, &mut std::io::stderr())?;
/// assert!(outcome.jar_path.ends_with("bacon.jar"));
/// # Ok::<(), bacon_installer::error::InstallerError>(())
/// ```
pub fn install(
    target: &InstallTarget,
    downloader: &dyn ArtifactDownloader,
    stderr: &mut dyn Write,
) -> Result<InstallOutcome> {
    write_stderr_line(
        stderr,
        format!(
            "Resolving latest {} version from {}",
            target.mode(),
            target.repository_url()
        ),
    );
    let mut resolver = VersionResolver::new(downloader, target);
    let version = resolver.latest_version()?;
    let file_version = resolver.artifact_file_version()?;

    target.create_directories()?;

    write_stderr_line(
        stderr,
        format!(
            "Downloading: {}",
            artifact_url(target.repository_url(), &version, &file_version)
        ),
    );
    let jar_path = download_artifact(downloader, target, &version, &file_version)?;
    write_stderr_line(stderr, jar_location_message(&jar_path));

    let launchers = generate_launchers(target)?;

    write_stderr_line(stderr, "");
    write_stderr_line(stderr, installed_version_message(&version));

    Ok(InstallOutcome {
        version,
        file_version,
        jar_path,
        launchers,
    })
}
