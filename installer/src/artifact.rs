//! Artifact URL construction and jar installation.

use crate::config::{InstallTarget, create_dir_if_absent};
use crate::download::{ArtifactDownloader, join_url};
use crate::error::{InstallerError, Result};
use camino::Utf8PathBuf;
use log::info;

/// Build the URL of the shaded CLI jar.
///
/// `version` names the repository directory; `file_version` is the version
/// fragment of the file name, which differs from `version` only for
/// snapshot builds.
///
/// # Examples
///
/// ```
/// use bacon_installer::artifact::artifact_url;
///
/// assert_eq!(
///     artifact_url("https://example.org/cli/", "2.3.1", "2.3.1"),
///     "https://example.org/cli/2.3.1/cli-2.3.1-shaded.jar",
/// );
/// assert_eq!(
///     artifact_url("https://example.org/cli/", "2.4.0-SNAPSHOT", "2.4.0-20240101.120000-3"),
///     "https://example.org/cli/2.4.0-SNAPSHOT/cli-2.4.0-20240101.120000-3-shaded.jar",
/// );
/// ```
#[must_use]
pub fn artifact_url(repository_url: &str, version: &str, file_version: &str) -> String {
    join_url(
        &join_url(repository_url, version),
        &format!("cli-{file_version}-shaded.jar"),
    )
}

/// Download the jar for `version` into the target's jar directory.
///
/// The body is streamed into a temporary file beside `bacon.jar` and renamed
/// over it once complete, so a failed download leaves any previously
/// installed jar in place. The jar directory is created if absent.
///
/// Returns the path of the installed jar.
///
/// # Errors
///
/// Returns [`InstallerError::ArtifactDownload`] when the download fails and
/// [`InstallerError::Filesystem`] when the jar cannot be written.
pub fn download_artifact(
    downloader: &dyn ArtifactDownloader,
    target: &InstallTarget,
    version: &str,
    file_version: &str,
) -> Result<Utf8PathBuf> {
    let jar_dir = target.jar_dir();
    create_dir_if_absent(jar_dir)?;

    let url = artifact_url(target.repository_url(), version, file_version);
    let staged = tempfile::Builder::new()
        .prefix(".bacon.jar.")
        .tempfile_in(jar_dir)
        .map_err(|e| InstallerError::filesystem(jar_dir, e))?;

    info!("downloading {url}");
    downloader
        .download(&url, staged.path())
        .map_err(|source| InstallerError::ArtifactDownload {
            url: url.clone(),
            source,
        })?;

    let jar_path = target.jar_path();
    set_jar_permissions(staged.path()).map_err(|e| InstallerError::filesystem(&jar_path, e))?;
    staged
        .persist(&jar_path)
        .map_err(|e| InstallerError::filesystem(&jar_path, e.error))?;
    info!("installed {jar_path}");
    Ok(jar_path)
}

/// Temporary files are created owner-only; the jar must be readable by every
/// user of a system-wide install.
#[cfg(unix)]
fn set_jar_permissions(path: &std::path::Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_jar_permissions(_path: &std::path::Path) -> std::io::Result<()> {
    Ok(())
}
