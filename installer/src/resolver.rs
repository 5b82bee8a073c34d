//! Latest-version resolution against Maven repository metadata.
//!
//! Release and snapshot modes read different elements on purpose:
//!
//! - release mode trusts the publisher-declared `versioning/latest`;
//! - snapshot mode takes the first `versioning/versions/version` entry in
//!   document order, then reads the timestamped build value from the
//!   version's own metadata document.

use crate::config::{InstallMode, InstallTarget};
use crate::download::{ArtifactDownloader, join_url};
use crate::error::{InstallerError, Result};
use crate::metadata::fetch_metadata;
use log::{debug, info};

/// Resolve the latest version published under `repository_url`.
///
/// # Errors
///
/// Returns [`InstallerError::MetadataFetch`] or
/// [`InstallerError::MetadataParse`] when the metadata cannot be fetched or
/// lacks the element the mode reads.
pub fn resolve_latest_version(
    downloader: &dyn ArtifactDownloader,
    repository_url: &str,
    want_snapshot: bool,
) -> Result<String> {
    let (url, metadata) = fetch_metadata(downloader, repository_url)?;
    let version = if want_snapshot {
        metadata.first_listed_version()
    } else {
        metadata.latest_release()
    }
    .map_err(|missing| InstallerError::MetadataParse {
        url,
        reason: missing.to_string(),
    })?;
    Ok(version.to_owned())
}

/// Resolve the timestamp-qualified build of a snapshot version, such as
/// `2.4.0-20240101.120000-3` for `2.4.0-SNAPSHOT`.
///
/// # Errors
///
/// Returns [`InstallerError::MetadataFetch`] or
/// [`InstallerError::MetadataParse`] when the version's metadata cannot be
/// fetched or lists no snapshot build.
pub fn resolve_snapshot_build_version(
    downloader: &dyn ArtifactDownloader,
    repository_url: &str,
    snapshot_version: &str,
) -> Result<String> {
    let version_url = join_url(repository_url, snapshot_version);
    let (url, metadata) = fetch_metadata(downloader, &version_url)?;
    let value = metadata
        .first_snapshot_value()
        .map_err(|missing| InstallerError::MetadataParse {
            url,
            reason: missing.to_string(),
        })?;
    Ok(value.to_owned())
}

/// Memoising resolver for a single install run.
///
/// Each metadata document is fetched at most once; later calls return the
/// cached value.
pub struct VersionResolver<'a> {
    downloader: &'a dyn ArtifactDownloader,
    repository_url: &'a str,
    mode: InstallMode,
    latest: Option<String>,
    snapshot_build: Option<String>,
}

impl<'a> VersionResolver<'a> {
    /// Create a resolver for the repository and mode of `target`.
    #[must_use]
    pub fn new(downloader: &'a dyn ArtifactDownloader, target: &'a InstallTarget) -> Self {
        Self {
            downloader,
            repository_url: target.repository_url(),
            mode: target.mode(),
            latest: None,
            snapshot_build: None,
        }
    }

    /// The latest version for the configured mode.
    ///
    /// # Errors
    ///
    /// See [`resolve_latest_version`].
    pub fn latest_version(&mut self) -> Result<String> {
        if let Some(version) = &self.latest {
            debug!("using cached latest version {version}");
            return Ok(version.clone());
        }
        let version = resolve_latest_version(
            self.downloader,
            self.repository_url,
            self.mode == InstallMode::Snapshot,
        )?;
        info!("latest {} version is {version}", self.mode);
        self.latest = Some(version.clone());
        Ok(version)
    }

    /// The timestamp-qualified build of the latest snapshot version.
    ///
    /// # Errors
    ///
    /// See [`resolve_snapshot_build_version`].
    pub fn snapshot_build_version(&mut self) -> Result<String> {
        if let Some(build) = &self.snapshot_build {
            debug!("using cached snapshot build {build}");
            return Ok(build.clone());
        }
        let version = self.latest_version()?;
        let build = resolve_snapshot_build_version(self.downloader, self.repository_url, &version)?;
        info!("snapshot {version} resolves to build {build}");
        self.snapshot_build = Some(build.clone());
        Ok(build)
    }

    /// The version fragment used in the artifact file name: the snapshot
    /// build in snapshot mode, the plain version otherwise.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures.
    pub fn artifact_file_version(&mut self) -> Result<String> {
        match self.mode {
            InstallMode::Release => self.latest_version(),
            InstallMode::Snapshot => self.snapshot_build_version(),
        }
    }
}
