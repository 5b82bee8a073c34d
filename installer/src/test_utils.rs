//! Shared test utilities for the installer crate.

use crate::download::{ArtifactDownloader, DownloadError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

/// An in-memory repository implementing [`ArtifactDownloader`].
///
/// Registered URLs are served from memory; any other URL fails with
/// [`DownloadError::NotFound`]. Every request is recorded in order.
#[derive(Debug, Default)]
pub struct StubRepository {
    files: HashMap<String, Vec<u8>>,
    requests: RefCell<Vec<String>>,
}

impl StubRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `body` as the response for `url`.
    #[must_use]
    pub fn with_file(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.files.insert(url.into(), body.into());
        self
    }

    /// URLs requested so far, in request order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl ArtifactDownloader for StubRepository {
    fn download(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        self.requests.borrow_mut().push(url.to_owned());
        let body = self.files.get(url).ok_or_else(|| DownloadError::NotFound {
            url: url.to_owned(),
        })?;
        std::fs::write(dest, body)?;
        Ok(())
    }
}

/// Builds a directory-level `maven-metadata.xml` document.
///
/// `latest` is omitted from the document when `None`.
#[must_use]
pub fn release_metadata_xml(latest: Option<&str>, versions: &[&str]) -> String {
    let latest = latest
        .map(|v| format!("    <latest>{v}</latest>\n"))
        .unwrap_or_default();
    let versions: String = versions
        .iter()
        .map(|v| format!("      <version>{v}</version>\n"))
        .collect();
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<metadata>\n",
            "  <groupId>org.jboss.pnc.bacon</groupId>\n",
            "  <artifactId>cli</artifactId>\n",
            "  <versioning>\n",
            "{latest}",
            "    <versions>\n",
            "{versions}",
            "    </versions>\n",
            "    <lastUpdated>20240101120000</lastUpdated>\n",
            "  </versioning>\n",
            "</metadata>\n"
        ),
        latest = latest,
        versions = versions
    )
}

/// Builds a version-level snapshot `maven-metadata.xml` document listing
/// one `snapshotVersion` per value, in order.
#[must_use]
pub fn snapshot_build_metadata_xml(values: &[&str]) -> String {
    let entries: String = values
        .iter()
        .map(|v| {
            format!(
                concat!(
                    "      <snapshotVersion>\n",
                    "        <extension>jar</extension>\n",
                    "        <value>{}</value>\n",
                    "        <updated>20240101120000</updated>\n",
                    "      </snapshotVersion>\n"
                ),
                v
            )
        })
        .collect();
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<metadata modelVersion=\"1.1.0\">\n",
            "  <groupId>org.jboss.pnc.bacon</groupId>\n",
            "  <artifactId>cli</artifactId>\n",
            "  <versioning>\n",
            "    <snapshot>\n",
            "      <timestamp>20240101.120000</timestamp>\n",
            "      <buildNumber>3</buildNumber>\n",
            "    </snapshot>\n",
            "    <snapshotVersions>\n",
            "{}",
            "    </snapshotVersions>\n",
            "  </versioning>\n",
            "</metadata>\n"
        ),
        entries
    )
}
