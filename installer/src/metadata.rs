//! Maven repository metadata (`maven-metadata.xml`) model and retrieval.
//!
//! Only the `versioning` fields the installer reads are modelled; every other
//! element of the document is ignored during deserialisation.

use crate::download::{ArtifactDownloader, METADATA_FILENAME, metadata_url};
use crate::error::{InstallerError, Result};
use log::debug;
use serde::Deserialize;

/// Parsed `maven-metadata.xml` document.
#[derive(Debug, Default, Deserialize)]
pub struct MavenMetadata {
    #[serde(default)]
    versioning: Versioning,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Versioning {
    #[serde(default)]
    latest: Option<String>,
    #[serde(default)]
    versions: Versions,
    #[serde(default)]
    snapshot_versions: SnapshotVersions,
}

#[derive(Debug, Default, Deserialize)]
struct Versions {
    #[serde(default, rename = "version")]
    items: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotVersions {
    #[serde(default, rename = "snapshotVersion")]
    items: Vec<SnapshotVersion>,
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotVersion {
    #[serde(default)]
    value: Option<String>,
}

/// Selector failure: the named element is absent or has no text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing element {0}")]
pub struct MissingElement(pub &'static str);

impl MavenMetadata {
    /// Parse a metadata document.
    ///
    /// # Errors
    ///
    /// Returns the deserialiser's message when the XML is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use bacon_installer::metadata::MavenMetadata;
    ///
    /// let xml = "<metadata><versioning><latest>2.3.1</latest></versioning></metadata>";
    /// let metadata = MavenMetadata::parse(xml).expect("valid metadata");
    /// assert_eq!(metadata.latest_release(), Ok("2.3.1"));
    /// ```
    pub fn parse(xml: &str) -> std::result::Result<Self, String> {
        quick_xml::de::from_str(xml).map_err(|e| e.to_string())
    }

    /// Text of `versioning/latest`, the publisher-declared latest version.
    ///
    /// # Errors
    ///
    /// Returns [`MissingElement`] when the element is absent or empty.
    pub fn latest_release(&self) -> std::result::Result<&str, MissingElement> {
        non_empty(self.versioning.latest.as_deref()).ok_or(MissingElement("versioning/latest"))
    }

    /// Text of the first `versioning/versions/version` entry.
    ///
    /// Entries are taken in document order; no version comparison is made.
    ///
    /// # Errors
    ///
    /// Returns [`MissingElement`] when no version is listed.
    pub fn first_listed_version(&self) -> std::result::Result<&str, MissingElement> {
        non_empty(self.versioning.versions.items.first().map(String::as_str))
            .ok_or(MissingElement("versioning/versions/version"))
    }

    /// `value` text of the first `versioning/snapshotVersions/snapshotVersion`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingElement`] when there is no snapshot entry or its value
    /// is empty.
    pub fn first_snapshot_value(&self) -> std::result::Result<&str, MissingElement> {
        let first = self
            .versioning
            .snapshot_versions
            .items
            .first()
            .ok_or(MissingElement("versioning/snapshotVersions/snapshotVersion"))?;
        non_empty(first.value.as_deref()).ok_or(MissingElement(
            "versioning/snapshotVersions/snapshotVersion/value",
        ))
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Download and parse `<directory_url>/maven-metadata.xml`.
///
/// The document is staged in a temporary directory that is removed when this
/// function returns, on success or failure.
///
/// # Errors
///
/// Returns [`InstallerError::MetadataFetch`] when the download fails and
/// [`InstallerError::MetadataParse`] when the document cannot be read or
/// parsed.
pub fn fetch_metadata(
    downloader: &dyn ArtifactDownloader,
    directory_url: &str,
) -> Result<(String, MavenMetadata)> {
    let url = metadata_url(directory_url);
    let temp_dir = tempfile::tempdir().map_err(|e| {
        InstallerError::filesystem(std::env::temp_dir().to_string_lossy().into_owned(), e)
    })?;
    let dest = temp_dir.path().join(METADATA_FILENAME);

    debug!("fetching metadata {url}");
    downloader
        .download(&url, &dest)
        .map_err(|source| InstallerError::MetadataFetch {
            url: url.clone(),
            source,
        })?;

    let xml = std::fs::read_to_string(&dest).map_err(|e| InstallerError::MetadataParse {
        url: url.clone(),
        reason: format!("could not read downloaded document: {e}"),
    })?;
    let metadata =
        MavenMetadata::parse(&xml).map_err(|reason| InstallerError::MetadataParse {
            url: url.clone(),
            reason,
        })?;
    Ok((url, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::{DownloadError, MockArtifactDownloader};
    use rstest::rstest;

    const RELEASE_METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>org.jboss.pnc.bacon</groupId>
  <artifactId>cli</artifactId>
  <versioning>
    <latest>2.3.1</latest>
    <release>2.3.1</release>
    <versions>
      <version>2.2.0</version>
      <version>2.3.1</version>
    </versions>
    <lastUpdated>20240101120000</lastUpdated>
  </versioning>
</metadata>"#;

    const SNAPSHOT_METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>org.jboss.pnc.bacon</groupId>
  <artifactId>cli</artifactId>
  <versioning>
    <versions>
      <version>2.4.0-SNAPSHOT</version>
      <version>2.5.0-SNAPSHOT</version>
      <version>2.3.2-SNAPSHOT</version>
    </versions>
  </versioning>
</metadata>"#;

    const SNAPSHOT_BUILD_METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata modelVersion="1.1.0">
  <groupId>org.jboss.pnc.bacon</groupId>
  <artifactId>cli</artifactId>
  <version>2.4.0-SNAPSHOT</version>
  <versioning>
    <snapshot>
      <timestamp>20240101.120000</timestamp>
      <buildNumber>3</buildNumber>
    </snapshot>
    <lastUpdated>20240101120000</lastUpdated>
    <snapshotVersions>
      <snapshotVersion>
        <classifier>shaded</classifier>
        <extension>jar</extension>
        <value>2.4.0-20240101.120000-3</value>
        <updated>20240101120000</updated>
      </snapshotVersion>
      <snapshotVersion>
        <extension>pom</extension>
        <value>2.4.0-20240101.120000-2</value>
        <updated>20240101120000</updated>
      </snapshotVersion>
    </snapshotVersions>
  </versioning>
</metadata>"#;

    const MALFORMED: &str = "<metadata><versioning><latest>2.3.1</versioning></metadata>";

    #[test]
    fn latest_release_reads_declared_latest() {
        let metadata = MavenMetadata::parse(RELEASE_METADATA).expect("parse");
        assert_eq!(metadata.latest_release(), Ok("2.3.1"));
    }

    #[test]
    fn first_listed_version_ignores_later_entries() {
        let metadata = MavenMetadata::parse(SNAPSHOT_METADATA).expect("parse");
        assert_eq!(metadata.first_listed_version(), Ok("2.4.0-SNAPSHOT"));
    }

    #[test]
    fn first_snapshot_value_reads_first_entry() {
        let metadata = MavenMetadata::parse(SNAPSHOT_BUILD_METADATA).expect("parse");
        assert_eq!(metadata.first_snapshot_value(), Ok("2.4.0-20240101.120000-3"));
    }

    #[rstest]
    #[case::no_latest(SNAPSHOT_METADATA)]
    #[case::empty_latest("<metadata><versioning><latest>  </latest></versioning></metadata>")]
    #[case::no_versioning("<metadata><groupId>g</groupId></metadata>")]
    fn latest_release_reports_missing_element(#[case] xml: &str) {
        let metadata = MavenMetadata::parse(xml).expect("parse");
        assert_eq!(
            metadata.latest_release(),
            Err(MissingElement("versioning/latest"))
        );
    }

    #[test]
    fn first_listed_version_reports_missing_element() {
        let metadata =
            MavenMetadata::parse("<metadata><versioning><latest>1</latest></versioning></metadata>")
                .expect("parse");
        assert_eq!(
            metadata.first_listed_version(),
            Err(MissingElement("versioning/versions/version"))
        );
    }

    #[test]
    fn first_snapshot_value_reports_missing_entry() {
        let metadata = MavenMetadata::parse(RELEASE_METADATA).expect("parse");
        let err = metadata
            .first_snapshot_value()
            .expect_err("release metadata has no snapshot versions");
        assert!(err.to_string().contains("snapshotVersion"));
    }

    #[test]
    fn parse_rejects_malformed_xml() {
        let result = MavenMetadata::parse(MALFORMED);
        assert!(result.is_err());
    }

    #[test]
    fn fetch_metadata_requests_metadata_document() {
        let mut downloader = MockArtifactDownloader::new();
        downloader
            .expect_download()
            .withf(|url, _| url == "https://example.org/cli/maven-metadata.xml")
            .times(1)
            .returning(|_, dest| std::fs::write(dest, RELEASE_METADATA).map_err(DownloadError::Io));

        let (url, metadata) =
            fetch_metadata(&downloader, "https://example.org/cli/").expect("fetch");
        assert_eq!(url, "https://example.org/cli/maven-metadata.xml");
        assert_eq!(metadata.latest_release(), Ok("2.3.1"));
    }

    #[test]
    fn fetch_metadata_wraps_transport_failure() {
        let mut downloader = MockArtifactDownloader::new();
        downloader.expect_download().returning(|url, _| {
            Err(DownloadError::HttpError {
                url: url.to_owned(),
                reason: "connection refused".to_owned(),
            })
        });

        let err = fetch_metadata(&downloader, "https://example.org/cli/")
            .expect_err("expected fetch failure");
        assert!(matches!(err, InstallerError::MetadataFetch { .. }));
        assert_eq!(err.url(), Some("https://example.org/cli/maven-metadata.xml"));
    }

    #[test]
    fn fetch_metadata_wraps_parse_failure() {
        let mut downloader = MockArtifactDownloader::new();
        downloader
            .expect_download()
            .returning(|_, dest| std::fs::write(dest, MALFORMED).map_err(DownloadError::Io));

        let err = fetch_metadata(&downloader, "https://example.org/cli/")
            .expect_err("expected parse failure");
        assert!(matches!(err, InstallerError::MetadataParse { .. }));
    }
}
