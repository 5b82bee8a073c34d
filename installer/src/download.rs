//! HTTP transport for repository metadata and artifact retrieval.
//!
//! Provides a trait-based abstraction over plain GET downloads so the
//! resolver and artifact stages can be exercised without network access.

use log::debug;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Name of the metadata document in a Maven repository directory.
pub const METADATA_FILENAME: &str = "maven-metadata.xml";

/// Upper bound on a single request, body transfer included.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Trait for downloading a URL into a local file.
///
/// # Examples
///
/// ```no_run
/// use bacon_installer::download::{ArtifactDownloader, HttpDownloader};
/// use std::path::Path;
///
/// let downloader = HttpDownloader;
/// downloader.download(
///     "https://repo.maven.org/maven2/org/jboss/pnc/bacon/cli/maven-metadata.xml",
///     Path::new("/tmp/maven-metadata.xml"),
/// )?;
/// # Ok::<(), bacon_installer::download::DownloadError>(())
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactDownloader {
    /// Download `url` and write the response body to `dest`, replacing any
    /// existing content.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the file cannot be written.
    fn download(&self, url: &str, dest: &Path) -> Result<(), DownloadError>;
}

/// Errors arising from download operations.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// HTTP request failed or returned a non-success status.
    #[error("download failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested resource was not found (HTTP 404).
    #[error("not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// I/O error writing the downloaded file.
    #[error("I/O error writing download: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP-based downloader using `ureq`.
pub struct HttpDownloader;

impl ArtifactDownloader for HttpDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        debug!("GET {url} -> {}", dest.display());
        let response = http_agent()
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let mut file = std::fs::File::create(dest)?;
        std::io::copy(&mut response.into_body().as_reader(), &mut file)?;
        file.sync_all()?;
        Ok(())
    }
}

/// Shared `ureq` agent with request timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(DOWNLOAD_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`DownloadError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> DownloadError {
    match err {
        ureq::Error::StatusCode(404) => DownloadError::NotFound {
            url: url.to_owned(),
        },
        other => DownloadError::HttpError {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

/// Append a path segment to a repository URL with exactly one `/` between
/// them.
///
/// # Examples
///
/// ```
/// use bacon_installer::download::join_url;
///
/// assert_eq!(join_url("https://example.org/cli/", "2.3.1"), "https://example.org/cli/2.3.1");
/// assert_eq!(join_url("https://example.org/cli", "2.3.1"), "https://example.org/cli/2.3.1");
/// ```
#[must_use]
pub fn join_url(base: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        segment.trim_start_matches('/')
    )
}

/// URL of the metadata document inside a repository directory.
#[must_use]
pub fn metadata_url(directory_url: &str) -> String {
    join_url(directory_url, METADATA_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::trailing_slash("https://example.org/cli/", "2.3.1")]
    #[case::no_trailing_slash("https://example.org/cli", "2.3.1")]
    #[case::leading_slash_segment("https://example.org/cli/", "/2.3.1")]
    fn join_url_uses_single_separator(#[case] base: &str, #[case] segment: &str) {
        assert_eq!(join_url(base, segment), "https://example.org/cli/2.3.1");
    }

    #[test]
    fn metadata_url_appends_filename() {
        assert_eq!(
            metadata_url("https://example.org/cli/2.4.0-SNAPSHOT"),
            "https://example.org/cli/2.4.0-SNAPSHOT/maven-metadata.xml"
        );
    }

    #[test]
    fn map_ureq_error_maps_404_to_not_found() {
        let err = map_ureq_error("https://example.org/x", &ureq::Error::StatusCode(404));
        assert!(matches!(err, DownloadError::NotFound { url } if url == "https://example.org/x"));
    }

    #[test]
    fn map_ureq_error_maps_other_status_to_http_error() {
        let err = map_ureq_error("https://example.org/x", &ureq::Error::StatusCode(503));
        match err {
            DownloadError::HttpError { url, reason } => {
                assert_eq!(url, "https://example.org/x");
                assert!(reason.contains("503"), "reason: {reason}");
            }
            other => panic!("expected HttpError, got {other:?}"),
        }
    }

    #[test]
    fn not_found_error_includes_url() {
        let err = DownloadError::NotFound {
            url: "https://example.org/missing".to_owned(),
        };
        assert!(err.to_string().contains("https://example.org/missing"));
    }
}
