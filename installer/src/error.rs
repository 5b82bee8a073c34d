//! Error types for the bacon installer.
//!
//! Every failure during an install run is fatal: the run stops, the message
//! is printed to stderr and the process exits non-zero. The variants below
//! name the stage that failed so the message tells the user where to look.

use crate::download::DownloadError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur during the installation process.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The install paths could not be determined.
    #[error("configuration error: {reason}")]
    Configuration {
        /// Description of what could not be determined.
        reason: String,
    },

    /// The repository metadata document could not be downloaded.
    #[error("could not fetch repository metadata: {source}")]
    MetadataFetch {
        /// URL of the metadata document.
        url: String,
        /// The underlying transport failure.
        #[source]
        source: DownloadError,
    },

    /// The repository metadata document is malformed or lacks an element.
    #[error("invalid repository metadata at {url}: {reason}")]
    MetadataParse {
        /// URL of the metadata document.
        url: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// The artifact jar could not be downloaded.
    #[error("could not download artifact: {source}")]
    ArtifactDownload {
        /// URL of the artifact.
        url: String,
        /// The underlying transport failure.
        #[source]
        source: DownloadError,
    },

    /// A directory could not be created or a file could not be written.
    #[error("filesystem operation failed at {path}: {source}")]
    Filesystem {
        /// Path the operation targeted.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl InstallerError {
    /// Wraps an I/O error with the path it occurred at.
    pub(crate) fn filesystem(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Returns the URL involved in a network or metadata failure.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::MetadataFetch { url, .. }
            | Self::MetadataParse { url, .. }
            | Self::ArtifactDownload { url, .. } => Some(url),
            Self::Configuration { .. } | Self::Filesystem { .. } => None,
        }
    }
}

/// Result type alias using [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;
