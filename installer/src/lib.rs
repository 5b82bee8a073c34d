//! Bacon bootstrap installer library.
//!
//! Resolves the latest released (or snapshot) bacon CLI version from a Maven
//! repository, downloads the shaded jar and writes the `bacon`, `pnc`, `da`
//! and `pig` launcher scripts. It is used by the `bacon-install` binary and
//! can be driven programmatically with a custom [`download::ArtifactDownloader`].
//!
//! # Modules
//!
//! - [`artifact`] - Artifact URL layout and jar installation
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Install target and repository configuration
//! - [`dirs`] - Home directory and privilege detection
//! - [`download`] - HTTP transport abstraction
//! - [`error`] - Installer error types
//! - [`install`] - End-to-end install pipeline
//! - [`launcher`] - Launcher script generation
//! - [`metadata`] - `maven-metadata.xml` model and retrieval
//! - [`output`] - User-facing messages
//! - [`resolver`] - Latest-version resolution

pub mod artifact;
pub mod cli;
pub mod config;
pub mod dirs;
pub mod download;
pub mod error;
pub mod install;
pub mod launcher;
pub mod metadata;
pub mod output;
pub mod resolver;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
