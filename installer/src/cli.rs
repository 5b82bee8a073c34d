//! CLI argument definitions for the bacon installer.
//!
//! The installer takes a single optional positional argument. It is kept
//! separate from the entrypoint so parsing can be tested directly.

use crate::config::InstallMode;
use clap::Parser;

/// Install the bacon, pnc, da and pig command-line tools.
#[derive(Parser, Debug, Default)]
#[command(name = "bacon-install")]
#[command(version, about)]
#[command(long_about = concat!(
    "Install the bacon, pnc, da and pig command-line tools.\n\n",
    "Downloads the latest bacon CLI jar from Maven Central (or the latest ",
    "snapshot from the JBoss snapshot repository) and writes launcher scripts ",
    "that run it.\n\n",
    "Run as root to install system-wide: the jar goes to /opt/bacon/bin and ",
    "the launchers to /usr/local/bin. Otherwise the jar goes to ",
    "~/.pnc-bacon/bin and the launchers to ~/bin.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Install the latest released version:\n",
    "    $ bacon-install\n\n",
    "  Install the latest snapshot:\n",
    "    $ bacon-install snapshot\n\n",
    "ENVIRONMENT:\n",
    "  BACON_INSTALL_RELEASE_URL     Override the release repository URL\n",
    "  BACON_INSTALL_SNAPSHOT_URL    Override the snapshot repository URL\n",
    "  RUST_LOG                      Log filter (default: warn)\n\n",
    "For more information, see: https://github.com/project-ncl/bacon",
))]
pub struct Cli {
    /// Pass `snapshot` to install the latest snapshot; anything else installs
    /// the latest release.
    #[arg(value_name = "MODE")]
    pub mode: Option<String>,
}

impl Cli {
    /// The install mode selected by the positional argument.
    #[must_use]
    pub fn install_mode(&self) -> InstallMode {
        InstallMode::from_argument(self.mode.as_deref())
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
