//! User-facing progress and completion messages.
//!
//! Messages go to a caller-supplied writer (stderr in the binary) so tests
//! can capture them.

use crate::launcher::path_instructions;
use camino::Utf8Path;
use std::io::Write;

/// Writes one line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}

/// Line announcing the installed version.
#[must_use]
pub fn installed_version_message(version: &str) -> String {
    format!("Installed version: {version}!")
}

/// Line reporting where the jar was installed.
#[must_use]
pub fn jar_location_message(jar_path: &Utf8Path) -> String {
    format!("bacon installed in: {jar_path}")
}

/// Lines telling macOS users how to put `~/bin` on their `PATH`.
#[must_use]
pub fn mac_path_notice() -> String {
    concat!(
        "\n",
        "Mac user detected! Please adjust your $PATH variable if necessary to run 'bacon'\n",
        "\n",
        "    $ echo 'export PATH=\"$PATH:${HOME}/bin\"' >> ~/.bash_profile"
    )
    .to_owned()
}

/// Writes guidance for reaching the launchers from the shell.
///
/// macOS users always get the profile hint, since `~/bin` is not on the
/// default macOS `PATH`. Elsewhere, instructions are printed only when the
/// launcher directory is missing from `PATH`.
pub fn write_path_guidance(shell_dir: &Utf8Path, in_path: bool, stderr: &mut dyn Write) {
    if cfg!(target_os = "macos") {
        write_stderr_line(stderr, mac_path_notice());
    } else if !in_path {
        write_stderr_line(stderr, "");
        write_stderr_line(stderr, path_instructions(shell_dir));
    }
}
