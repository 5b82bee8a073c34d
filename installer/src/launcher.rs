//! Launcher script generation.
//!
//! Four Bash launchers are written to the shell directory. Each runs the
//! installed jar, optionally prefixing a subcommand, and understands
//! `update [snapshot]` to re-run the bootstrap installer.

use crate::config::{InstallTarget, create_dir_if_absent};
use crate::error::{InstallerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::io::Write;

/// A launcher name and the subcommand it passes ahead of user arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LauncherSpec {
    /// File name of the launcher in the shell directory.
    pub name: &'static str,
    /// Argument inserted before the user's arguments; empty for none.
    pub subcommand: &'static str,
}

/// The launchers installed by every run.
pub const LAUNCHERS: [LauncherSpec; 4] = [
    LauncherSpec {
        name: "bacon",
        subcommand: "",
    },
    LauncherSpec {
        name: "pnc",
        subcommand: "pnc",
    },
    LauncherSpec {
        name: "da",
        subcommand: "da",
    },
    LauncherSpec {
        name: "pig",
        subcommand: "pig",
    },
];

/// Launcher script body. `{jar_dir}` and `{subcommand}` are substituted by
/// [`render_launcher`]; every other brace is literal shell syntax.
const LAUNCHER_TEMPLATE: &str = r##"#!/bin/bash
set -e

function check_if_java_installed {
    command -v java > /dev/null 2>&1 || { echo >&2 "java is required to run this command... Aborting!"; exit 1; }
}

if [ "$1" == "update" ]; then
    if [ "$2" == "snapshot" ]; then
        echo "Updating to latest snapshot version..."
    else
        echo "Updating to latest released version..."
    fi

    # Script runs the bacon_install.py to update itself
    curl -fsSL https://raw.github.com/project-ncl/bacon/master/bacon_install.py | python3 - $2
else
    check_if_java_installed
    java -jar {jar_dir}/bacon.jar {subcommand} "$@"
fi

if [ -z "$1" ]; then
    echo "To update to the latest released version of bacon/pnc/da/pig, run:"
    echo ""
    echo "    bacon update"
    echo ""
    echo "To update to a snapshot version of bacon, run:"
    echo ""
    echo "    bacon update snapshot"
    echo ""
fi"##;

/// Result of launcher generation.
#[derive(Debug)]
pub struct LauncherResult {
    /// Paths of the written launchers, in [`LAUNCHERS`] order.
    pub paths: Vec<Utf8PathBuf>,
    /// Whether the shell directory is in `PATH`.
    pub in_path: bool,
}

/// Substitute `{name}` placeholders in `template`.
///
/// Braces that do not open a known placeholder are copied unchanged, so
/// shell blocks such as `{ echo; }` pass through.
///
/// # Examples
///
/// ```
/// use bacon_installer::launcher::render_template;
///
/// let rendered = render_template("f() { run {tool}; }", &[("tool", "java")]);
/// assert_eq!(rendered, "f() { run java; }");
/// ```
#[must_use]
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let (literal, tail) = rest.split_at(open);
        rendered.push_str(literal);
        let placeholder = values.iter().find_map(|(name, value)| {
            tail.strip_prefix('{')
                .and_then(|t| t.strip_prefix(*name))
                .and_then(|t| t.strip_prefix('}'))
                .map(|after| (*value, after))
        });
        match placeholder {
            Some((value, after)) => {
                rendered.push_str(value);
                rest = after;
            }
            None => {
                rendered.push('{');
                rest = tail.get(1..).unwrap_or_default();
            }
        }
    }
    rendered.push_str(rest);
    rendered
}

/// Render the launcher script for `spec`.
#[must_use]
pub fn render_launcher(jar_dir: &Utf8Path, spec: &LauncherSpec) -> String {
    render_template(
        LAUNCHER_TEMPLATE,
        &[("jar_dir", jar_dir.as_str()), ("subcommand", spec.subcommand)],
    )
}

/// Write every launcher in [`LAUNCHERS`] to the target's shell directory.
///
/// All scripts are rendered before the first is written. Each is written to
/// a temporary file in the shell directory, marked executable (`0755`) and
/// renamed into place, replacing any previous launcher of the same name.
///
/// # Errors
///
/// Returns [`InstallerError::Filesystem`] if the shell directory cannot be
/// created or a script cannot be written.
///
/// # Examples
///
/// ```no_run
/// use bacon_installer::config::{InstallMode, InstallTarget, RepositoryUrls};
/// use bacon_installer::dirs::SystemBaseDirs;
/// use bacon_installer::launcher::generate_launchers;
///
/// let target = InstallTarget::resolve(&SystemBaseDirs, InstallMode::Release, &RepositoryUrls::default())?;
/// let result = generate_launchers(&target)?;
/// for path in &result.paths {
///     eprintln!("launcher written: {path}");
/// }
/// # Ok::<(), bacon_installer::error::InstallerError>(())
/// ```
pub fn generate_launchers(target: &InstallTarget) -> Result<LauncherResult> {
    let shell_dir = target.shell_dir();
    let rendered: Vec<(Utf8PathBuf, String)> = LAUNCHERS
        .iter()
        .map(|spec| (shell_dir.join(spec.name), render_launcher(target.jar_dir(), spec)))
        .collect();

    create_dir_if_absent(shell_dir)?;
    for (path, content) in &rendered {
        write_launcher(shell_dir, path, content)?;
    }

    Ok(LauncherResult {
        paths: rendered.into_iter().map(|(path, _)| path).collect(),
        in_path: is_directory_in_path(shell_dir.as_std_path()),
    })
}

/// Writes an executable launcher script through a temporary file.
fn write_launcher(shell_dir: &Utf8Path, path: &Utf8Path, content: &str) -> Result<()> {
    let mut staged = tempfile::Builder::new()
        .prefix(".launcher.")
        .tempfile_in(shell_dir)
        .map_err(|e| InstallerError::filesystem(shell_dir, e))?;
    staged
        .write_all(content.as_bytes())
        .map_err(|e| InstallerError::filesystem(path, e))?;
    set_executable(staged.path()).map_err(|e| InstallerError::filesystem(path, e))?;
    staged
        .persist(path)
        .map_err(|e| InstallerError::filesystem(path, e.error))?;
    debug!("wrote launcher {path}");
    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &std::path::Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    // rwxr-xr-x
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_executable(_path: &std::path::Path) -> std::io::Result<()> {
    Ok(())
}

/// Checks if a directory is in the PATH environment variable.
fn is_directory_in_path(dir: &std::path::Path) -> bool {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).any(|p| p == dir))
        .unwrap_or(false)
}

/// Returns instructions for adding a directory to PATH.
#[must_use]
pub fn path_instructions(shell_dir: &Utf8Path) -> String {
    format!(
        concat!(
            "Add the following to your shell profile (~/.bashrc or ~/.bash_profile):\n",
            "  export PATH=\"$PATH:{}\""
        ),
        shell_dir
    )
}
