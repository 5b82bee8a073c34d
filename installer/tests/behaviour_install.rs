//! Behaviour-driven tests for the install pipeline.
//!
//! Scenarios run the full resolve → download → generate pipeline against an
//! in-memory repository and a temporary home directory.

use bacon_installer::config::{InstallMode, InstallTarget};
use bacon_installer::error::InstallerError;
use bacon_installer::install::{InstallOutcome, install};
use bacon_installer::test_utils::{
    StubRepository, release_metadata_xml, snapshot_build_metadata_xml,
};
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::{Cell, RefCell};
use tempfile::TempDir;

const REPO: &str = "https://example.org/cli/";

struct InstallWorld {
    // Keep the temporary home alive for the lifetime of the scenario.
    _temp_dir: TempDir,
    root: Utf8PathBuf,
    repository: RefCell<StubRepository>,
    mode: Cell<InstallMode>,
    outcome: RefCell<Option<Result<InstallOutcome, InstallerError>>>,
    previous_launchers: RefCell<Vec<String>>,
}

impl InstallWorld {
    fn target(&self) -> InstallTarget {
        InstallTarget::new(
            self.root.join(".pnc-bacon/bin"),
            self.root.join("bin"),
            REPO,
            self.mode.get(),
        )
    }

    fn register(&self, url: &str, body: impl Into<Vec<u8>>) {
        let repository = self.repository.take();
        self.repository.replace(repository.with_file(url, body));
    }

    fn run_install(&self) {
        let target = self.target();
        let repository = self.repository.borrow();
        let result = install(&target, &*repository, &mut std::io::sink());
        self.outcome.replace(Some(result));
    }

    fn launcher_contents(&self) -> Vec<String> {
        let outcome = self.outcome.borrow();
        let outcome = outcome
            .as_ref()
            .expect("installer has not run")
            .as_ref()
            .expect("install failed");
        outcome
            .launchers
            .paths
            .iter()
            .map(|path| std::fs::read_to_string(path).expect("read launcher"))
            .collect()
    }
}

#[fixture]
fn install_world() -> InstallWorld {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).expect("UTF-8 path");
    InstallWorld {
        _temp_dir: temp_dir,
        root,
        repository: RefCell::new(StubRepository::new()),
        mode: Cell::new(InstallMode::Release),
        outcome: RefCell::new(None),
        previous_launchers: RefCell::new(Vec::new()),
    }
}

#[given("a release repository declaring latest version \"{version}\"")]
fn given_release_repository(install_world: &InstallWorld, version: String) {
    install_world.mode.set(InstallMode::Release);
    install_world.register(
        "https://example.org/cli/maven-metadata.xml",
        release_metadata_xml(Some(version.as_str()), &["1.0.0", version.as_str()]),
    );
    install_world.register(
        &format!("https://example.org/cli/{version}/cli-{version}-shaded.jar"),
        b"release jar".to_vec(),
    );
}

#[given("a snapshot repository listing \"{first}\" before \"{second}\"")]
fn given_snapshot_repository(install_world: &InstallWorld, first: String, second: String) {
    install_world.mode.set(InstallMode::Snapshot);
    let build = first.replace("-SNAPSHOT", "-20240101.120000-3");
    install_world.register(
        "https://example.org/cli/maven-metadata.xml",
        release_metadata_xml(None, &[first.as_str(), second.as_str()]),
    );
    install_world.register(
        &format!("https://example.org/cli/{first}/maven-metadata.xml"),
        snapshot_build_metadata_xml(&[build.as_str()]),
    );
    install_world.register(
        &format!("https://example.org/cli/{first}/cli-{build}-shaded.jar"),
        b"snapshot jar".to_vec(),
    );
}

#[given("a repository without metadata")]
fn given_empty_repository(install_world: &InstallWorld) {
    install_world.repository.replace(StubRepository::new());
}

#[when("the installer runs")]
fn when_installer_runs(install_world: &InstallWorld) {
    install_world.run_install();
}

#[when("the installer runs again")]
fn when_installer_runs_again(install_world: &InstallWorld) {
    let contents = install_world.launcher_contents();
    install_world.previous_launchers.replace(contents);
    install_world.run_install();
}

#[then("the installed version is \"{version}\"")]
fn then_installed_version(install_world: &InstallWorld, version: String) {
    let outcome = install_world.outcome.borrow();
    let outcome = outcome.as_ref().expect("installer has not run");
    match outcome {
        Ok(outcome) => assert_eq!(outcome.version, version),
        Err(err) => panic!("install failed: {err}"),
    }
}

#[then("the jar was downloaded from \"{url}\"")]
fn then_jar_downloaded_from(install_world: &InstallWorld, url: String) {
    let requests = install_world.repository.borrow().requests();
    assert_eq!(requests.last(), Some(&url), "requests: {requests:?}");
    assert!(install_world.target().jar_path().is_file());
}

#[then("four executable launchers are written")]
fn then_launchers_written(install_world: &InstallWorld) {
    let shell_dir = install_world.target().shell_dir().to_owned();
    for name in ["bacon", "pnc", "da", "pig"] {
        let path = shell_dir.join(name);
        assert!(path.is_file(), "missing launcher {path}");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mode = std::fs::metadata(&path)
                .expect("launcher metadata")
                .permissions()
                .mode();
            assert_eq!(mode & 0o111, 0o111, "{path} should be executable");
        }
    }
}

#[then("the run fails with a metadata fetch error")]
fn then_metadata_fetch_error(install_world: &InstallWorld) {
    let outcome = install_world.outcome.borrow();
    let outcome = outcome.as_ref().expect("installer has not run");
    assert!(
        matches!(outcome, Err(InstallerError::MetadataFetch { .. })),
        "unexpected outcome: {outcome:?}"
    );
}

#[then("no install directories exist")]
fn then_no_directories(install_world: &InstallWorld) {
    let target = install_world.target();
    assert!(!target.jar_dir().exists());
    assert!(!target.shell_dir().exists());
}

#[then("the launchers are unchanged")]
fn then_launchers_unchanged(install_world: &InstallWorld) {
    let previous = install_world.previous_launchers.borrow();
    assert_eq!(previous.len(), 4);
    assert_eq!(*previous, install_world.launcher_contents());
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

// Bindings are index-based; keep tests/features/install.feature in order.
#[scenario(path = "tests/features/install.feature", index = 0)]
fn scenario_release_install(install_world: InstallWorld) {
    let _ = install_world;
}

#[scenario(path = "tests/features/install.feature", index = 1)]
fn scenario_snapshot_install(install_world: InstallWorld) {
    let _ = install_world;
}

#[scenario(path = "tests/features/install.feature", index = 2)]
fn scenario_metadata_failure(install_world: InstallWorld) {
    let _ = install_world;
}

#[scenario(path = "tests/features/install.feature", index = 3)]
fn scenario_reinstall_is_idempotent(install_world: InstallWorld) {
    let _ = install_world;
}
