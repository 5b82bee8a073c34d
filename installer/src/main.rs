//! Bacon installer CLI entrypoint.
//!
//! Installs the latest bacon CLI jar and its launcher scripts, then prints
//! how to reach the launchers from the shell.

use bacon_installer::cli::Cli;
use bacon_installer::config::{InstallTarget, RepositoryUrls};
use bacon_installer::dirs::SystemBaseDirs;
use bacon_installer::download::HttpDownloader;
use bacon_installer::error::Result;
use bacon_installer::install::install;
use bacon_installer::output::{write_path_guidance, write_stderr_line};
use clap::Parser;
use std::io::Write;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let urls = RepositoryUrls::from_env();
    let target = InstallTarget::resolve(&SystemBaseDirs, cli.install_mode(), &urls)?;
    log::debug!("install target: {target:?}");

    let outcome = install(&target, &HttpDownloader, stderr)?;
    write_path_guidance(target.shell_dir(), outcome.launchers.in_path, stderr);
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}
