//! Small helpers shared across CLI tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use super::{AnalyseCommand, Cli, CliError, Command, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Err(err) = fs::write(&path, contents) {
        panic!("failed to write {}: {err}", path.display());
    }
    path
}

pub(super) fn analyse(command: AnalyseCommand) -> Cli {
    Cli {
        command: Command::Analyse(command),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
