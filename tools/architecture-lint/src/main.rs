//! Command-line entry point for the backend boundary lint.
//!
//! Usage: `architecture-lint [BACKEND_DIR]`. Without an argument the
//! `backend/` crate next to this tool in the workspace is checked.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let backend_dir = env::args_os().nth(1).map_or_else(default_backend_dir, PathBuf::from);
    match architecture_lint::lint_backend_sources(&backend_dir) {
        Ok(report) => {
            let _ = writeln!(
                io::stdout().lock(),
                "architecture lint passed: {} files in {}",
                report.files_checked,
                backend_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "{err}");
            ExitCode::FAILURE
        }
    }
}

fn default_backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("backend")
}
