use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::paths::replace_os;

const PLACEHOLDER: &str = "{}";

#[derive(Debug, Default)]
pub struct ExecResult {
    pub attempted: usize,
    /// Substituted command line of every run that failed, in run order.
    pub failures: Vec<String>,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Splits `template` on single spaces and substitutes `path` into every
/// argument, keeping the path's bytes as they are. There is no quoting:
/// `"a  b"` yields an empty middle argument.
pub fn build_argv(template: &OsStr, path: &OsStr) -> Vec<OsString> {
    template
        .as_bytes()
        .split(|&b| b == b' ')
        .map(|arg| replace_os(OsStr::from_bytes(arg), PLACEHOLDER, path))
        .collect()
}

pub fn format_failure(command_line: &str) -> String {
    format!("Error: Unable to start process '{}'", command_line)
}

/// Runs `template` once per path, one child at a time. A failing or
/// unlaunchable command is reported on stderr and the loop moves on.
pub fn exec_matches<P: AsRef<Path>>(paths: &[P], template: impl AsRef<OsStr>) -> ExecResult {
    let template = template.as_ref();
    let mut result = ExecResult::default();

    for path in paths {
        let path = path.as_ref().as_os_str();
        let argv = build_argv(template, path);
        result.attempted += 1;

        if !run_one(&argv) {
            let command_line = replace_os(template, PLACEHOLDER, path)
                .to_string_lossy()
                .into_owned();
            eprintln!("{}", format_failure(&command_line));
            result.failures.push(command_line);
        }
    }

    result
}

/// Spawns `argv` and blocks until it exits. Spawn errors count as exit 1.
fn run_one(argv: &[OsString]) -> bool {
    let Some((program, args)) = argv.split_first() else {
        return false;
    };

    match Command::new(program).args(args).status() {
        Ok(status) => {
            debug!(?argv, code = ?status.code(), "child exited");
            status.success()
        }
        Err(e) => {
            debug!(?argv, error = %e, "spawn failed, treating as exit status 1");
            false
        }
    }
}
