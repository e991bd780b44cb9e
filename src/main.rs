mod cli;
mod commands;
mod error;
mod logging;
mod matcher;
mod paths;
mod testutil;
mod walk;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use cli::Cli;
use error::{UsageError, USAGE};
use std::ffi::OsString;
use tracing::debug;

fn main() {
    logging::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            debug!(error = %e, "argument front end rejected input");
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    match run(&cli.into_tokens()) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            if let Some(usage) = e.downcast_ref::<UsageError>() {
                debug!(error = %e, cause = ?usage, "usage error");
                eprintln!("{}", USAGE);
            } else {
                eprintln!("error: {:#}", e);
            }
            std::process::exit(1);
        }
    }
}

/// Returns whether every spawned command succeeded (always true in list mode).
fn run(args: &[OsString]) -> Result<bool> {
    let invocation = cli::parse_args(args)?;
    debug!(?invocation, "parsed arguments");

    let paths = walk::walk(&invocation.directory, &invocation.filter)?;

    match invocation.command.as_deref() {
        Some(template) => {
            let result = commands::exec_matches(&paths, template);
            debug!(
                attempted = result.attempted,
                failed = result.failures.len(),
                "command runs finished"
            );
            Ok(result.success())
        }
        None => {
            commands::print_matches(&mut std::io::stdout().lock(), &paths)?;
            Ok(true)
        }
    }
}
