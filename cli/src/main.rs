//! Entry point for the `simple-curl` binary.

use std::process::ExitCode;

use clap::Parser;
use simple_curl::{Cli, LOG_ENV};
use tracing::debug;

fn main() -> ExitCode {
    // Usage errors exit 1 like every other failure; --help and --version
    // print to stdout and exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing();

    match simple_curl::run(&cli) {
        Ok(outcome) => {
            debug!(status = outcome.status, bytes = outcome.bytes_written, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Logs go to stderr and are off unless `SIMPLE_CURL_LOG` sets a filter,
/// so the default output is only the body, warnings and traces.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
