//! `simple-curl`: send one HTTP request and stream the response to stdout.
//!
//! # Design
//! - `cli` maps command-line flags onto `curl_core::Invocation`.
//! - `transport` implements `curl_core::Transport` with ureq.
//! - `run` wires them to the process's stdout (response body only) and
//!   stderr (warnings, verbose dumps).

pub mod cli;
pub mod transport;

use std::io;

use curl_core::{CurlClient, Outcome, Result};

pub use cli::Cli;
pub use transport::{TransportConfig, UreqTransport};

/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "SIMPLE_CURL_LOG";

/// Execute the invocation described by `cli` against the real network.
pub fn run(cli: &Cli) -> Result<Outcome> {
    let client = CurlClient::new(UreqTransport::new(cli.transport_config()));
    let mut out = io::BufWriter::new(io::stdout().lock());
    let mut diag = io::stderr();
    client.execute(&cli.invocation(), &mut out, &mut diag)
}
