//! Command-line surface, defined with clap derive macros.

use std::time::Duration;

use clap::{ArgAction, Parser, ValueHint};
use curl_core::{Invocation, MethodFlag};

use crate::transport::TransportConfig;

/// A simple curl clone.
///
/// Sends one HTTP request and writes the response body to stdout.
/// Warnings, verbose traces and errors go to stderr.
#[derive(Debug, Parser)]
#[command(name = "simple-curl", version, about, long_about = None)]
pub struct Cli {
    /// URL to request
    #[arg(value_name = "URL", value_hint = ValueHint::Url)]
    pub url: Option<String>,

    /// HTTP method to use (GET, POST, etc.)
    #[arg(short = 'X', long, value_name = "VERB")]
    pub method: Option<String>,

    /// HTTP request body; `@file` reads the body from a file
    #[arg(short, long, value_name = "DATA", allow_hyphen_values = true)]
    pub data: Option<String>,

    /// Pass custom header(s) to server, as "Key: Value"
    #[arg(
        short = 'H',
        long = "header",
        value_name = "HEADER",
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub headers: Vec<String>,

    /// Make the operation more talkative
    #[arg(short, long)]
    pub verbose: bool,

    /// Maximum time in seconds for the whole transfer
    #[arg(short = 'm', long, value_name = "SECONDS", env = "SIMPLE_CURL_MAX_TIME")]
    pub max_time: Option<f64>,
}

impl Cli {
    /// The pipeline inputs. A missing URL becomes an empty one and is
    /// rejected when the request is built.
    pub fn invocation(&self) -> Invocation {
        Invocation {
            url: self.url.clone().unwrap_or_default(),
            method: MethodFlag::from_arg(self.method.clone()),
            data: self.data.clone().unwrap_or_default(),
            headers: self.headers.clone(),
            verbose: self.verbose,
        }
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            timeout: self
                .max_time
                .filter(|secs| secs.is_finite() && *secs > 0.0)
                .map(Duration::from_secs_f64),
            ..TransportConfig::default()
        }
    }
}
