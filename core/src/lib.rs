//! Request pipeline for a minimal curl-like HTTP client.
//!
//! # Overview
//! Turns loosely specified command-line inputs (method, body spec, raw header
//! strings) into one well-formed `HttpRequest`, sends it through a
//! caller-supplied `Transport`, and streams the response body to a writer.
//!
//! # Design
//! - `Invocation` holds the raw inputs; `MethodFlag` records whether the
//!   method was set explicitly, which drives the data-implies-POST rule.
//! - `request` builds and validates the request without network I/O.
//! - `CurlClient` owns a `Transport` and executes exactly one request. The
//!   network lives behind the trait, so the pipeline is testable with a fake.
//! - `trace` renders the verbose `>`/`<` dumps.

pub mod client;
pub mod error;
pub mod http;
pub mod request;
pub mod trace;
pub mod transport;
pub mod types;

pub use client::{copy_body, CurlClient, Outcome};
pub use error::{CurlError, Result};
pub use http::{Header, HttpRequest, HttpResponse, RequestBody};
pub use request::{build_request, parse_header, parse_headers, resolve_body, resolve_method};
pub use transport::Transport;
pub use types::{Invocation, MethodFlag};
