//! HTTP request and response values exchanged with a `Transport`.
//!
//! # Design
//! The core builds an `HttpRequest` and hands it to a transport, which owns
//! the network I/O and returns an `HttpResponse`. The request owns its body
//! (including an open file handle) so the handle is released whenever the
//! request is dropped, whether it was sent or not. The response body is a
//! stream; nothing in the core reads it into memory.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use url::Url;

/// A header as a `(name, value)` pair. Lists of these keep insertion order
/// and may repeat a name.
pub type Header = (String, String);

/// Body of an outgoing request.
#[derive(Debug)]
pub enum RequestBody {
    /// Literal bytes given on the command line.
    Bytes(Vec<u8>),
    /// An open file named with the `@path` convention.
    File { path: PathBuf, file: File },
}

impl RequestBody {
    /// Body length in bytes, when it is known before sending.
    ///
    /// File bodies never report one: pipes, FIFOs and procfs files all claim
    /// a size of 0, so a file is streamed with chunked encoding instead.
    pub fn known_length(&self) -> Option<u64> {
        match self {
            RequestBody::Bytes(bytes) => Some(bytes.len() as u64),
            RequestBody::File { .. } => None,
        }
    }

    /// Consume the body into a reader for the transport.
    pub fn into_reader(self) -> Box<dyn Read + Send> {
        match self {
            RequestBody::Bytes(bytes) => Box::new(std::io::Cursor::new(bytes)),
            RequestBody::File { file, .. } => Box::new(file),
        }
    }
}

/// A fully resolved outgoing request. Built once and consumed by the
/// transport.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: String,
    pub url: Url,
    pub headers: Vec<Header>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// First value of a header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Path plus query, as it appears on the request line.
    pub fn request_target(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{query}", self.url.path()),
            None => self.url.path().to_string(),
        }
    }

    /// Value for the `Host` header: host, plus the port when it is not the
    /// scheme's default.
    pub fn host(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }
}

/// A response whose headers have arrived and whose body is still a stream.
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub version: String,
    pub headers: Vec<Header>,
    pub body: Box<dyn Read>,
}

impl HttpResponse {
    /// `404 Not Found` style status text.
    pub fn status_text(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }

    pub fn is_error_status(&self) -> bool {
        self.status >= 400
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .field("version", &self.version)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

fn find_header<'a>(headers: &'a [Header], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
