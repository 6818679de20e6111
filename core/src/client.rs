//! Executes a built request through a `Transport` and streams the result.
//!
//! # Design
//! `CurlClient` owns its transport and nothing else, so tests swap in a fake
//! transport with canned responses. Output goes to two caller-supplied
//! writers: `out` receives the response body and nothing else, `diag`
//! receives warnings and verbose dumps. The body is copied through a fixed
//! buffer, so memory stays bounded whatever the response size.

use std::io::{self, Read, Write};

use tracing::{debug, info};

use crate::error::{CurlError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::request::build_request;
use crate::trace;
use crate::transport::Transport;
use crate::types::Invocation;

/// Buffer size for the response body copy loop.
pub const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// What a completed exchange produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: u16,
    pub bytes_written: u64,
}

/// Single-shot HTTP client: build, send, stream.
#[derive(Debug, Clone)]
pub struct CurlClient<T> {
    transport: T,
}

impl<T: Transport> CurlClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run the whole pipeline for one invocation.
    ///
    /// Returns `Ok` for any completed exchange, including 4xx/5xx responses.
    pub fn execute(
        &self,
        invocation: &Invocation,
        out: &mut dyn Write,
        diag: &mut dyn Write,
    ) -> Result<Outcome> {
        let request = build_request(invocation)?;
        self.send(request, invocation.verbose, out, diag)
    }

    /// Send an already built request and stream its response body to `out`.
    pub fn send(
        &self,
        mut request: HttpRequest,
        verbose: bool,
        out: &mut dyn Write,
        diag: &mut dyn Write,
    ) -> Result<Outcome> {
        if verbose {
            trace::dump_request(&mut request, diag)?;
        }

        info!(method = %request.method, url = %request.url, "sending request");
        let mut response = self.transport.send(request)?;
        debug!(status = response.status, "response headers received");

        if verbose {
            trace::dump_response(&response, diag)?;
        }
        if response.is_error_status() {
            warn_status(&response, diag);
        }

        let bytes_written = copy_body(&mut response.body, out).map_err(CurlError::ResponseCopy)?;
        debug!(bytes_written, "response body copied");

        Ok(Outcome {
            status: response.status,
            bytes_written,
        })
    }
}

fn warn_status(response: &HttpResponse, diag: &mut dyn Write) {
    let line = format!("Warning: Server returned status {}", response.status_text());
    if let Err(e) = writeln!(diag, "{line}") {
        debug!(error = %e, "could not write status warning");
    }
}

/// Copy `reader` to `writer` through a fixed-size buffer and flush.
///
/// Returns the number of bytes written.
pub fn copy_body(reader: &mut dyn Read, writer: &mut dyn Write) -> io::Result<u64> {
    let mut buf = [0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        total += n as u64;
    }
    writer.flush()?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::Cursor;

    use super::*;

    /// Records what it was asked to send and answers with a fixed response.
    struct CannedTransport {
        status: u16,
        reason: &'static str,
        body: Vec<u8>,
        sent: RefCell<Vec<(String, Vec<u8>)>>,
    }

    impl CannedTransport {
        fn new(status: u16, reason: &'static str, body: &[u8]) -> Self {
            Self {
                status,
                reason,
                body: body.to_vec(),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for CannedTransport {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            let mut body = Vec::new();
            if let Some(b) = request.body {
                b.into_reader().read_to_end(&mut body).unwrap();
            }
            self.sent.borrow_mut().push((request.method, body));
            Ok(HttpResponse {
                status: self.status,
                reason: self.reason.to_string(),
                version: "HTTP/1.1".to_string(),
                headers: vec![("content-type".to_string(), "text/plain".to_string())],
                body: Box::new(Cursor::new(self.body.clone())),
            })
        }
    }

    #[test]
    fn body_goes_to_out_only() {
        let client = CurlClient::new(CannedTransport::new(200, "OK", b"payload"));
        let (mut out, mut diag) = (Vec::new(), Vec::new());
        let outcome = client
            .execute(&Invocation::new("http://example.test/get"), &mut out, &mut diag)
            .unwrap();
        assert_eq!(out, b"payload");
        assert!(diag.is_empty());
        assert_eq!(outcome, Outcome { status: 200, bytes_written: 7 });
    }

    #[test]
    fn error_status_warns_and_still_streams() {
        let client = CurlClient::new(CannedTransport::new(404, "Not Found", b"nope"));
        let (mut out, mut diag) = (Vec::new(), Vec::new());
        let outcome = client
            .execute(&Invocation::new("http://example.test/missing"), &mut out, &mut diag)
            .unwrap();
        assert_eq!(outcome.status, 404);
        assert_eq!(out, b"nope");
        assert_eq!(
            String::from_utf8(diag).unwrap(),
            "Warning: Server returned status 404 Not Found\n"
        );
    }

    #[test]
    fn verbose_dumps_both_directions() {
        let client = CurlClient::new(CannedTransport::new(201, "Created", b"ok"));
        let inv = Invocation::new("http://example.test/post").data("hello").verbose(true);
        let (mut out, mut diag) = (Vec::new(), Vec::new());
        client.execute(&inv, &mut out, &mut diag).unwrap();

        let diag = String::from_utf8(diag).unwrap();
        assert!(diag.starts_with("> POST /post HTTP/1.1\n"));
        assert!(diag.contains("< HTTP/1.1 201 Created\n"));
        assert_eq!(out, b"ok");
        assert_eq!(
            client.transport().sent.borrow()[0],
            ("POST".to_string(), b"hello".to_vec())
        );
    }

    #[test]
    fn build_failure_never_reaches_transport() {
        let client = CurlClient::new(CannedTransport::new(200, "OK", b""));
        let inv = Invocation::new("http://example.test/").header("no colon here");
        let (mut out, mut diag) = (Vec::new(), Vec::new());
        let err = client.execute(&inv, &mut out, &mut diag).unwrap_err();
        assert!(matches!(err, CurlError::HeaderFormat(_)));
        assert!(client.transport().sent.borrow().is_empty());
        assert!(out.is_empty());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn copy_error_is_reported() {
        let err = copy_body(&mut FailingReader, &mut Vec::new()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
    }

    #[test]
    fn copy_handles_empty_and_large_bodies() {
        let mut out = Vec::new();
        assert_eq!(copy_body(&mut io::empty(), &mut out).unwrap(), 0);
        assert!(out.is_empty());

        let payload: Vec<u8> = (0..3 * 1024 * 1024 + 17).map(|i| (i % 251) as u8).collect();
        let mut out = Vec::new();
        let n = copy_body(&mut Cursor::new(payload.clone()), &mut out).unwrap();
        assert_eq!(n, payload.len() as u64);
        assert_eq!(out, payload);
    }
}
