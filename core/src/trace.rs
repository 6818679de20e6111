//! Verbose request/response dumps for the diagnostic stream.
//!
//! Request lines are prefixed with `> ` and response lines with `< `. The
//! request dump includes its body. A file body is read in full for the dump
//! and replaced by the bytes read, since pipes and other streams cannot be
//! rewound. Any failure here is a `TraceDump` error and aborts the run.

use std::io::{self, Read, Write};

use crate::error::{CurlError, Result};
use crate::http::{HttpRequest, HttpResponse, RequestBody};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Write the outgoing request line, headers and body.
pub fn dump_request(request: &mut HttpRequest, out: &mut dyn Write) -> Result<()> {
    write_request(request, out).map_err(CurlError::TraceDump)
}

/// Write the response status line and headers. The body is left untouched.
pub fn dump_response(response: &HttpResponse, out: &mut dyn Write) -> Result<()> {
    write_response(response, out).map_err(CurlError::TraceDump)
}

fn write_request(request: &mut HttpRequest, out: &mut dyn Write) -> io::Result<()> {
    if let Some(RequestBody::File { file, .. }) = request.body.as_mut() {
        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        request.body = Some(RequestBody::Bytes(content));
    }

    writeln!(
        out,
        "> {} {} {HTTP_VERSION}",
        request.method,
        request.request_target()
    )?;
    if request.header("host").is_none() {
        writeln!(out, "> Host: {}", request.host())?;
    }
    if request.header("content-length").is_none() {
        if let Some(len) = request.body.as_ref().and_then(RequestBody::known_length) {
            writeln!(out, "> Content-Length: {len}")?;
        }
    }
    for (key, value) in &request.headers {
        writeln!(out, "> {key}: {value}")?;
    }
    writeln!(out, ">")?;

    if let Some(RequestBody::Bytes(content)) = &request.body {
        out.write_all(content)?;
        if !content.is_empty() && !content.ends_with(b"\n") {
            writeln!(out)?;
        }
    }
    out.flush()
}

fn write_response(response: &HttpResponse, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "< {} {}", response.version, response.status_text())?;
    for (key, value) in &response.headers {
        writeln!(out, "< {key}: {value}")?;
    }
    writeln!(out, "<")?;
    out.flush()
}
