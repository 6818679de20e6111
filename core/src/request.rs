//! Turns an `Invocation` into a single `HttpRequest`.
//!
//! Stages run in a fixed order and stop at the first failure: URL presence,
//! method, body source, URL and method validity, then headers. Nothing here
//! touches the network, so any error from this module means no request was
//! sent.

use std::fs::File;
use std::path::PathBuf;

use tracing::{debug, trace};
use url::Url;

use crate::error::{CurlError, Result};
use crate::http::{Header, HttpRequest, RequestBody};
use crate::types::{Invocation, MethodFlag, DEFAULT_METHOD};

/// Pick the effective method.
///
/// Supplying data implies `POST` unless the caller chose a method. An
/// explicitly empty method falls back to `GET`.
pub fn resolve_method(method: &MethodFlag, has_body: bool) -> String {
    if has_body && !method.is_explicit() {
        return "POST".to_string();
    }
    if method.value().is_empty() {
        return DEFAULT_METHOD.to_string();
    }
    method.value().to_string()
}

/// Resolve the body spec: empty is no body, `@path` opens a file, anything
/// else is sent as-is.
pub fn resolve_body(spec: &str) -> Result<Option<RequestBody>> {
    if let Some(path) = spec.strip_prefix('@') {
        let path = PathBuf::from(path);
        let file = File::open(&path).map_err(|source| CurlError::FileOpen {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "request body from file");
        return Ok(Some(RequestBody::File { path, file }));
    }
    if spec.is_empty() {
        return Ok(None);
    }
    Ok(Some(RequestBody::Bytes(spec.as_bytes().to_vec())))
}

/// Split one `Key: Value` entry on its first colon and trim both halves.
pub fn parse_header(raw: &str) -> Result<Header> {
    let (key, value) = raw
        .split_once(':')
        .ok_or_else(|| CurlError::HeaderFormat(raw.to_string()))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

/// Parse every entry, keeping order and duplicates. One bad entry rejects
/// the whole set.
pub fn parse_headers<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Header>> {
    raw.iter().map(|h| parse_header(h.as_ref())).collect()
}

/// Build the request for one invocation.
pub fn build_request(invocation: &Invocation) -> Result<HttpRequest> {
    if invocation.url.is_empty() {
        return Err(CurlError::MissingUrl);
    }

    let method = resolve_method(&invocation.method, !invocation.data.is_empty());
    let body = resolve_body(&invocation.data)?;
    validate_method(&method)?;
    let url = parse_url(&invocation.url)?;
    let headers = parse_headers(invocation.headers.as_slice())?;

    debug!(%method, %url, headers = headers.len(), body = body.is_some(), "request built");
    for (key, value) in &headers {
        trace!(%key, %value, "header attached");
    }

    Ok(HttpRequest {
        method,
        url,
        headers,
        body,
    })
}

fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| CurlError::RequestConstruction {
        message: format!("invalid URL '{raw}': {e}"),
        source: Some(Box::new(e)),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(CurlError::construction(format!(
            "unsupported protocol scheme '{scheme}'"
        ))),
    }
}

/// Methods are HTTP tokens (RFC 9110 section 5.6.2).
fn validate_method(method: &str) -> Result<()> {
    if method.bytes().all(is_tchar) {
        Ok(())
    } else {
        Err(CurlError::construction(format!("invalid method {method:?}")))
    }
}

fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}
