use std::io::Write;

use axum::{
    body::{Body, Bytes},
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use flate2::{write::GzEncoder, Compression};
use futures::stream;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Chunk size used when streaming `/bytes/{n}`.
const CHUNK_SIZE: usize = 64 * 1024;

/// Plain text behind the compressed `/gzip` body.
pub const GZIP_TEXT: &str = "gzip-encoded payload\n";

/// What `/anything` saw of the request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Echo {
    /// All values of a header, in the order they were received.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/anything", any(echo))
        .route("/anything/{*rest}", any(echo))
        .route("/status/{code}", get(status))
        .route("/bytes/{n}", get(bytes))
        .route("/gzip", get(gzip))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn status(Path(code): Path<u16>) -> impl IntoResponse {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, format!("status {code}"))
}

/// Deterministic payload byte at offset `i`.
pub fn payload_byte(i: usize) -> u8 {
    (i % 251) as u8
}

async fn bytes(Path(n): Path<usize>) -> Body {
    let chunks = (0..n).step_by(CHUNK_SIZE).map(move |start| {
        let end = (start + CHUNK_SIZE).min(n);
        let chunk: Vec<u8> = (start..end).map(payload_byte).collect();
        Ok::<_, std::convert::Infallible>(Bytes::from(chunk))
    });
    Body::from_stream(stream::iter(chunks))
}

/// `GZIP_TEXT` compressed, labelled `Content-Encoding: gzip` whatever the
/// request asked for.
async fn gzip() -> Result<impl IntoResponse, StatusCode> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(GZIP_TEXT.as_bytes())
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let compressed = encoder
        .finish()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok((
        [
            (header::CONTENT_ENCODING, "gzip"),
            (header::CONTENT_TYPE, "text/plain"),
        ],
        compressed,
    ))
}
