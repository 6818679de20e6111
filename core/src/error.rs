//! Error types for the request pipeline.
//!
//! # Design
//! Every variant is terminal: nothing is retried or recovered internally. The
//! variants follow the pipeline stages so the caller can tell "the request was
//! never sent" (`MissingUrl`, `HeaderFormat`, `FileOpen`,
//! `RequestConstruction`) apart from "the exchange failed" (`Network`,
//! `ResponseCopy`). An HTTP error status is not an error here at all.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CurlError>;

/// Errors that abort an invocation.
#[derive(Debug, Error)]
pub enum CurlError {
    /// No URL was given.
    #[error("error: you must provide a URL")]
    MissingUrl,

    /// A `-H` entry had no `:` separator.
    #[error("header '{0}' has wrong format, expect 'Key: Value'")]
    HeaderFormat(String),

    /// The file named by an `@path` body could not be opened.
    #[error("failed to open file '{}': {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The method, URL or a header could not form a valid request.
    #[error("failed to create request: {message}")]
    RequestConstruction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Connect, DNS, timeout or other transport failure.
    #[error("request failed: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Reading the response body or writing it out failed.
    #[error("failed to read response: {0}")]
    ResponseCopy(#[source] io::Error),

    /// The verbose request/response dump could not be produced.
    #[error("debug dump failed: {0}")]
    TraceDump(#[source] io::Error),
}

impl CurlError {
    /// Build a `RequestConstruction` error without an underlying cause.
    pub fn construction(message: impl Into<String>) -> Self {
        CurlError::RequestConstruction {
            message: message.into(),
            source: None,
        }
    }

    /// Build a `Network` error wrapping the transport's error.
    pub fn network<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CurlError::Network {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Process exit code for this error.
    ///
    /// Every failure exits with 1; a completed exchange exits with 0 even when
    /// the server answered with an error status.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
