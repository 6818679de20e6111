//! ureq-backed `Transport`.
//!
//! # Design
//! The agent is built once per run with HTTP status errors turned off, so
//! 4xx/5xx responses come back as data and the core decides what they mean.
//! Header names and values are checked before anything is sent, so a header
//! the wire cannot carry is a request construction error rather than a
//! network one.

use std::time::Duration;

use curl_core::{CurlError, HttpRequest, HttpResponse, RequestBody, Result, Transport};
use tracing::debug;
use ureq::http::{self, header, HeaderName, HeaderValue};
use ureq::{Agent, Body, SendBody};

/// Transport settings that do not come from the request itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Overall limit for the exchange. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Sent when the caller did not pass a `User-Agent` header.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format!("simple-curl/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Sends requests with a ureq `Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    user_agent: String,
}

impl UreqTransport {
    pub fn new(config: TransportConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self {
            agent,
            user_agent: config.user_agent,
        }
    }

    /// Headers to put on the wire: the caller's, then defaults they did not
    /// override.
    fn wire_headers(&self, request: &HttpRequest) -> Result<Vec<(HeaderName, HeaderValue)>> {
        let mut headers = request
            .headers
            .iter()
            .map(|(key, value)| header_pair(key, value))
            .collect::<Result<Vec<_>>>()?;

        if request.header("user-agent").is_none() {
            headers.push((header::USER_AGENT, header_value(&self.user_agent)?));
        }
        if request.header("content-length").is_none() {
            if let Some(len) = request.body.as_ref().and_then(RequestBody::known_length) {
                headers.push((header::CONTENT_LENGTH, HeaderValue::from(len)));
            }
        }
        Ok(headers)
    }

    fn run(&self, request: http::Request<SendBody<'static>>) -> Result<http::Response<Body>> {
        self.agent.run(request).map_err(CurlError::network)
    }

    /// ureq refuses a body on methods that are not expected to carry one
    /// unless asked explicitly, which only its typed builders can do.
    fn send_forced(
        &self,
        method: &str,
        url: &str,
        headers: Vec<(HeaderName, HeaderValue)>,
        body: SendBody<'static>,
    ) -> Result<http::Response<Body>> {
        let mut builder = match method {
            "GET" => self.agent.get(url),
            "HEAD" => self.agent.head(url),
            "DELETE" => self.agent.delete(url),
            "OPTIONS" => self.agent.options(url),
            "TRACE" => self.agent.trace(url),
            "CONNECT" => self.agent.connect(url),
            other => return Err(CurlError::construction(format!("cannot send a body with {other}"))),
        };
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        builder.force_send_body().send(body).map_err(CurlError::network)
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let headers = self.wire_headers(&request)?;
        let HttpRequest {
            method, url, body, ..
        } = request;

        let response = match body {
            Some(body) if forbids_body(&method) => {
                debug!(%method, "forcing request body");
                let body = SendBody::from_owned_reader(body.into_reader());
                self.send_forced(&method, url.as_str(), headers, body)?
            }
            body => {
                let mut builder = http::Request::builder()
                    .method(method.as_str())
                    .uri(url.as_str());
                for (name, value) in headers {
                    builder = builder.header(name, value);
                }
                let body = match body {
                    Some(body) => SendBody::from_owned_reader(body.into_reader()),
                    None => SendBody::none(),
                };
                let request = builder.body(body).map_err(|e| CurlError::RequestConstruction {
                    message: e.to_string(),
                    source: Some(Box::new(e)),
                })?;
                self.run(request)?
            }
        };

        Ok(into_response(response))
    }
}

fn forbids_body(method: &str) -> bool {
    matches!(
        method,
        "GET" | "HEAD" | "DELETE" | "OPTIONS" | "TRACE" | "CONNECT"
    )
}

fn header_pair(key: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| CurlError::RequestConstruction {
        message: format!("invalid header name '{key}'"),
        source: Some(Box::new(e)),
    })?;
    Ok((name, header_value(value)?))
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| CurlError::RequestConstruction {
        message: format!("invalid header value '{value}'"),
        source: Some(Box::new(e)),
    })
}

fn into_response(response: http::Response<Body>) -> HttpResponse {
    let status = response.status();
    let version = format!("{:?}", response.version());
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    HttpResponse {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
        version,
        headers,
        body: Box::new(response.into_body().into_reader()),
    }
}
