//! The seam between the request pipeline and the network.

use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};

/// Sends one request and returns once the response headers have arrived.
///
/// Implementations must not treat HTTP error statuses as failures; only
/// transport-level problems are errors (`CurlError::Network`, or
/// `CurlError::RequestConstruction` when the request cannot be expressed on
/// the wire).
pub trait Transport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}
