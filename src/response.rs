//! Response sink handed to every handler.
//!
//! Handlers write into a buffer; the transport turns it into a real response
//! once the chain has finished.

use std::io;

use axum::body::Body;
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::Error;

/// Buffered status, headers and body.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status to send, `200 OK` unless a handler set one.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Set a header, replacing any previous value.
    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// True once a handler set a status or wrote body bytes.
    pub fn is_written(&self) -> bool {
        self.status.is_some() || !self.body.is_empty()
    }

    /// Response for a request whose chain failed with `err`.
    ///
    /// Headers set by handlers are kept. The status is the one a handler set
    /// explicitly, otherwise the error's. The body is what handlers wrote,
    /// otherwise the error's rendering.
    pub fn into_error_response(self, err: Error) -> Response {
        let status = self.status.unwrap_or_else(|| err.status_code());
        let mut response = if self.body.is_empty() {
            err.into_response()
        } else {
            Response::new(Body::from(self.body))
        };
        *response.status_mut() = status;
        response.headers_mut().extend(self.headers);
        response
    }
}

impl io::Write for ResponseWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl IntoResponse for ResponseWriter {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}
