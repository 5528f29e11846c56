//! HTTP transport seam.
//!
//! The session, catalog and pipeline only depend on the [`Transport`] trait and
//! address the service by path. [`CurlTransport`] is the libcurl-backed
//! implementation used by the CLI; tests substitute scripted fakes.

mod easy;
mod parse;

pub use easy::CurlTransport;
pub use parse::cookie_from_set_cookie;

use std::io::Write;

/// Request headers as ordered `(name, value)` pairs.
pub type Headers = [(String, String)];

/// Status and headers of a response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u32,
    pub headers: Vec<(String, String)>,
}

impl ResponseHead {
    pub fn new(status: u32) -> Self {
        Self {
            status,
            headers: Vec::new(),
        }
    }

    /// Status 400 and above is a failure for every caller in this crate.
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// All values of header `name` (case-insensitive), in response order.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A fully buffered response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub head: ResponseHead,
    pub body: Vec<u8>,
}

impl Response {
    pub fn status(&self) -> u32 {
        self.head.status
    }
}

/// Failure to complete an HTTP exchange (no usable status).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid request path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },
}

/// Blocking request/response transport.
pub trait Transport {
    fn get(&mut self, path: &str, headers: &Headers) -> Result<Response, TransportError>;

    fn post(&mut self, path: &str, body: &[u8], headers: &Headers)
        -> Result<Response, TransportError>;

    /// GET streaming the body into `sink`.
    ///
    /// The body is only written to `sink` when the final status is below 400;
    /// error bodies are discarded. Binary-safe.
    fn get_to(
        &mut self,
        path: &str,
        headers: &Headers,
        sink: &mut dyn Write,
    ) -> Result<ResponseHead, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn get(&mut self, path: &str, headers: &Headers) -> Result<Response, TransportError> {
        (**self).get(path, headers)
    }

    fn post(
        &mut self,
        path: &str,
        body: &[u8],
        headers: &Headers,
    ) -> Result<Response, TransportError> {
        (**self).post(path, body, headers)
    }

    fn get_to(
        &mut self,
        path: &str,
        headers: &Headers,
        sink: &mut dyn Write,
    ) -> Result<ResponseHead, TransportError> {
        (**self).get_to(path, headers, sink)
    }
}
