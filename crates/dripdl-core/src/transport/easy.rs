//! libcurl-backed transport (blocking easy interface).

use super::parse::{parse_header_lines, parse_status_line};
use super::{Headers, Response, ResponseHead, Transport, TransportError};
use std::cell::Cell;
use std::io::{self, Write};
use std::str;
use std::time::Duration;
use url::Url;

/// Transport that resolves request paths against a base URL and performs each
/// request on a fresh curl easy handle. Runs in the current thread.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    base_url: Url,
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url).map_err(|e| TransportError::InvalidPath {
            path: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(3600),
        })
    }

    /// Connect timeout and whole-transfer timeout (archives can be large).
    pub fn with_timeouts(mut self, connect: Duration, total: Duration) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::InvalidPath {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    /// Performs one request. With `gate_errors`, body bytes of a response whose
    /// status is >= 400 are dropped instead of reaching `sink`.
    fn perform(
        &self,
        path: &str,
        headers: &Headers,
        body: Option<&[u8]>,
        sink: &mut dyn Write,
        gate_errors: bool,
    ) -> Result<ResponseHead, TransportError> {
        let url = self.resolve(path)?;

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        if let Some(body) = body {
            easy.post(true)?;
            easy.post_fields_copy(body)?;
        }

        let mut list = curl::easy::List::new();
        for (k, v) in headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !headers.is_empty() {
            easy.http_headers(list)?;
        }

        // Status of the response currently being received (updated per redirect hop).
        let status = Cell::new(0u32);
        let mut lines: Vec<String> = Vec::new();
        let mut sink_error: Option<io::Error> = None;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    let line = s.trim_end();
                    if let Some(code) = parse_status_line(line) {
                        status.set(code);
                    }
                    lines.push(line.to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                if gate_errors && status.get() >= 400 {
                    return Ok(data.len());
                }
                match sink.write_all(data) {
                    Ok(()) => Ok(data.len()),
                    Err(e) => {
                        sink_error = Some(e);
                        Ok(0) // abort transfer
                    }
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = sink_error {
            return Err(TransportError::Io(e));
        }
        performed?;

        let code = easy.response_code()?;
        tracing::debug!(url = %url, status = code, post = body.is_some(), "request completed");

        Ok(ResponseHead {
            status: code,
            headers: parse_header_lines(&lines),
        })
    }
}

impl Transport for CurlTransport {
    fn get(&mut self, path: &str, headers: &Headers) -> Result<Response, TransportError> {
        let mut body = Vec::new();
        let head = self.perform(path, headers, None, &mut body, false)?;
        Ok(Response { head, body })
    }

    fn post(
        &mut self,
        path: &str,
        body: &[u8],
        headers: &Headers,
    ) -> Result<Response, TransportError> {
        let mut out = Vec::new();
        let head = self.perform(path, headers, Some(body), &mut out, false)?;
        Ok(Response { head, body: out })
    }

    fn get_to(
        &mut self,
        path: &str,
        headers: &Headers,
        sink: &mut dyn Write,
    ) -> Result<ResponseHead, TransportError> {
        self.perform(path, headers, None, sink, true)
    }
}
