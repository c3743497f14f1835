//! Transport-independent responses

use std::io::Cursor;

use tiny_http::{Header, Response};
use tracing::warn;

/// A response built by a handler, converted to `tiny_http` at the edge
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Plain-text message, newline terminated
    pub fn text(status: u16, message: &str) -> Self {
        Self::new(status, format!("{message}\n"))
            .with_header("Content-Type", "text/plain; charset=utf-8")
            .with_header("X-Content-Type-Options", "nosniff")
    }

    pub fn html(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body).with_header("Content-Type", "text/html; charset=utf-8")
    }

    /// 307 with an empty body
    pub fn redirect(location: &str) -> Self {
        Self::new(307, Vec::new()).with_header("Location", location)
    }

    pub fn not_found() -> Self {
        Self::text(404, "404 page not found")
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header called `name`, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body).with_status_code(self.status);
        for (name, value) in &self.headers {
            match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
                Ok(header) => response.add_header(header),
                Err(()) => warn!("[earthwalker:http] Dropping unencodable header {}", name),
            }
        }
        response
    }
}
