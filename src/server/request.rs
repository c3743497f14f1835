//! Transport-independent view of an inbound request

use crate::session::RequestCookies;

#[derive(Debug, Clone, Default)]
pub struct Inbound {
    pub method: String,
    /// Path plus optional query, as sent on the request line
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl Inbound {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn from_tiny(request: &tiny_http::Request) -> Self {
        Self {
            method: request.method().to_string(),
            url: request.url().to_string(),
            headers: request
                .headers()
                .iter()
                .map(|h| (h.field.to_string(), h.value.to_string()))
                .collect(),
        }
    }

    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or(self.url.as_str())
    }

    pub fn query(&self) -> Option<&str> {
        self.url.split_once('?').map(|(_, query)| query)
    }

    pub fn header_pairs(&self) -> Vec<(&str, &str)> {
        self.headers
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .collect()
    }

    pub fn cookies(&self) -> RequestCookies {
        RequestCookies::parse(
            self.headers
                .iter()
                .filter(|(n, _)| n.eq_ignore_ascii_case("cookie"))
                .map(|(_, v)| v.as_str()),
        )
    }
}
