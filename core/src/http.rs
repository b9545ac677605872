//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and parses `HttpResponse` values without ever touching the network;
//! the host executes the actual round trip. That keeps the core deterministic
//! and lets cancellation stay with the host: abandoning an in-flight request
//! (say, a superseded search) is simply never calling `parse_*` on it.

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
}

/// An HTTP request described as plain data.
///
/// Built by `BlogClient::build_*` methods; executed by the host.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// A bodyless GET of `path`.
    pub fn get(path: String) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    /// A request carrying a JSON body and the matching content-type header.
    pub fn json(method: HttpMethod, path: String, body: String) -> Self {
        Self {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the host after executing an `HttpRequest`, then handed to
/// `BlogClient::parse_*` for status interpretation and deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Shorthand used throughout the tests; headers are irrelevant to parsing.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_request_has_no_body_or_headers() {
        let req = HttpRequest::get("http://x/posts".to_string());
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn json_request_carries_content_type() {
        let req = HttpRequest::json(HttpMethod::Patch, "http://x/posts/1".to_string(), "{}".to_string());
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(req.body.as_deref(), Some("{}"));
    }
}
