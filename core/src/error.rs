//! Error types for the blog API client.
//!
//! # Design
//! Every transport- or protocol-level failure is normalized into `ApiError`,
//! whose `Display` form is the one human-readable message surfaced to
//! callers. `NotFound` gets a dedicated variant because callers frequently
//! distinguish "the post does not exist" from "the server misbehaved"; all
//! other non-2xx responses land in `Http` with the status code, its reason
//! phrase, and whatever error detail the server supplied.

use std::fmt;

use crate::http::HttpResponse;

/// Errors returned by `BlogClient` build and parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The round trip itself failed (DNS, refused connection, timeout).
    /// Produced by the host and fed back into the core for normalization.
    Transport(String),

    /// The server returned 404 — the requested post does not exist.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    Http {
        status: u16,
        reason: &'static str,
        detail: String,
    },

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl ApiError {
    /// Normalize a non-2xx response into an error.
    ///
    /// When the body is a JSON object with an `error` field, that field is
    /// the detail (json-server's error shape); otherwise the raw body is
    /// carried verbatim so nothing the server said is lost.
    pub fn from_response(response: &HttpResponse) -> Self {
        if response.status == 404 {
            return ApiError::NotFound;
        }
        let detail = serde_json::from_str::<serde_json::Value>(&response.body)
            .ok()
            .and_then(|v| v.get("error").cloned())
            .map(|e| match e {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or_else(|| response.body.clone());
        ApiError::Http {
            status: response.status,
            reason: reason_phrase(response.status),
            detail,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport failure: {msg}"),
            ApiError::NotFound => write!(f, "post not found"),
            ApiError::Http {
                status,
                reason,
                detail,
            } => {
                write!(f, "HTTP {status} {reason}: {detail}")
            }
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Canonical reason phrase for the statuses this backend actually emits.
fn reason_phrase(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        405 => "Method Not Allowed",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_error_body_becomes_the_detail() {
        let err = ApiError::from_response(&HttpResponse::new(500, r#"{"error":"boom"}"#));
        let msg = err.to_string();
        assert!(msg.contains("500"), "{msg}");
        assert!(msg.contains("Internal Server Error"), "{msg}");
        assert!(msg.contains("boom"), "{msg}");
    }

    #[test]
    fn unstructured_body_is_carried_verbatim() {
        let err = ApiError::from_response(&HttpResponse::new(502, "upstream exploded"));
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway: upstream exploded");
    }

    #[test]
    fn non_string_error_detail_is_stringified() {
        let err = ApiError::from_response(&HttpResponse::new(500, r#"{"error":{"code":12}}"#));
        assert!(err.to_string().contains(r#"{"code":12}"#));
    }

    #[test]
    fn status_404_maps_to_not_found() {
        let err = ApiError::from_response(&HttpResponse::new(404, ""));
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn unknown_status_gets_an_empty_reason() {
        let err = ApiError::from_response(&HttpResponse::new(599, "odd"));
        assert_eq!(err.to_string(), "HTTP 599 : odd");
    }
}
