//! Synchronous API client core for a json-server-style blog backend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The host executes the actual
//! HTTP round trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `BlogClient` is stateless — it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit and cancellation is
//!   the host's business: a superseded request is simply never parsed.
//! - "Now" is an explicit argument everywhere publication filtering happens;
//!   [`now_ms`] is the wall-clock convenience for hosts.
//! - `PostsResolver` maps a navigation context onto the one fetch it needs
//!   and downgrades every failure to an empty list, so a view always renders.

pub mod client;
pub mod error;
pub mod http;
pub mod query;
pub mod resolve;
pub mod types;

pub use client::BlogClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{filter_by_category, PostQuery};
pub use resolve::{PostsResolver, RouteContext};
pub use types::{Category, Id, LikesPatch, Post, User};

/// Current wall-clock time as epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
