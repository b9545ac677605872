//! Stateless HTTP request builder and response parser for the blog API.
//!
//! # Design
//! `BlogClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`. The
//! host executes the actual round trip, keeping the core deterministic and
//! free of I/O dependencies. For the same reason "now" is an explicit
//! argument rather than a clock read; hosts pass [`crate::now_ms`].

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{filter_by_category, PostQuery};
use crate::types::{Id, LikesPatch, Post};

/// Synchronous, stateless client for the blog backend.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. Each build/parse pair corresponds to exactly one
/// request; there is no retry, caching, or deduplication.
#[derive(Debug, Clone)]
pub struct BlogClient {
    base_url: String,
}

impl BlogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Request the list of published posts selected by `query`, newest first.
    pub fn build_posts(&self, query: &PostQuery, now_ms: i64) -> HttpRequest {
        HttpRequest::get(format!(
            "{}/posts?{}",
            self.base_url,
            query.query_string(now_ms)
        ))
    }

    /// Parse a post-list response for `query`.
    ///
    /// The backend already applied the date filter and descending sort; for
    /// `ByCategory` the relational filter the backend cannot express is
    /// applied here, preserving the server's ordering.
    pub fn parse_posts(
        &self,
        query: &PostQuery,
        response: HttpResponse,
    ) -> Result<Vec<Post>, ApiError> {
        check_status(&response, 200)?;
        let posts: Vec<Post> = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(match query {
            PostQuery::ByCategory(id) => filter_by_category(posts, id),
            _ => posts,
        })
    }

    pub fn build_post_details(&self, id: &Id) -> HttpRequest {
        HttpRequest::get(format!("{}/posts/{id}", self.base_url))
    }

    /// Parse a single-post response.
    ///
    /// Yields `None` when the fetched post is not yet published: the backend
    /// returns drafts by id, but a direct link to a future-dated post must
    /// behave as if the post does not exist.
    pub fn parse_post_details(
        &self,
        response: HttpResponse,
        now_ms: i64,
    ) -> Result<Option<Post>, ApiError> {
        check_status(&response, 200)?;
        let post: Post = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(post.is_published(now_ms).then_some(post))
    }

    pub fn build_create_post(&self, post: &Post) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(post).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(
            HttpMethod::Post,
            format!("{}/posts", self.base_url),
            body,
        ))
    }

    /// The server's canonical representation, including its assigned id.
    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn build_edit_post(&self, post: &Post) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(post).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(
            HttpMethod::Put,
            format!("{}/posts/{}", self.base_url, post.id),
            body,
        ))
    }

    pub fn parse_edit_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Partial update of only the likes field.
    pub fn build_patch_likes(&self, id: &Id, likes: &[Id]) -> Result<HttpRequest, ApiError> {
        let patch = LikesPatch {
            likes: likes.to_vec(),
        };
        let body =
            serde_json::to_string(&patch).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(
            HttpMethod::Patch,
            format!("{}/posts/{id}", self.base_url),
            body,
        ))
    }

    pub fn parse_patch_likes(&self, response: HttpResponse) -> Result<Post, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ApiError::from_response(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_500_000_000_000;

    fn client() -> BlogClient {
        BlogClient::new("http://localhost:3000")
    }

    #[test]
    fn build_posts_latest_produces_correct_request() {
        let req = client().build_posts(&PostQuery::Latest, NOW);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            "http://localhost:3000/posts?publicationDate_lte=1500000000000&_sort=publicationDate&_order=DESC"
        );
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_posts_search_encodes_the_term() {
        let req = client().build_posts(&PostQuery::Search("café & tea".to_string()), NOW);
        assert!(req.path.contains("q=caf%C3%A9%20%26%20tea&"), "{}", req.path);
    }

    #[test]
    fn build_posts_by_author_carries_the_author_filter() {
        let req = client().build_posts(&PostQuery::ByAuthor(Id::from("12")), NOW);
        assert!(req.path.contains("author.id=12&"), "{}", req.path);
    }

    #[test]
    fn build_posts_by_category_is_unconstrained() {
        let req = client().build_posts(&PostQuery::ByCategory(Id::from("3")), NOW);
        assert_eq!(req.path, client().build_posts(&PostQuery::Latest, NOW).path);
    }

    #[test]
    fn parse_posts_success() {
        let response = HttpResponse::new(
            200,
            r#"[{"id":1,"title":"First","publicationDate":100}]"#,
        );
        let posts = client().parse_posts(&PostQuery::Latest, response).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "First");
    }

    #[test]
    fn parse_posts_by_category_filters_client_side() {
        let response = HttpResponse::new(
            200,
            r#"[
                {"id":1,"title":"kept","categories":[{"id":"3"}]},
                {"id":2,"title":"dropped","categories":[{"id":4}]}
            ]"#,
        );
        let posts = client()
            .parse_posts(&PostQuery::ByCategory(Id::from(3u64)), response)
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "kept");
    }

    #[test]
    fn parse_posts_bad_json() {
        let err = client()
            .parse_posts(&PostQuery::Latest, HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_posts_server_error_carries_detail() {
        let err = client()
            .parse_posts(&PostQuery::Latest, HttpResponse::new(500, r#"{"error":"boom"}"#))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("500") && msg.contains("boom"), "{msg}");
    }

    #[test]
    fn build_post_details_produces_correct_request() {
        let req = client().build_post_details(&Id::from("7"));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/posts/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_post_details_published() {
        let response = HttpResponse::new(200, r#"{"id":7,"publicationDate":100}"#);
        let post = client().parse_post_details(response, NOW).unwrap();
        assert_eq!(post.unwrap().id, Id::from("7"));
    }

    #[test]
    fn parse_post_details_future_dated_is_none() {
        let body = format!(r#"{{"id":7,"publicationDate":{}}}"#, NOW + 1_000);
        let post = client()
            .parse_post_details(HttpResponse::new(200, body), NOW)
            .unwrap();
        assert!(post.is_none());
    }

    #[test]
    fn parse_post_details_not_found() {
        let err = client()
            .parse_post_details(HttpResponse::new(404, ""), NOW)
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn build_create_post_produces_correct_request() {
        let post = Post {
            title: "New".to_string(),
            ..Post::default()
        };
        let req = client().build_create_post(&post).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/posts");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "New");
    }

    #[test]
    fn parse_create_post_expects_201() {
        let err = client()
            .parse_create_post(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));

        let created = client()
            .parse_create_post(HttpResponse::new(201, r#"{"id":9,"title":"New"}"#))
            .unwrap();
        assert_eq!(created.id, Id::from("9"));
    }

    #[test]
    fn build_edit_post_targets_the_post_id() {
        let post = Post {
            id: Id::from("9"),
            title: "Edited".to_string(),
            ..Post::default()
        };
        let req = client().build_edit_post(&post).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/posts/9");
    }

    #[test]
    fn build_patch_likes_sends_only_the_likes_field() {
        let req = client()
            .build_patch_likes(&Id::from("9"), &[Id::from("1"), Id::from("2")])
            .unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, "http://localhost:3000/posts/9");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"likes": ["1", "2"]}));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = BlogClient::new("http://localhost:3000/");
        let req = client.build_posts(&PostQuery::Latest, NOW);
        assert!(req.path.starts_with("http://localhost:3000/posts?"));
    }
}
