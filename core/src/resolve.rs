//! Maps a navigation context to the post fetch it needs.
//!
//! # Design
//! A route either carries a category id, an author id, a search term, or
//! nothing; exactly one `PostQuery` applies, chosen in that order. Resolution
//! must never abort navigation: whatever goes wrong underneath (transport,
//! status, parse), `complete` logs the normalized error and hands the view an
//! empty list so it renders a "no results" state instead of an error page.

use crate::client::BlogClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::PostQuery;
use crate::types::{Id, Post};

/// The parts of the current navigation state the resolver looks at.
#[derive(Debug, Clone, Default)]
pub struct RouteContext {
    /// Category id from the route path, e.g. `/category/3`.
    pub category_id: Option<Id>,
    /// Author id from the route path, e.g. `/user/12`.
    pub author_id: Option<Id>,
    /// The `q` query parameter, possibly empty.
    pub search: Option<String>,
}

impl RouteContext {
    /// Dispatch policy: category wins over author, author over search, and a
    /// blank search term means no search at all.
    pub fn post_query(&self) -> PostQuery {
        if let Some(id) = &self.category_id {
            return PostQuery::ByCategory(id.clone());
        }
        if let Some(id) = &self.author_id {
            return PostQuery::ByAuthor(id.clone());
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => PostQuery::Search(term.to_string()),
            _ => PostQuery::Latest,
        }
    }
}

/// Turns a navigation context into the data a posts view renders.
#[derive(Debug, Clone)]
pub struct PostsResolver {
    client: BlogClient,
}

impl PostsResolver {
    pub fn new(client: BlogClient) -> Self {
        Self { client }
    }

    /// Choose the fetch for `route` and build its request.
    ///
    /// The returned query must be passed back to
    /// [`complete`](PostsResolver::complete) with the outcome of executing
    /// the request.
    pub fn resolve(&self, route: &RouteContext, now_ms: i64) -> (PostQuery, HttpRequest) {
        let query = route.post_query();
        let request = self.client.build_posts(&query, now_ms);
        (query, request)
    }

    /// Finish a resolution with the outcome of the HTTP round trip.
    ///
    /// Failures are downgraded to an empty list; the normalized error is
    /// logged and goes no further.
    pub fn complete(
        &self,
        query: &PostQuery,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Vec<Post> {
        match outcome.and_then(|response| self.client.parse_posts(query, response)) {
            Ok(posts) => posts,
            Err(err) => {
                log::error!("posts fetch for {query:?} failed: {err}");
                Vec::new()
            }
        }
    }
}
