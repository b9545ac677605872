//! Logical post queries and their json-server query strings.
//!
//! # Design
//! The backend sorts and date-filters server-side (`publicationDate_lte`,
//! `_sort`, `_order`) but cannot filter on a nested collection, so a
//! category query fetches the unconstrained base list and the client filters
//! afterwards. That post-filter lives here as a pure function over an
//! already-fetched sequence, independent of any transport, so it is testable
//! without network mocking.

use crate::types::{Id, Post};

/// One logical way of asking the backend for a list of posts.
///
/// Every variant carries the same base constraints: published posts only
/// (`publicationDate <= now`), newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostQuery {
    /// All published posts.
    Latest,
    /// Free-text search, matched server-side against every field.
    Search(String),
    /// Posts whose author has the given id.
    ByAuthor(Id),
    /// Posts referencing the given category. Filtered client-side.
    ByCategory(Id),
}

impl PostQuery {
    /// Render the json-server query string for this query at time `now_ms`.
    ///
    /// `ByCategory` intentionally renders the unconstrained base query; the
    /// relational filter happens after the fetch via [`filter_by_category`].
    pub fn query_string(&self, now_ms: i64) -> String {
        let base = format!("publicationDate_lte={now_ms}&_sort=publicationDate&_order=DESC");
        match self {
            PostQuery::Latest | PostQuery::ByCategory(_) => base,
            PostQuery::Search(term) => format!("q={}&{base}", urlencoding::encode(term)),
            PostQuery::ByAuthor(id) => format!("author.id={id}&{base}"),
        }
    }
}

/// Keep only the posts referencing `category_id`, preserving their order.
///
/// Comparison goes through `Id`, so a backend that stores `{"id": 3}` on one
/// post and `{"id": "3"}` on another treats both as the same category.
pub fn filter_by_category(posts: Vec<Post>, category_id: &Id) -> Vec<Post> {
    posts
        .into_iter()
        .filter(|post| post.has_category(category_id))
        .collect()
}
