//! Model objects for the blog API.
//!
//! # Design
//! Everything here is a read-only value object constructed by deserializing a
//! backend response. The backend is schema-free (json-server), so every field
//! is defaulted: deserializing `{}` yields a usable, fully-defaulted value
//! instead of an error. Identifiers arrive as JSON numbers or strings
//! interchangeably; `Id` normalizes both to a canonical string so `3` and
//! `"3"` compare equal.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A backend identifier, normalized to its string form.
///
/// json-server assigns numeric ids to records it creates but happily stores
/// string ids seeded by hand, and nested references (category ids, liker ids)
/// mix the two. All comparisons go through the normalized string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(String);

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the default id of a record that never came from the backend.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Id {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for Id {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = Id;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or numeric identifier")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Id, E> {
                Ok(Id(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Id, E> {
                Ok(Id(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Id, E> {
                Ok(Id(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// A post's author, referenced (not owned) by `Post`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub email: String,
}

/// A category label. Immutable from the client's perspective.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub name: String,
}

/// A blog post as served by the backend.
///
/// `publication_date` is an epoch timestamp in milliseconds. A post is
/// published iff `publication_date <= now`; unpublished posts must never
/// reach a caller that did not explicitly ask for drafts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub publication_date: i64,
    #[serde(default)]
    pub author: User,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub likes: Vec<Id>,
}

impl Post {
    pub fn is_published(&self, now_ms: i64) -> bool {
        self.publication_date <= now_ms
    }

    /// Normalized membership test over the post's category references.
    pub fn has_category(&self, category_id: &Id) -> bool {
        self.categories.iter().any(|c| c.id == *category_id)
    }
}

/// Body of a likes-only partial update: `{"likes": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikesPatch {
    pub likes: Vec<Id>,
}
