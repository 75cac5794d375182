//! Post model for willow.camp.
//!
//! Posts are owned by the remote store. The client reads them and submits
//! new Markdown bodies; every other field is managed by the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::string_or_number;

/// A post as returned by the willow.camp API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned identifier (numeric or string on the wire)
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,

    /// URL-safe unique key, shared with the local file stem
    pub slug: String,

    /// Title derived by the server from the Markdown frontmatter
    #[serde(default)]
    pub title: Option<String>,

    /// Full Markdown body including frontmatter
    #[serde(default)]
    pub markdown: Option<String>,

    #[serde(default)]
    pub published: Option<bool>,

    #[serde(default)]
    pub published_at: Option<String>,

    #[serde(default, rename = "tag_list", alias = "tags")]
    pub tags: Vec<String>,

    /// Last modification time as reported by the server (RFC 3339)
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Post {
    /// Parse `updated_at` into a UTC timestamp.
    ///
    /// Returns `None` when the field is absent or not valid RFC 3339.
    #[must_use]
    pub fn updated_at_timestamp(&self) -> Option<DateTime<Utc>> {
        self.updated_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whether the server reports this post as published.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.published.unwrap_or(false)
    }
}
