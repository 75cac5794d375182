//! Data models for willow.camp.
//!
//! This module contains the domain models:
//! - Post (remote record owned by the willow.camp API)
//! - Ghost export documents (read-only import input)

pub mod ghost;
pub mod post;

pub use ghost::{GhostExport, GhostPost, GhostPostTag, GhostTag};
pub use post::Post;

use serde::{Deserialize, Deserializer};

/// Deserialize an identifier that may arrive as a JSON string or number.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
