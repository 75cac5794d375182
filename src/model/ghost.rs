//! Ghost export document model.
//!
//! A Ghost export is read once per import, never mutated. The layout is
//! `{"db": [{"data": {"posts": [...], "tags": [...], "posts_tags": [...]}}]}`.
//! Only the first `db` entry is used.

use serde::Deserialize;

use super::string_or_number;

/// Status value that marks a Ghost post as published.
pub const PUBLISHED_STATUS: &str = "published";

/// Top-level Ghost export document.
#[derive(Debug, Clone, Deserialize)]
pub struct GhostExport {
    pub db: Vec<GhostDatabase>,
}

/// One database dump inside an export.
#[derive(Debug, Clone, Deserialize)]
pub struct GhostDatabase {
    pub data: GhostData,
}

/// The collections the importer reads.
#[derive(Debug, Clone, Deserialize)]
pub struct GhostData {
    pub posts: Vec<GhostPost>,

    #[serde(default)]
    pub tags: Vec<GhostTag>,

    #[serde(default)]
    pub posts_tags: Vec<GhostPostTag>,
}

/// A post entry in a Ghost export.
#[derive(Debug, Clone, Deserialize)]
pub struct GhostPost {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub slug: String,
    pub status: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub plaintext: Option<String>,
    #[serde(default)]
    pub feature_image: Option<String>,
    #[serde(default)]
    pub custom_excerpt: Option<String>,
}

/// A tag entry in a Ghost export.
#[derive(Debug, Clone, Deserialize)]
pub struct GhostTag {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

/// A post/tag relation row.
#[derive(Debug, Clone, Deserialize)]
pub struct GhostPostTag {
    #[serde(deserialize_with = "string_or_number")]
    pub post_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub tag_id: String,
}

impl GhostExport {
    /// The data collections of the first database dump, if any.
    #[must_use]
    pub fn data(&self) -> Option<&GhostData> {
        self.db.first().map(|db| &db.data)
    }
}

impl GhostData {
    /// Posts whose raw status flag is `published`, in export order.
    ///
    /// This filter ignores `published_at`; see [`GhostPost::is_published`].
    pub fn published_posts(&self) -> impl Iterator<Item = &GhostPost> {
        self.posts.iter().filter(|p| p.status == PUBLISHED_STATUS)
    }

    /// Tag names for a post, in relation-table order.
    ///
    /// Relation rows whose tag id does not resolve are skipped.
    #[must_use]
    pub fn tags_for(&self, post_id: &str) -> Vec<String> {
        self.posts_tags
            .iter()
            .filter(|rel| rel.post_id == post_id)
            .filter_map(|rel| self.tags.iter().find(|t| t.id == rel.tag_id))
            .map(|t| t.name.clone())
            .collect()
    }
}

impl GhostPost {
    /// Whether the emitted frontmatter should say `published: true`.
    ///
    /// Requires both the published status and a non-empty `published_at`.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == PUBLISHED_STATUS
            && self.published_at.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GhostExport {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_mixed_id_types() {
        let export = parse(
            r#"{"db": [{"data": {
                "posts": [{"id": 1, "title": "T", "slug": "t", "status": "published"}],
                "tags": [{"id": "7", "name": "rust"}],
                "posts_tags": [{"post_id": "1", "tag_id": 7}]
            }}]}"#,
        );
        let data = export.data().unwrap();
        assert_eq!(data.posts[0].id, "1");
        assert_eq!(data.tags_for("1"), vec!["rust"]);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let result: Result<GhostExport, _> = serde_json::from_str(
            r#"{"db": [{"data": {"posts": [{"id": 1, "title": "T", "status": "published"}]}}]}"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("slug"));
    }

    #[test]
    fn test_tags_keep_relation_order_and_skip_unresolved() {
        let export = parse(
            r#"{"db": [{"data": {
                "posts": [],
                "tags": [{"id": "1", "name": "alpha"}, {"id": "2", "name": "beta"}],
                "posts_tags": [
                    {"post_id": "p", "tag_id": "2"},
                    {"post_id": "p", "tag_id": "99"},
                    {"post_id": "other", "tag_id": "1"},
                    {"post_id": "p", "tag_id": "1"}
                ]
            }}]}"#,
        );
        assert_eq!(export.data().unwrap().tags_for("p"), vec!["beta", "alpha"]);
    }

    #[test]
    fn test_published_predicates_are_distinct() {
        let export = parse(
            r#"{"db": [{"data": {"posts": [
                {"id": 1, "title": "A", "slug": "a", "status": "published", "published_at": null},
                {"id": 2, "title": "B", "slug": "b", "status": "published", "published_at": "2025-05-02T12:00:00.000Z"},
                {"id": 3, "title": "C", "slug": "c", "status": "draft", "published_at": "2025-05-02T12:00:00.000Z"}
            ]}}]}"#,
        );
        let data = export.data().unwrap();
        let published: Vec<_> = data.published_posts().collect();

        assert_eq!(published.len(), 2);
        assert!(!published[0].is_published());
        assert!(published[1].is_published());
        assert!(!data.posts[2].is_published());
    }

    #[test]
    fn test_empty_db_has_no_data() {
        let export = parse(r#"{"db": []}"#);
        assert!(export.data().is_none());
    }
}
