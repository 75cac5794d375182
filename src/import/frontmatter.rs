//! Frontmatter for imported posts.
//!
//! Fields are written in a fixed order, each only when present:
//! `title`, `published_at`, `slug`, `published`, `meta_description`,
//! `tags`, then `feature_image`.

use chrono::NaiveDate;
use std::fmt::Write;

/// Metadata block emitted ahead of an imported post's body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub title: String,
    /// Date portion only (`YYYY-MM-DD`).
    pub published_at: Option<String>,
    pub slug: String,
    /// Emitted only when true.
    pub published: bool,
    pub meta_description: Option<String>,
    pub tags: Vec<String>,
    pub feature_image: Option<String>,
}

impl Frontmatter {
    /// Render the `---` delimited block, ending with a newline.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("---\n");
        let _ = writeln!(out, "title: {}", quote(&self.title));
        if let Some(date) = &self.published_at {
            let _ = writeln!(out, "published_at: {date}");
        }
        let _ = writeln!(out, "slug: {}", scalar(&self.slug));
        if self.published {
            out.push_str("published: true\n");
        }
        if let Some(description) = &self.meta_description {
            let _ = writeln!(out, "meta_description: {}", quote(description));
        }
        if !self.tags.is_empty() {
            out.push_str("tags:\n");
            for tag in &self.tags {
                let _ = writeln!(out, "  - {}", quote(tag));
            }
        }
        if let Some(image) = &self.feature_image {
            let _ = writeln!(out, "feature_image: {image}");
        }
        out.push_str("---\n");
        out
    }

    /// Full document: frontmatter, a blank line, then the body.
    #[must_use]
    pub fn document(&self, body: &str) -> String {
        let mut doc = self.render();
        doc.push('\n');
        doc.push_str(body.trim_end());
        doc.push('\n');
        doc
    }
}

/// Double-quote a scalar, escaping backslashes and quotes.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Leave slug-like values bare; quote anything YAML could read as syntax.
fn scalar(value: &str) -> String {
    let plain = value.starts_with(|c: char| c.is_ascii_alphanumeric())
        && value.contains(|c: char| c.is_ascii_alphabetic())
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if plain { value.to_string() } else { quote(value) }
}

/// Truncate an ISO timestamp to its `YYYY-MM-DD` date.
///
/// Accepts RFC 3339 (`2025-05-01T12:00:00.000Z`) and the space-separated
/// form older exports use. Returns `None` for anything else.
#[must_use]
pub fn date_only(timestamp: &str) -> Option<String> {
    let date = timestamp.trim().get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}
