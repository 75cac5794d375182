//! Ghost export importer.
//!
//! Converts the published posts of a Ghost JSON export into Markdown files
//! with frontmatter, one `<slug>.md` per post, and optionally uploads each
//! new file to willow.camp.
//!
//! A malformed export aborts before anything is written. After that, every
//! post is handled independently: a post without content, with an unusable
//! slug, or whose write/upload fails is reported and the batch continues.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::api::PostStore;
use crate::error::{Error, Result};
use crate::import::convert::HtmlConverter;
use crate::import::frontmatter::{Frontmatter, date_only};
use crate::model::ghost::{GhostData, GhostExport, GhostPost};
use crate::sync::{atomic_write, post_path};

/// Placeholder Ghost uses for the site's base URL inside exported content.
pub const GHOST_URL_PLACEHOLDER: &str = "__GHOST_URL__";

/// Read and parse a Ghost export file.
///
/// # Errors
///
/// Returns [`Error::FileNotFound`] if the file does not exist and
/// [`Error::Parse`] if it is not a valid export.
pub fn parse_export(path: &Path) -> Result<GhostExport> {
    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let export: GhostExport = serde_json::from_str(&content).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if export.db.is_empty() {
        return Err(Error::Parse {
            path: path.to_path_buf(),
            message: "export contains no database entries".to_string(),
        });
    }

    Ok(export)
}

/// Remove every base-URL placeholder from `text`.
#[must_use]
pub fn strip_placeholder(text: &str) -> String {
    text.replace(GHOST_URL_PLACEHOLDER, "")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// What happened to the upload of one created file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    /// No token configured; the file was only written.
    NotRequested,
    /// Dry run: the upload was reported but not performed.
    Simulated,
    Uploaded { slug: String },
    Failed { message: String },
}

/// Result for one published post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportOutcome {
    Created { path: PathBuf, upload: UploadOutcome },
    /// Neither HTML nor plaintext content.
    NoContent,
    /// Slug cannot name a file.
    UnsafeSlug,
    WriteFailed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportEntry {
    pub slug: String,
    pub outcome: ImportOutcome,
}

/// Summary of one import run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub output_dir: PathBuf,
    /// Posts whose status flag is `published`.
    pub published: usize,
    pub entries: Vec<ImportEntry>,
}

impl ImportReport {
    /// Paths of files actually written.
    pub fn created_paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().filter_map(|e| match &e.outcome {
            ImportOutcome::Created { path, .. } => Some(path.as_path()),
            _ => None,
        })
    }

    /// Number of Markdown files written.
    #[must_use]
    pub fn created(&self) -> usize {
        self.created_paths().count()
    }

    /// Number of files uploaded to willow.camp.
    #[must_use]
    pub fn uploaded(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.outcome,
                    ImportOutcome::Created {
                        upload: UploadOutcome::Uploaded { .. },
                        ..
                    }
                )
            })
            .count()
    }

    /// Posts skipped or failed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.entries.len() - self.created()
    }
}

/// Ghost export importer.
pub struct GhostImporter<'a, S: PostStore, C: HtmlConverter> {
    converter: C,
    store: Option<&'a S>,
    output_dir: PathBuf,
    dry_run: bool,
}

impl<'a, S: PostStore, C: HtmlConverter> GhostImporter<'a, S, C> {
    /// Create an importer writing to `output_dir`.
    ///
    /// With a `store`, each written file is uploaded (or, in a dry run,
    /// reported as an intended upload). Without one, files are only written.
    pub fn new(converter: C, store: Option<&'a S>, output_dir: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            converter,
            store,
            output_dir: output_dir.into(),
            dry_run,
        }
    }

    /// Import every published post of `export`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created.
    /// Per-post failures are recorded in the report instead.
    pub fn import(&self, export: &GhostExport) -> Result<ImportReport> {
        let mut report = ImportReport {
            output_dir: self.output_dir.clone(),
            ..ImportReport::default()
        };

        let Some(data) = export.data() else {
            return Ok(report);
        };

        let published: Vec<&GhostPost> = data.published_posts().collect();
        report.published = published.len();
        if published.is_empty() {
            info!("No published posts found");
            return Ok(report);
        }

        fs::create_dir_all(&self.output_dir)?;
        info!(count = published.len(), dir = %self.output_dir.display(), "Importing published posts");

        for post in published {
            let outcome = self.import_post(data, post);
            report.entries.push(ImportEntry {
                slug: post.slug.clone(),
                outcome,
            });
        }

        Ok(report)
    }

    /// Markdown body for a post: converted HTML, else plaintext.
    ///
    /// The placeholder is removed from the source before conversion, since
    /// converters escape the underscores of text nodes.
    fn body_for(&self, post: &GhostPost) -> Option<String> {
        if let Some(html) = non_empty(post.html.as_deref()) {
            return Some(self.converter.to_markdown(&strip_placeholder(html)));
        }
        non_empty(post.plaintext.as_deref()).map(strip_placeholder)
    }

    /// Frontmatter and body for a post, or `None` if it has no content.
    pub fn render_post(&self, data: &GhostData, post: &GhostPost) -> Option<String> {
        let body = strip_placeholder(&self.body_for(post)?);

        let frontmatter = Frontmatter {
            title: post.title.clone(),
            published_at: post.published_at.as_deref().and_then(date_only),
            slug: post.slug.clone(),
            published: post.is_published(),
            meta_description: non_empty(post.custom_excerpt.as_deref()).map(ToString::to_string),
            tags: data.tags_for(&post.id),
            feature_image: non_empty(post.feature_image.as_deref())
                .map(strip_placeholder)
                .filter(|s| !s.is_empty()),
        };

        Some(frontmatter.document(&body))
    }

    fn import_post(&self, data: &GhostData, post: &GhostPost) -> ImportOutcome {
        let Some(path) = post_path(&self.output_dir, &post.slug) else {
            warn!(slug = %post.slug, "Skipping post with unusable slug");
            return ImportOutcome::UnsafeSlug;
        };

        let Some(document) = self.render_post(data, post) else {
            warn!(slug = %post.slug, title = %post.title, "Skipping post with no content");
            return ImportOutcome::NoContent;
        };

        if let Err(e) = atomic_write(&path, &document) {
            warn!(path = %path.display(), error = %e, "Failed to write post");
            return ImportOutcome::WriteFailed {
                message: e.to_string(),
            };
        }
        info!(path = %path.display(), "Created");

        let upload = self.upload(&path, &document);
        ImportOutcome::Created { path, upload }
    }

    fn upload(&self, path: &Path, document: &str) -> UploadOutcome {
        let Some(store) = self.store else {
            return UploadOutcome::NotRequested;
        };

        if self.dry_run {
            info!(path = %path.display(), "DRY RUN: Would upload");
            return UploadOutcome::Simulated;
        }

        match store.create(document) {
            Ok(created) => {
                info!(slug = %created.slug, "Uploaded");
                UploadOutcome::Uploaded { slug: created.slug }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Upload failed");
                UploadOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}
