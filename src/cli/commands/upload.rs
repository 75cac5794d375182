//! Bulk upload command implementation.

use crate::api::PostStore;
use crate::cli::commands::posts::read_markdown;
use crate::config::Settings;
use crate::error::Result;
use crate::sync::find_markdown_files;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Result of uploading one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileUpload {
    Uploaded { slug: String },
    Simulated,
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadEntry {
    pub path: PathBuf,
    #[serde(flatten)]
    pub result: FileUpload,
}

/// Upload each file in order, continuing past failures.
///
/// `on_start` is called with the 1-based position before each file.
pub fn upload_files<S: PostStore>(
    store: Option<&S>,
    files: &[PathBuf],
    mut on_start: impl FnMut(usize, &Path),
) -> Vec<UploadEntry> {
    files
        .iter()
        .enumerate()
        .map(|(i, path)| {
            on_start(i + 1, path);
            let result = upload_one(store, path);
            UploadEntry {
                path: path.clone(),
                result,
            }
        })
        .collect()
}

fn upload_one<S: PostStore>(store: Option<&S>, path: &Path) -> FileUpload {
    let content = match read_markdown(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read file");
            return FileUpload::Failed {
                message: e.to_string(),
            };
        }
    };

    let Some(store) = store else {
        return FileUpload::Simulated;
    };

    match store.create(&content) {
        Ok(post) => FileUpload::Uploaded { slug: post.slug },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Upload failed");
            FileUpload::Failed {
                message: e.to_string(),
            }
        }
    }
}

/// Execute `upload`.
pub fn execute(directory: &Path, settings: &Settings, json: bool) -> Result<()> {
    let files = find_markdown_files(directory)?;

    if files.is_empty() {
        if json {
            let output = serde_json::json!({ "found": 0, "files": [] });
            println!("{output}");
        } else {
            println!("No Markdown files found in {}", directory.display());
        }
        return Ok(());
    }

    let total = files.len();
    if !json {
        println!("Found {total} Markdown file(s)");
    }

    let client = if settings.dry_run {
        None
    } else {
        Some(settings.client()?)
    };

    let entries = upload_files(client.as_ref(), &files, |i, path| {
        if !json {
            println!("[{i}/{total}] Processing {}", path.display());
            if settings.dry_run {
                println!("  DRY RUN: Would upload {}", path.display());
            }
        }
    });

    let failed: Vec<&UploadEntry> = entries
        .iter()
        .filter(|e| matches!(e.result, FileUpload::Failed { .. }))
        .collect();

    if json {
        let output = serde_json::json!({
            "found": total,
            "dry_run": settings.dry_run,
            "failed": failed.len(),
            "files": entries,
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    for entry in &entries {
        if let FileUpload::Uploaded { slug } = &entry.result {
            println!("  {} {} -> {slug}", "✓".green(), entry.path.display());
        }
    }

    println!();
    if failed.is_empty() {
        let verb = if settings.dry_run { "would be uploaded" } else { "uploaded" };
        println!("{}", format!("Upload complete: {total} file(s) {verb}").green());
    } else {
        println!(
            "Upload complete: {} succeeded, {}",
            total - failed.len(),
            format!("{} failed", failed.len()).red()
        );
        for entry in failed {
            if let FileUpload::Failed { message } = &entry.result {
                println!("  {} {}: {message}", "✗".red(), entry.path.display());
            }
        }
    }
    Ok(())
}
