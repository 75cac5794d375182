//! Local Markdown scanner.
//!
//! Finds `**/*.md` under a root directory. The slug of a file is its stem,
//! so two files with the same name in different subdirectories would claim
//! the same slug; [`scan_directory`] rejects that as an input error.
//!
//! Nothing is cached: every call re-reads the filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::sync::file::MARKDOWN_EXT;
use crate::sync::types::LocalFile;

/// All Markdown files under `dir`, recursively, sorted by path.
///
/// # Errors
///
/// Returns [`Error::FileNotFound`] if `dir` is not an existing directory,
/// or an error if the glob pattern is invalid. Unreadable entries are
/// logged and skipped.
pub fn find_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::FileNotFound {
            path: dir.to_path_buf(),
        });
    }
    let pattern = markdown_pattern(dir);

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Skipping unreadable path"),
        }
    }

    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "Scanned for Markdown files");
    Ok(files)
}

/// Recursive Markdown glob rooted at `dir`, with the root taken literally.
fn markdown_pattern(dir: &Path) -> String {
    let root = glob::Pattern::escape(&dir.to_string_lossy());
    format!("{}/**/*.{MARKDOWN_EXT}", root.trim_end_matches('/'))
}

/// Slug for a Markdown path: the filename without directory or extension.
#[must_use]
pub fn slug_for(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
}

/// Scan `dir` into local file records, in path order.
///
/// # Errors
///
/// Returns [`Error::DuplicateSlug`] if two files share a stem,
/// or an I/O error if a file's metadata cannot be read.
pub fn scan_directory(dir: &Path) -> Result<Vec<LocalFile>> {
    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    let mut records = Vec::new();

    for path in find_markdown_files(dir)? {
        let Some(slug) = slug_for(&path) else {
            warn!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        };

        if let Some(first) = seen.get(&slug) {
            return Err(Error::DuplicateSlug {
                slug,
                first: first.clone(),
                second: path,
            });
        }

        let modified: DateTime<Utc> = std::fs::metadata(&path)?.modified()?.into();
        seen.insert(slug.clone(), path.clone());
        records.push(LocalFile {
            slug,
            path,
            modified,
        });
    }

    Ok(records)
}
