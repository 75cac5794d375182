//! File operations for sync and import.
//!
//! Writes go through [`atomic_write`] so an interrupted run never leaves a
//! half-written post file behind.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Markdown file extension, without the dot.
pub const MARKDOWN_EXT: &str = "md";

/// Write content to a file atomically.
///
/// This function:
/// 1. Creates the parent directory if needed
/// 2. Writes content to a sibling temporary file (`<name>.tmp`)
/// 3. Calls `fsync` to ensure data is on disk
/// 4. Atomically renames the temp file to the target path
///
/// If any step fails, the original file (if any) remains untouched.
///
/// # Errors
///
/// Returns an error if any file operation fails.
pub fn atomic_write(path: &Path, content: &str) -> std::io::Result<()> {
    let mut temp_name = path
        .file_name()
        .map_or_else(|| OsString::from("post"), OsString::from);
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Whether `slug` can name a file directly inside a directory.
///
/// Rejects empty slugs, path separators and parent-directory references.
#[must_use]
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.trim().is_empty()
        && !slug.contains(['/', '\\'])
        && slug != "."
        && !slug.contains("..")
}

/// `<dir>/<slug>.md`, or `None` if the slug is not a safe file stem.
#[must_use]
pub fn post_path(dir: &Path, slug: &str) -> Option<PathBuf> {
    is_safe_slug(slug).then(|| dir.join(format!("{slug}.{MARKDOWN_EXT}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("post.md");

        atomic_write(&path, "---\ntitle: \"A\"\n---\n\nBody\n").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "---\ntitle: \"A\"\n---\n\nBody\n");
        assert!(!temp_dir.path().join("post.md.tmp").exists());
    }

    #[test]
    fn test_atomic_write_creates_parent_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("out").join("post.md");

        atomic_write(&path, "first").unwrap();
        atomic_write(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_safe_slugs() {
        assert!(is_safe_slug("hello-world"));
        assert!(is_safe_slug("2025_notes"));
        assert!(!is_safe_slug(""));
        assert!(!is_safe_slug("  "));
        assert!(!is_safe_slug("a/b"));
        assert!(!is_safe_slug("a\\b"));
        assert!(!is_safe_slug(".."));
        assert!(!is_safe_slug("../etc"));
    }

    #[test]
    fn test_post_path() {
        let dir = Path::new("posts");
        assert_eq!(post_path(dir, "a"), Some(PathBuf::from("posts/a.md")));
        assert_eq!(post_path(dir, "../a"), None);
    }
}
