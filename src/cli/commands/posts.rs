//! Single-post command implementations (list, show, create, update, delete, download).

use crate::api::{LIST_PAGE_SIZE, PostStore};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::model::Post;
use crate::sync::{MARKDOWN_EXT, atomic_write};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;

const PREVIEW_CHARS: usize = 100;
const RULE: &str = "--------------------------------------------------";

/// Read a Markdown file, mapping a missing path to [`Error::FileNotFound`].
pub(crate) fn read_markdown(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

fn preview(content: &str) -> String {
    let mut head: String = content.chars().take(PREVIEW_CHARS).collect();
    if content.chars().count() > PREVIEW_CHARS {
        head.push_str("...");
    }
    head
}

/// Execute `list`.
pub fn list(settings: &Settings, json: bool) -> Result<()> {
    let client = settings.client()?;
    let posts = client.list(LIST_PAGE_SIZE)?;

    if json {
        let output = serde_json::json!({
            "count": posts.len(),
            "posts": posts,
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if posts.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    println!("Found {} post(s):", posts.len());
    for post in &posts {
        let title = post.title.as_deref().unwrap_or("");
        println!("  [{}] {} {}", post.id, post.slug.bold(), title.dimmed());
    }
    Ok(())
}

/// Execute `show`.
pub fn show(slug: &str, settings: &Settings, verbose: bool, json: bool) -> Result<()> {
    let client = settings.client()?;
    let post = client.get(slug)?;

    if json {
        println!("{}", serde_json::to_string(&post)?);
        return Ok(());
    }

    print_post(&post, verbose);
    Ok(())
}

fn print_post(post: &Post, verbose: bool) {
    println!("{} {}", "ID:".bold(), post.id);
    println!("{} {}", "Slug:".bold(), post.slug);
    println!("{} {}", "Title:".bold(), post.title.as_deref().unwrap_or(""));
    println!("{} {}", "Published:".bold(), post.is_published());
    println!(
        "{} {}",
        "Published at:".bold(),
        post.published_at.as_deref().unwrap_or("Not published")
    );
    if !post.tags.is_empty() {
        println!("{} {}", "Tags:".bold(), post.tags.join(", "));
    }

    if verbose {
        if let Some(markdown) = &post.markdown {
            println!();
            println!("{RULE}");
            println!("{markdown}");
            println!("{RULE}");
        }
    }
}

/// Execute `create`.
pub fn create(file: &Path, settings: &Settings, verbose: bool, json: bool) -> Result<()> {
    let content = read_markdown(file)?;

    if settings.dry_run {
        println!("DRY RUN: Would upload {}", file.display());
        if verbose {
            println!("Content preview: {}", preview(&content));
        }
        return Ok(());
    }

    let client = settings.client()?;
    let post = client.create(&content)?;
    info!(slug = %post.slug, "Created post");

    if json {
        println!("{}", serde_json::to_string(&post)?);
    } else {
        println!(
            "{} Created post: {} ({})",
            "✓".green(),
            post.title.as_deref().unwrap_or(&post.slug),
            post.slug
        );
    }
    Ok(())
}

/// Execute `update`.
pub fn update(slug: &str, file: &Path, settings: &Settings, verbose: bool, json: bool) -> Result<()> {
    let content = read_markdown(file)?;

    if settings.dry_run {
        println!("DRY RUN: Would update post {slug} with {}", file.display());
        if verbose {
            println!("Content preview: {}", preview(&content));
        }
        return Ok(());
    }

    let client = settings.client()?;
    let post = client.update(slug, &content)?;
    info!(slug = %post.slug, "Updated post");

    if json {
        println!("{}", serde_json::to_string(&post)?);
    } else {
        println!(
            "{} Updated post: {} ({})",
            "✓".green(),
            post.title.as_deref().unwrap_or(&post.slug),
            post.slug
        );
    }
    Ok(())
}

/// Execute `delete`.
pub fn delete(slug: &str, settings: &Settings, json: bool) -> Result<()> {
    if settings.dry_run {
        println!("DRY RUN: Would delete post {slug}");
        return Ok(());
    }

    let client = settings.client()?;
    client.delete(slug)?;
    info!(slug, "Deleted post");

    if json {
        let output = serde_json::json!({ "deleted": slug });
        println!("{output}");
    } else {
        println!("{} Deleted post: {slug}", "✓".green());
    }
    Ok(())
}

/// Default download target for a slug.
fn default_output(slug: &str) -> PathBuf {
    PathBuf::from(format!("{slug}.{MARKDOWN_EXT}"))
}

/// Fetch `slug` and write its Markdown body to `path`.
pub(crate) fn download_to<S: PostStore>(store: &S, slug: &str, path: &Path) -> Result<Post> {
    let post = store.get(slug)?;
    let body = post.markdown.as_deref().unwrap_or_default();
    atomic_write(path, body)?;
    Ok(post)
}

/// Execute `download`.
pub fn download(slug: &str, output: Option<&Path>, settings: &Settings, json: bool) -> Result<()> {
    let path = output.map_or_else(|| default_output(slug), Path::to_path_buf);

    if settings.dry_run {
        println!("DRY RUN: Would download post {slug} to {}", path.display());
        return Ok(());
    }

    let client = settings.client()?;
    download_to(&client, slug, &path)?;
    info!(slug, path = %path.display(), "Downloaded post");

    if json {
        let output = serde_json::json!({
            "slug": slug,
            "path": path.display().to_string(),
        });
        println!("{output}");
    } else {
        println!("{} Downloaded post to: {}", "✓".green(), path.display());
    }
    Ok(())
}
