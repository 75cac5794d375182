//! Ghost import command implementation.

use crate::config::Settings;
use crate::error::Result;
use crate::import::{GhostImporter, Html2Md, ImportOutcome, ImportReport, UploadOutcome, parse_export};
use colored::Colorize;
use std::path::Path;

/// Execute `ghost-import`.
///
/// Files are written even in a dry run; uploads happen only when a token
/// is configured and are simulated in a dry run.
pub fn execute(export_path: &Path, output_dir: &Path, settings: &Settings, json: bool) -> Result<()> {
    if !json {
        println!("Processing Ghost export file: {}", export_path.display());
    }
    let export = parse_export(export_path)?;

    let client = match settings.token {
        Some(_) => Some(settings.client()?),
        None => None,
    };
    let importer = GhostImporter::new(Html2Md, client.as_ref(), output_dir, settings.dry_run);
    let report = importer.import(&export)?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        print_import(&report);
    }
    Ok(())
}

fn print_import(report: &ImportReport) {
    if report.published == 0 {
        println!("No published posts found");
        return;
    }

    println!("Found {} published posts", report.published);
    for entry in &report.entries {
        match &entry.outcome {
            ImportOutcome::Created { path, upload } => {
                println!("Created: {}", path.display());
                print_upload(path, upload);
            }
            ImportOutcome::NoContent => {
                println!("  {} Skipped '{}': no content", "•".yellow(), entry.slug);
            }
            ImportOutcome::UnsafeSlug => {
                println!("  {} Skipped '{}': slug cannot name a file", "•".yellow(), entry.slug);
            }
            ImportOutcome::WriteFailed { message } => {
                println!("  {} Failed to write '{}': {message}", "✗".red(), entry.slug);
            }
        }
    }

    println!();
    println!(
        "{}",
        format!("Conversion complete! {} markdown files created", report.created()).green()
    );
    println!("Output directory: {}", report.output_dir.display());
    if report.uploaded() > 0 {
        println!("Uploaded {} post(s) to willow.camp", report.uploaded());
    }
}

fn print_upload(path: &Path, upload: &UploadOutcome) {
    match upload {
        UploadOutcome::NotRequested => {}
        UploadOutcome::Simulated => println!("  DRY RUN: Would upload {}", path.display()),
        UploadOutcome::Uploaded { slug } => println!("  {} Uploaded: {slug}", "✓".green()),
        UploadOutcome::Failed { message } => {
            println!("  {} Upload failed: {message}", "✗".red());
        }
    }
}

