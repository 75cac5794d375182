//! Directory sync command implementation.

use crate::config::Settings;
use crate::error::Result;
use crate::sync::{SyncEngine, print_report};
use std::path::Path;

/// Execute `sync`.
pub fn execute(directory: &Path, settings: &Settings, verbose: bool, json: bool) -> Result<()> {
    let client = settings.client()?;
    let report = SyncEngine::new(&client, directory, settings.dry_run).run()?;

    if json {
        let output = serde_json::json!({
            "directory": directory.display().to_string(),
            "dry_run": report.dry_run,
            "created": report.created(),
            "updated": report.updated(),
            "downloaded": report.downloaded(),
            "skipped": report.skipped(),
            "failed": report.failed(),
            "actions": report.actions,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print_report(&report, verbose);
    }
    Ok(())
}
