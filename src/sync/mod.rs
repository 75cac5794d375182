//! Directory sync with the willow.camp API.
//!
//! - **Scan**: `**/*.md` under a root, keyed by file stem
//! - **Reconcile**: classify each slug as create / update / skip / download
//! - **Execute**: carry out decisions one at a time, recording each outcome
//!
//! # Policy
//!
//! The only conflict rule is a timestamp comparison: a local file replaces
//! the remote body when its mtime is strictly newer than the post's
//! `updated_at`. There is no diffing, merging or persisted sync state.
//!
//! # Example
//!
//! ```ignore
//! use willow_camp::sync::SyncEngine;
//!
//! let client = settings.client()?;
//! let report = SyncEngine::new(&client, "posts", false).run()?;
//! println!("{} created", report.created());
//! ```

mod engine;
mod file;
mod report;
mod scan;
mod types;

pub use engine::{SyncEngine, reconcile};
pub use file::{MARKDOWN_EXT, atomic_write, is_safe_slug, post_path};
pub use report::{decision_line, print_report};
pub use scan::{find_markdown_files, scan_directory, slug_for};
pub use types::{
    Decision, LocalFile, Outcome, PlannedAction, SkipReason, SyncAction, SyncReport,
};
