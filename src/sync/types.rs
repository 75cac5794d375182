//! Sync types.
//!
//! Local file records, per-slug decisions and the report of one sync run.
//! None of these are persisted; every run recomputes them from scratch.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A Markdown file found by the local scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalFile {
    /// File stem, used as the post slug.
    pub slug: String,
    pub path: PathBuf,
    pub modified: DateTime<Utc>,
}

/// Why a slug present on both sides was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Local file is not strictly newer than the remote post.
    UpToDate,
    /// Remote `updated_at` is absent or unparseable.
    NoRemoteTimestamp,
}

/// Reconciliation decision for one slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "reason", rename_all = "snake_case")]
pub enum Decision {
    /// Local only: create the remote post.
    CreateRemote,
    /// Both exist and the local file is newer: push the local body.
    UpdateRemote,
    /// Both exist and nothing needs to change.
    Skip(SkipReason),
    /// Remote only: write the post to `<dir>/<slug>.md`.
    DownloadLocal,
}

impl Decision {
    /// Whether carrying out this decision mutates remote or local state.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        !matches!(self, Self::Skip(_))
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateRemote => write!(f, "create"),
            Self::UpdateRemote => write!(f, "update"),
            Self::Skip(_) => write!(f, "skip"),
            Self::DownloadLocal => write!(f, "download"),
        }
    }
}

/// A decision bound to its slug, before execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedAction {
    pub slug: String,
    pub decision: Decision,
    /// Local file backing a create/update, or the download target.
    pub path: PathBuf,
}

/// Result of carrying out one decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum Outcome {
    /// The mutation was performed.
    Done,
    /// Dry run: the mutation was reported but not performed.
    Simulated,
    /// Nothing to do (skip decisions).
    Unchanged,
    /// The mutation failed; the run continued with the next slug.
    Failed(String),
}

/// One line of the sync action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncAction {
    pub slug: String,
    pub decision: Decision,
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Per-item action log for one sync run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub dry_run: bool,
    pub actions: Vec<SyncAction>,
}

impl SyncReport {
    fn count(&self, pred: impl Fn(&SyncAction) -> bool) -> usize {
        self.actions.iter().filter(|a| pred(a)).count()
    }

    fn succeeded(&self, decision: Decision) -> usize {
        self.count(|a| a.decision == decision && !matches!(a.outcome, Outcome::Failed(_)))
    }

    /// Remote posts created (or that would be, in a dry run).
    #[must_use]
    pub fn created(&self) -> usize {
        self.succeeded(Decision::CreateRemote)
    }

    /// Remote posts updated.
    #[must_use]
    pub fn updated(&self) -> usize {
        self.succeeded(Decision::UpdateRemote)
    }

    /// Posts downloaded to the local directory.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.succeeded(Decision::DownloadLocal)
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|a| matches!(a.decision, Decision::Skip(_)))
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|a| matches!(a.outcome, Outcome::Failed(_)))
    }

    /// The decision assigned to `slug`, if it was part of this run.
    #[must_use]
    pub fn decision_for(&self, slug: &str) -> Option<Decision> {
        self.actions
            .iter()
            .find(|a| a.slug == slug)
            .map(|a| a.decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(slug: &str, decision: Decision, outcome: Outcome) -> SyncAction {
        SyncAction {
            slug: slug.to_string(),
            decision,
            path: PathBuf::from(format!("{slug}.md")),
            outcome,
        }
    }

    #[test]
    fn test_report_counts() {
        let report = SyncReport {
            dry_run: false,
            actions: vec![
                action("a", Decision::UpdateRemote, Outcome::Done),
                action("b", Decision::CreateRemote, Outcome::Done),
                action("c", Decision::CreateRemote, Outcome::Failed("boom".into())),
                action("d", Decision::Skip(SkipReason::UpToDate), Outcome::Unchanged),
                action("e", Decision::DownloadLocal, Outcome::Done),
            ],
        };

        assert_eq!(report.created(), 1);
        assert_eq!(report.updated(), 1);
        assert_eq!(report.downloaded(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.decision_for("c"), Some(Decision::CreateRemote));
        assert_eq!(report.decision_for("zzz"), None);
    }

    #[test]
    fn test_decision_display_and_mutation() {
        assert_eq!(Decision::DownloadLocal.to_string(), "download");
        assert_eq!(Decision::Skip(SkipReason::NoRemoteTimestamp).to_string(), "skip");
        assert!(Decision::CreateRemote.is_mutating());
        assert!(!Decision::Skip(SkipReason::UpToDate).is_mutating());
    }

    #[test]
    fn test_decision_serializes_with_reason() {
        let json = serde_json::to_value(Decision::Skip(SkipReason::UpToDate)).unwrap();
        assert_eq!(json["action"], "skip");
        assert_eq!(json["reason"], "up_to_date");

        let json = serde_json::to_value(Decision::CreateRemote).unwrap();
        assert_eq!(json["action"], "create_remote");
    }
}
