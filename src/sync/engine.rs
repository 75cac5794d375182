//! Bidirectional sync between a local Markdown directory and the remote store.
//!
//! A run is stateless:
//! 1. Scan the local directory (fatal on failure)
//! 2. List remote posts (fatal on failure)
//! 3. Local pass: create local-only slugs, update slugs whose file is newer
//! 4. Remote pass: download remote-only slugs
//!
//! Per-slug failures are recorded in the report and the run continues.
//! Dry runs log exactly the same decisions but issue no mutating call.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::api::{LIST_PAGE_SIZE, PostStore};
use crate::error::{Error, Result};
use crate::model::Post;
use crate::sync::file::{atomic_write, post_path};
use crate::sync::scan::scan_directory;
use crate::sync::types::{
    Decision, LocalFile, Outcome, PlannedAction, SkipReason, SyncAction, SyncReport,
};

/// Classify every slug from the local scan and the remote listing.
///
/// Local slugs come first, in scan order; remote-only slugs follow in
/// listing order. Equal timestamps are not "newer" and yield a skip.
#[must_use]
pub fn reconcile(dir: &Path, local: &[LocalFile], remote: &[Post]) -> Vec<PlannedAction> {
    let mut remote_by_slug: HashMap<&str, &Post> = HashMap::new();
    for post in remote {
        remote_by_slug.entry(post.slug.as_str()).or_insert(post);
    }

    let mut plan = Vec::with_capacity(local.len() + remote.len());

    for file in local {
        let decision = match remote_by_slug.get(file.slug.as_str()) {
            None => Decision::CreateRemote,
            Some(post) => match post.updated_at_timestamp() {
                None => Decision::Skip(SkipReason::NoRemoteTimestamp),
                Some(remote_ts) if file.modified > remote_ts => Decision::UpdateRemote,
                Some(_) => Decision::Skip(SkipReason::UpToDate),
            },
        };
        plan.push(PlannedAction {
            slug: file.slug.clone(),
            decision,
            path: file.path.clone(),
        });
    }

    let local_slugs: HashSet<&str> = local.iter().map(|f| f.slug.as_str()).collect();
    let mut queued: HashSet<&str> = HashSet::new();
    for post in remote {
        let slug = post.slug.as_str();
        if local_slugs.contains(slug) || !queued.insert(slug) {
            continue;
        }
        plan.push(PlannedAction {
            slug: post.slug.clone(),
            decision: Decision::DownloadLocal,
            path: post_path(dir, slug).unwrap_or_else(|| dir.join(slug)),
        });
    }

    plan
}

/// Sync engine over a [`PostStore`].
pub struct SyncEngine<'a, S: PostStore> {
    store: &'a S,
    directory: PathBuf,
    dry_run: bool,
}

impl<'a, S: PostStore> SyncEngine<'a, S> {
    /// Create an engine for `directory`.
    pub fn new(store: &'a S, directory: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            store,
            directory: directory.into(),
            dry_run,
        }
    }

    /// Run one full sync.
    ///
    /// # Errors
    ///
    /// Returns an error only when the working set cannot be established:
    /// the local scan fails or the remote listing fails. Nothing is
    /// mutated in that case.
    pub fn run(&self) -> Result<SyncReport> {
        let local = scan_directory(&self.directory)?;
        let remote = self.store.list(LIST_PAGE_SIZE)?;
        info!(
            local = local.len(),
            remote = remote.len(),
            dry_run = self.dry_run,
            "Starting sync"
        );

        let plan = reconcile(&self.directory, &local, &remote);
        let actions = plan.into_iter().map(|action| self.execute(action)).collect();

        Ok(SyncReport {
            dry_run: self.dry_run,
            actions,
        })
    }

    fn execute(&self, action: PlannedAction) -> SyncAction {
        let PlannedAction {
            slug,
            decision,
            path,
        } = action;
        info!(slug = %slug, action = %decision, path = %path.display(), "Sync decision");

        let outcome = if !decision.is_mutating() {
            Outcome::Unchanged
        } else if self.dry_run {
            Outcome::Simulated
        } else {
            let result = match decision {
                Decision::CreateRemote => self.create_remote(&path),
                Decision::UpdateRemote => self.update_remote(&slug, &path),
                Decision::DownloadLocal => self.download_local(&slug, &path),
                Decision::Skip(_) => Ok(()),
            };
            match result {
                Ok(()) => Outcome::Done,
                Err(e) => {
                    warn!(slug = %slug, action = %decision, error = %e, "Sync action failed");
                    Outcome::Failed(e.to_string())
                }
            }
        };

        SyncAction {
            slug,
            decision,
            path,
            outcome,
        }
    }

    fn create_remote(&self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)?;
        let post = self.store.create(&content)?;
        info!(slug = %post.slug, "Created remote post");
        Ok(())
    }

    fn update_remote(&self, slug: &str, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)?;
        self.store.update(slug, &content)?;
        info!(slug, "Updated remote post");
        Ok(())
    }

    fn download_local(&self, slug: &str, path: &Path) -> Result<()> {
        if post_path(&self.directory, slug).is_none() {
            return Err(Error::InvalidArgument(format!(
                "remote slug '{slug}' cannot be used as a file name"
            )));
        }
        let post = self.store.get(slug)?;
        atomic_write(path, post.markdown.as_deref().unwrap_or_default())?;
        info!(slug, path = %path.display(), "Downloaded remote post");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{Call, MemoryStore, post};
    use chrono::{DateTime, Duration, Utc};
    use std::fs::File;
    use std::time::SystemTime;
    use tempfile::TempDir;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    fn write_local(dir: &Path, slug: &str, content: &str, modified: DateTime<Utc>) -> PathBuf {
        let path = dir.join(format!("{slug}.md"));
        fs::write(&path, content).unwrap();
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(SystemTime::from(modified))
            .unwrap();
        path
    }

    fn local(slug: &str, modified: DateTime<Utc>) -> LocalFile {
        LocalFile {
            slug: slug.to_string(),
            path: PathBuf::from(format!("posts/{slug}.md")),
            modified,
        }
    }

    #[test]
    fn test_reconcile_set_membership() {
        let t = at("2025-05-01T12:00:00Z");
        let plan = reconcile(
            Path::new("posts"),
            &[local("a", t), local("b", t)],
            &[
                post("a", Some("2025-05-01T11:00:00Z"), None),
                post("c", Some("2025-05-01T12:00:00Z"), None),
            ],
        );

        let decisions: Vec<_> = plan.iter().map(|p| (p.slug.as_str(), p.decision)).collect();
        assert_eq!(
            decisions,
            vec![
                ("a", Decision::UpdateRemote),
                ("b", Decision::CreateRemote),
                ("c", Decision::DownloadLocal),
            ]
        );
        assert_eq!(plan[2].path, PathBuf::from("posts/c.md"));
    }

    #[test]
    fn test_reconcile_equal_timestamps_skip() {
        let t = at("2025-05-01T12:00:00Z");
        let plan = reconcile(
            Path::new("."),
            &[local("same", t), local("older", t - Duration::hours(1))],
            &[
                post("same", Some("2025-05-01T12:00:00Z"), None),
                post("older", Some("2025-05-01T12:00:00Z"), None),
            ],
        );
        assert_eq!(plan[0].decision, Decision::Skip(SkipReason::UpToDate));
        assert_eq!(plan[1].decision, Decision::Skip(SkipReason::UpToDate));
    }

    #[test]
    fn test_reconcile_unparseable_remote_timestamp_skips() {
        let t = at("2030-01-01T00:00:00Z");
        let plan = reconcile(
            Path::new("."),
            &[local("x", t), local("y", t)],
            &[post("x", Some("not a date"), None), post("y", None, None)],
        );
        assert_eq!(plan[0].decision, Decision::Skip(SkipReason::NoRemoteTimestamp));
        assert_eq!(plan[1].decision, Decision::Skip(SkipReason::NoRemoteTimestamp));
    }

    #[test]
    fn test_sync_scenario_update_create_download() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let t = at("2025-05-01T12:00:00Z");
        write_local(dir, "a", "local a", t);
        write_local(dir, "b", "local b", t);

        let store = MemoryStore::with_posts(vec![
            post("a", Some("2025-05-01T11:00:00Z"), Some("remote a")),
            post("c", Some("2025-05-01T12:00:00Z"), Some("remote c body")),
        ]);

        let report = SyncEngine::new(&store, dir, false).run().unwrap();

        assert_eq!(report.decision_for("a"), Some(Decision::UpdateRemote));
        assert_eq!(report.decision_for("b"), Some(Decision::CreateRemote));
        assert_eq!(report.decision_for("c"), Some(Decision::DownloadLocal));
        assert_eq!(report.failed(), 0);

        assert_eq!(
            store.mutations(),
            vec![
                Call::Update("a".to_string(), "local a".to_string()),
                Call::Create("local b".to_string()),
            ]
        );
        assert!(store.calls().contains(&Call::Get("c".to_string())));
        assert_eq!(fs::read_to_string(dir.join("c.md")).unwrap(), "remote c body");
    }

    #[test]
    fn test_sync_newer_remote_makes_no_calls() {
        let temp_dir = TempDir::new().unwrap();
        let t = at("2025-05-01T12:00:00Z");
        write_local(temp_dir.path(), "static", "content", t - Duration::hours(1));

        let store = MemoryStore::with_posts(vec![post("static", Some("2025-05-01T12:00:00Z"), None)]);
        let report = SyncEngine::new(&store, temp_dir.path(), false).run().unwrap();

        assert_eq!(report.skipped(), 1);
        assert_eq!(store.calls(), vec![Call::List]);
    }

    #[test]
    fn test_dry_run_matches_live_decisions_without_mutation() {
        let setup = || {
            let temp_dir = TempDir::new().unwrap();
            let t = at("2025-05-01T12:00:00Z");
            write_local(temp_dir.path(), "a", "local a", t);
            write_local(temp_dir.path(), "b", "local b", t);
            let store = MemoryStore::with_posts(vec![
                post("a", Some("2025-05-01T11:00:00Z"), Some("remote a")),
                post("c", Some("2025-05-01T12:00:00Z"), Some("remote c")),
            ]);
            (temp_dir, store)
        };

        let (live_dir, live_store) = setup();
        let live = SyncEngine::new(&live_store, live_dir.path(), false).run().unwrap();

        let (dry_dir, dry_store) = setup();
        let dry = SyncEngine::new(&dry_store, dry_dir.path(), true).run().unwrap();

        let live_decisions: Vec<_> = live.actions.iter().map(|a| (&a.slug, a.decision)).collect();
        let dry_decisions: Vec<_> = dry.actions.iter().map(|a| (&a.slug, a.decision)).collect();
        assert_eq!(live_decisions, dry_decisions);

        assert!(dry.dry_run);
        assert!(dry.actions.iter().all(|a| a.outcome == Outcome::Simulated));
        assert_eq!(dry_store.calls(), vec![Call::List]);
        assert!(!dry_dir.path().join("c.md").exists());
    }

    #[test]
    fn test_list_failure_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        write_local(temp_dir.path(), "a", "x", Utc::now());

        let store = MemoryStore {
            fail_list: true,
            ..MemoryStore::default()
        };
        let result = SyncEngine::new(&store, temp_dir.path(), false).run();

        assert!(matches!(result, Err(Error::Api(_))));
        assert_eq!(store.calls(), vec![Call::List]);
    }

    #[test]
    fn test_duplicate_slugs_abort_before_any_request() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::create_dir_all(dir.join("sub")).unwrap();
        write_local(dir, "a", "top", Utc::now());
        write_local(&dir.join("sub"), "a", "nested", Utc::now());

        let store = MemoryStore::with_posts(vec![post("c", Some("2025-05-01T12:00:00Z"), Some("c"))]);
        let result = SyncEngine::new(&store, dir, false).run();

        assert!(matches!(result, Err(Error::DuplicateSlug { slug, .. }) if slug == "a"));
        assert!(store.calls().is_empty());
        assert!(!dir.join("c.md").exists());
    }

    #[test]
    fn test_missing_directory_aborts_before_any_request() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("typo");

        let store = MemoryStore::with_posts(vec![post("c", Some("2025-05-01T12:00:00Z"), Some("c"))]);
        let result = SyncEngine::new(&store, &missing, false).run();

        assert!(matches!(result, Err(Error::FileNotFound { .. })));
        assert!(store.calls().is_empty());
        assert!(!missing.exists());
    }

    #[test]
    fn test_per_slug_failure_continues() {
        let temp_dir = TempDir::new().unwrap();
        let t = at("2025-05-01T12:00:00Z");
        write_local(temp_dir.path(), "broken", "slug: broken\n", t);
        write_local(temp_dir.path(), "fine", "slug: fine\n", t);

        let mut store = MemoryStore::with_posts(vec![post("remote", Some("2025-05-01T12:00:00Z"), Some("r"))]);
        store.fail_slugs.insert("broken".to_string());

        let report = SyncEngine::new(&store, temp_dir.path(), false).run().unwrap();

        assert_eq!(report.failed(), 1);
        assert_eq!(report.created(), 1);
        assert_eq!(report.downloaded(), 1);
        assert!(matches!(report.actions[0].outcome, Outcome::Failed(_)));
        assert_eq!(report.actions[1].outcome, Outcome::Done);
    }

    #[test]
    fn test_unsafe_remote_slug_is_not_written() {
        let temp_dir = TempDir::new().unwrap();
        let store = MemoryStore::with_posts(vec![post("../escape", Some("2025-05-01T12:00:00Z"), Some("x"))]);

        let report = SyncEngine::new(&store, temp_dir.path(), false).run().unwrap();

        assert_eq!(report.failed(), 1);
        assert!(!store.calls().contains(&Call::Get("../escape".to_string())));
    }

    #[test]
    fn test_empty_local_and_remote() {
        let temp_dir = TempDir::new().unwrap();
        let store = MemoryStore::default();

        let report = SyncEngine::new(&store, temp_dir.path(), false).run().unwrap();

        assert!(report.actions.is_empty());
        assert_eq!(store.calls(), vec![Call::List]);
    }
}
