//! Sync report display.

use colored::Colorize;

use crate::sync::types::{Decision, Outcome, SkipReason, SyncAction, SyncReport};

/// Decision line for one action, identical in live and dry runs.
#[must_use]
pub fn decision_line(action: &SyncAction) -> String {
    let slug = &action.slug;
    match action.decision {
        Decision::CreateRemote => format!("create remote post '{slug}'"),
        Decision::UpdateRemote => format!("update remote post '{slug}'"),
        Decision::DownloadLocal => format!("download remote post '{slug}'"),
        Decision::Skip(SkipReason::UpToDate) => format!("skip '{slug}' (remote is up to date)"),
        Decision::Skip(SkipReason::NoRemoteTimestamp) => {
            format!("skip '{slug}' (remote has no valid timestamp)")
        }
    }
}

/// Print the action log and totals to stdout.
///
/// Skipped slugs are only listed when `verbose` is set.
pub fn print_report(report: &SyncReport, verbose: bool) {
    if report.dry_run {
        println!("{}", "DRY RUN: no changes will be made".yellow());
    }

    for action in &report.actions {
        let line = decision_line(action);
        match &action.outcome {
            Outcome::Done => println!("  {} {line}", "✓".green()),
            Outcome::Simulated => println!("  {} {line}", "•".yellow()),
            Outcome::Unchanged if verbose => println!("  {}", line.dimmed()),
            Outcome::Unchanged => {}
            Outcome::Failed(message) => {
                println!("  {} {line}", "✗".red());
                println!("    {}", message.red());
            }
        }
    }

    if report.actions.is_empty() {
        println!("{}", "Nothing to sync.".dimmed());
        return;
    }

    println!();
    let summary = format!(
        "Sync complete: {} created, {} updated, {} downloaded, {} skipped",
        report.created(),
        report.updated(),
        report.downloaded(),
        report.skipped()
    );
    if report.failed() > 0 {
        println!("{summary}, {}", format!("{} failed", report.failed()).red());
    } else {
        println!("{}", summary.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn action(decision: Decision, outcome: Outcome) -> SyncAction {
        SyncAction {
            slug: "hello".to_string(),
            decision,
            path: PathBuf::from("hello.md"),
            outcome,
        }
    }

    #[test]
    fn test_decision_line_ignores_outcome() {
        let live = action(Decision::CreateRemote, Outcome::Done);
        let dry = action(Decision::CreateRemote, Outcome::Simulated);
        assert_eq!(decision_line(&live), decision_line(&dry));
        assert_eq!(decision_line(&live), "create remote post 'hello'");
    }

    #[test]
    fn test_decision_line_skip_reasons() {
        let up_to_date = action(Decision::Skip(SkipReason::UpToDate), Outcome::Unchanged);
        let no_ts = action(Decision::Skip(SkipReason::NoRemoteTimestamp), Outcome::Unchanged);
        assert!(decision_line(&up_to_date).contains("up to date"));
        assert!(decision_line(&no_ts).contains("no valid timestamp"));
    }
}
