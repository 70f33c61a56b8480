//! ui::format
//!
//! Text rendering for `log`, `global-log` and `status`.

use std::fmt::{Display, Write as _};

use chrono::TimeZone;

use crate::core::commit::Commit;
use crate::core::types::ObjectId;
use crate::engine::StatusReport;

/// Date layout used in log entries, e.g. `Thu Jan 1 00:00:00 1970 +0000`.
pub const LOG_DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Render one log entry, with its date shown in `tz`.
///
/// ```text
/// ===
/// commit <id>
/// Merge: <parent> <second parent>
/// Date: <date>
/// <message>
///
/// ```
///
/// The `Merge:` line appears only for merge commits, with parent ids
/// abbreviated to `abbrev` characters.
pub fn format_log_entry<Tz>(oid: &ObjectId, commit: &Commit, abbrev: usize, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    let _ = writeln!(out, "===");
    let _ = writeln!(out, "commit {oid}");
    if let (Some(first), Some(second)) = (commit.parent(), commit.second_parent()) {
        let _ = writeln!(out, "Merge: {} {}", first.short(abbrev), second.short(abbrev));
    }
    let date = commit.timestamp().with_timezone(tz);
    let _ = writeln!(out, "Date: {}", date.format(LOG_DATE_FORMAT));
    let _ = writeln!(out, "{}", commit.message());
    out
}

/// Render a status report as its five sections.
pub fn format_status(report: &StatusReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Branches ===");
    for branch in &report.branches {
        let marker = if branch == &report.current { "*" } else { "" };
        let _ = writeln!(out, "{marker}{branch}");
    }
    let _ = writeln!(out);

    section(&mut out, "Staged Files", &report.staged);
    section(&mut out, "Removed Files", &report.removed);

    let _ = writeln!(out, "=== Modifications Not Staged For Commit ===");
    for (path, kind) in &report.modified {
        let _ = writeln!(out, "{path} ({kind})");
    }
    let _ = writeln!(out);

    section(&mut out, "Untracked Files", &report.untracked);
    out
}

fn section<T: Display>(out: &mut String, title: &str, items: &[T]) {
    let _ = writeln!(out, "=== {title} ===");
    for item in items {
        let _ = writeln!(out, "{item}");
    }
    let _ = writeln!(out);
}
