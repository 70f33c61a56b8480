//! log and global-log commands - Display commit history

use chrono::Local;

use super::{verbosity, Workspace};
use crate::core::commit::Commit;
use crate::core::types::ObjectId;
use crate::engine::Context;
use crate::ui::format::format_log_entry;
use crate::ui::output;
use anyhow::Result;

/// Show the first-parent history of the current head.
pub fn log(ctx: &Context) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let history = ws.repo.log()?;
    print_entries(ctx, &history, ws.repo.config().log_abbrev());
    Ok(())
}

/// Show every stored commit.
pub fn global_log(ctx: &Context) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let commits = ws.repo.global_log()?;
    print_entries(ctx, &commits, ws.repo.config().log_abbrev());
    Ok(())
}

fn print_entries(ctx: &Context, entries: &[(ObjectId, Commit)], abbrev: usize) {
    let text: String = entries
        .iter()
        .map(|(oid, commit)| format_log_entry(oid, commit, abbrev, &Local) + "\n")
        .collect();
    output::print(text.trim_end_matches('\n'), verbosity(ctx));
}
