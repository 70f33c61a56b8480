//! merge command - Merge a branch into the current branch

use super::{verbosity, Workspace};
use crate::engine::{Context, MergeOutcome};
use crate::ui::output;
use anyhow::Result;

pub fn merge(ctx: &Context, branch: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let outcome = ws.repo.merge(branch)?;
    report(ctx, &outcome);
    Ok(())
}

/// Tell the user about conflicts left in the work tree.
pub(super) fn report(ctx: &Context, outcome: &MergeOutcome) {
    if outcome.conflicted {
        output::print("Encountered a merge conflict.", verbosity(ctx));
    }
}
