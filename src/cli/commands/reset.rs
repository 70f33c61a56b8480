//! reset command - Move the current branch to a commit

use super::Workspace;
use crate::engine::Context;
use anyhow::Result;

pub fn reset(ctx: &Context, commit: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    ws.repo.reset(commit)?;
    Ok(())
}
