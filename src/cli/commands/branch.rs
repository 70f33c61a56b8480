//! branch and rm-branch commands - Manage branch pointers

use super::Workspace;
use crate::engine::Context;
use anyhow::Result;

/// Create branch `name` at the current head.
pub fn branch(ctx: &Context, name: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    ws.repo.create_branch(name)?;
    Ok(())
}

/// Delete branch `name`.
pub fn rm_branch(ctx: &Context, name: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    ws.repo.remove_branch(name)?;
    Ok(())
}
