//! Remote commands - add-remote, rm-remote, push, fetch, pull

use std::path::Path;

use super::Workspace;
use crate::engine::Context;
use anyhow::Result;

/// Record `path` as remote `name`.
pub fn add_remote(ctx: &Context, name: &str, path: &Path) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    ws.repo.add_remote(name, path)?;
    Ok(())
}

pub fn rm_remote(ctx: &Context, name: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    ws.repo.remove_remote(name)?;
    Ok(())
}

pub fn push(ctx: &Context, remote: &str, branch: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    ws.repo.push(remote, branch)?;
    Ok(())
}

pub fn fetch(ctx: &Context, remote: &str, branch: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    ws.repo.fetch(remote, branch)?;
    Ok(())
}

/// Fetch `branch` from `remote` and merge it into the current branch.
pub fn pull(ctx: &Context, remote: &str, branch: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let outcome = ws.repo.pull(remote, branch)?;
    super::merge::report(ctx, &outcome);
    Ok(())
}
