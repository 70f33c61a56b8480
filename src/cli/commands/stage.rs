//! add and rm commands - Change what the next commit will record

use super::Workspace;
use crate::engine::{Context, RepoError};
use anyhow::Result;

/// Stage `file` for the next commit.
pub fn add(ctx: &Context, file: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let path = ws.path(file).map_err(|_| RepoError::FileNotFound)?;
    ws.repo.add(&path)?;
    Ok(())
}

/// Unstage `file`, or stop tracking and delete it.
pub fn rm(ctx: &Context, file: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let path = ws.path(file).map_err(|_| RepoError::NothingToRemove)?;
    ws.repo.remove(&path)?;
    Ok(())
}
