//! checkout command - Restore a file or switch branches
//!
//! Three forms:
//! - `checkout -- <file>` restores from the head commit
//! - `checkout <id> -- <file>` restores from commit `<id>`
//! - `checkout <branch>` switches branches

use super::Workspace;
use crate::engine::{Context, RepoError};
use anyhow::Result;

pub fn checkout(ctx: &Context, target: Option<&str>, file: Option<&str>) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    match (target, file) {
        (commit, Some(file)) => {
            let path = ws.path(file).map_err(|_| RepoError::FileNotInCommit)?;
            ws.repo.checkout_file(commit, &path)?;
        }
        (Some(branch), None) => ws.repo.checkout_branch(branch)?,
        (None, None) => return Err(RepoError::UsageError.into()),
    }
    Ok(())
}
