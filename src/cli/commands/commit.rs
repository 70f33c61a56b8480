//! commit command - Record staged changes

use super::Workspace;
use crate::engine::Context;
use anyhow::Result;

/// Commit the index with `message`.
///
/// A missing message is treated like an empty one.
pub fn commit(ctx: &Context, message: Option<&str>) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    ws.repo.commit(message.unwrap_or_default())?;
    Ok(())
}
