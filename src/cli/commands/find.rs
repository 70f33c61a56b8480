//! find command - Look up commits by message

use super::{verbosity, Workspace};
use crate::engine::Context;
use crate::ui::output;
use anyhow::Result;

/// Print the id of every commit whose message is exactly `message`.
pub fn find(ctx: &Context, message: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let ids = ws.repo.find(message)?;
    output::print(output::format_list(&ids, ""), verbosity(ctx));
    Ok(())
}
