//! status command - Show branch, index and work tree state

use super::{verbosity, Workspace};
use crate::engine::Context;
use crate::ui::format::format_status;
use crate::ui::output;
use anyhow::Result;

pub fn status(ctx: &Context) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let report = ws.repo.status()?;
    output::print(format_status(&report).trim_end_matches('\n'), verbosity(ctx));
    Ok(())
}
