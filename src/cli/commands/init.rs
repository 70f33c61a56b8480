//! init command - Create a repository in the current directory

use crate::core::config::Config;
use crate::engine::{Context, Repository};
use anyhow::Result;

/// Create `.twig` in the starting directory.
///
/// The global config is consulted for the default branch name.
pub fn init(ctx: &Context) -> Result<()> {
    let dir = super::start_dir(ctx)?;
    let config = Config::load(None)?;
    Repository::init(&dir, config)?;
    Ok(())
}
