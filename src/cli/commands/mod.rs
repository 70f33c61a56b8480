//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the repository from the context's directory
//! 2. Converts file operands to repository paths
//! 3. Calls the engine to execute the command
//! 4. Formats and displays output
//!
//! Handlers do NOT perform repository mutations directly.

mod branch;
mod checkout;
mod commit;
mod find;
mod init;
mod log_cmd;
mod merge;
mod remote;
mod reset;
mod stage;
mod status;

pub use branch::{branch, rm_branch};
pub use checkout::checkout;
pub use commit::commit;
pub use find::find;
pub use init::init;
pub use log_cmd::{global_log, log};
pub use merge::merge;
pub use remote::{add_remote, fetch, pull, push, rm_remote};
pub use reset::reset;
pub use stage::{add, rm};
pub use status::status;

use std::path::{Component, Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::args::Command;
use crate::core::types::{RepoPath, TypeError};
use crate::engine::{Context, Repository};
use crate::ui::output::Verbosity;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Init => init::init(ctx),
        Command::Add { file } => stage::add(ctx, &file),
        Command::Commit { message } => commit::commit(ctx, message.as_deref()),
        Command::Rm { file } => stage::rm(ctx, &file),
        Command::Log => log_cmd::log(ctx),
        Command::GlobalLog => log_cmd::global_log(ctx),
        Command::Find { message } => find::find(ctx, &message),
        Command::Status => status::status(ctx),
        Command::Checkout { target, file } => {
            checkout::checkout(ctx, target.as_deref(), file.as_deref())
        }
        Command::Branch { name } => branch::branch(ctx, &name),
        Command::RmBranch { name } => branch::rm_branch(ctx, &name),
        Command::Reset { commit } => reset::reset(ctx, &commit),
        Command::Merge { branch } => merge::merge(ctx, &branch),
        Command::AddRemote { name, path } => remote::add_remote(ctx, &name, &path),
        Command::RmRemote { name } => remote::rm_remote(ctx, &name),
        Command::Push { remote, branch } => remote::push(ctx, &remote, &branch),
        Command::Fetch { remote, branch } => remote::fetch(ctx, &remote, &branch),
        Command::Pull { remote, branch } => remote::pull(ctx, &remote, &branch),
    }
}

/// An opened repository plus where the command was run from inside it.
pub(crate) struct Workspace {
    pub repo: Repository,
    /// Path of the starting directory relative to the work tree root.
    prefix: PathBuf,
}

impl Workspace {
    pub fn open(ctx: &Context) -> Result<Self> {
        let start = start_dir(ctx)?;
        let repo = Repository::open(&start)?;
        let prefix = start
            .strip_prefix(repo.paths().work_dir())
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self { repo, prefix })
    }

    /// Resolve a file operand given relative to the starting directory.
    pub fn path(&self, operand: &str) -> Result<RepoPath, TypeError> {
        to_repo_path(&self.prefix.join(operand))
    }
}

/// The absolute directory the command runs from.
pub(crate) fn start_dir(ctx: &Context) -> Result<PathBuf> {
    let dir = ctx
        .start_dir()
        .context("failed to determine working directory")?;
    std::path::absolute(&dir).with_context(|| format!("invalid directory '{}'", dir.display()))
}

pub(crate) fn verbosity(ctx: &Context) -> Verbosity {
    Verbosity::from_flags(ctx.quiet, ctx.debug)
}

fn to_repo_path(path: &Path) -> Result<RepoPath, TypeError> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return Err(TypeError::InvalidPath(path.display().to_string())),
        }
    }
    RepoPath::new(parts.join("/"))
}
