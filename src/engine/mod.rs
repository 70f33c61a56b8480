//! engine
//!
//! Repository commands.
//!
//! # Architecture
//!
//! The engine sits between the CLI and the core store. A [`Repository`]
//! owns the store handle, the work tree and the loaded configuration, and
//! exposes one method per command:
//!
//! - [`repository`]: init/open, add, commit, rm, history, checkout, branches, reset
//! - [`merge`]: three-way merge of another branch
//! - [`status`]: branch, index and work tree report
//! - [`remote`]: remote records, push, fetch and pull
//!
//! Every failure a user can cause is a [`RepoError`] variant whose message
//! is printed verbatim.
//!
//! # Invariants
//!
//! - Objects are written before the refs that name them
//! - A failed precondition leaves the repository and work tree unchanged
//!
//! # Example
//!
//! ```
//! use twig::core::config::Config;
//! use twig::core::types::RepoPath;
//! use twig::engine::Repository;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let repo = Repository::init(dir.path(), Config::default()).unwrap();
//!
//! std::fs::write(dir.path().join("hello.txt"), "hi").unwrap();
//! repo.add(&RepoPath::new("hello.txt").unwrap()).unwrap();
//! repo.commit("say hi").unwrap();
//! assert_eq!(repo.log().unwrap().len(), 2);
//! ```

pub mod error;
pub mod merge;
pub mod remote;
pub mod repository;
pub mod status;

pub use error::RepoError;
pub use merge::MergeOutcome;
pub use repository::Repository;
pub use status::{Modification, StatusReport};

use std::path::PathBuf;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// The directory commands run from: `--cwd` if given, else the process
    /// working directory.
    pub fn start_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}
