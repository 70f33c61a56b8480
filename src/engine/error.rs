//! engine::error
//!
//! User-facing repository errors.
//!
//! Every variant's `Display` is the exact message printed to the user.
//! Lower layers keep their own error types; storage and I/O failures are
//! wrapped transparently so their messages pass through unchanged.

use thiserror::Error;

use crate::core::commit::CommitError;
use crate::core::config::ConfigError;
use crate::core::graph::SplitError;
use crate::core::store::StoreError;
use crate::core::types::TypeError;
use crate::worktree::WorkTreeError;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Incorrect operands.")]
    UsageError,

    #[error("Not in an initialized twig directory.")]
    NotInitialized,

    #[error("A twig version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("File does not exist.")]
    FileNotFound,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("A branch with that name does not exist.")]
    NoSuchBranch,

    #[error("No such branch exists.")]
    CheckoutNoSuchBranch,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,

    #[error("No need to checkout the current branch.")]
    CannotCheckoutCurrentBranch,

    #[error("No commit with that id exists.")]
    NoSuchCommit,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("There is an untracked file in the way; delete it or add it first.")]
    UntrackedObstruction,

    #[error("Given branch is an ancestor of the current branch.")]
    AlreadyAncestor,

    #[error("Current branch fast-forwarded.")]
    FastForwarded,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("Given branch shares no history with the current branch.")]
    UnrelatedHistories,

    #[error("A remote with that name does not exist.")]
    RemoteNotFound,

    #[error("Remote directory not found.")]
    RemoteDirectoryNotFound,

    #[error("A remote with that name already exists.")]
    RemoteExists,

    #[error("That remote does not have that branch.")]
    RemoteBranchNotFound,

    #[error("Please pull down remote changes before pushing.")]
    DivergedHistory,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    WorkTree(#[from] WorkTreeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Type(#[from] TypeError),
}

impl From<CommitError> for RepoError {
    fn from(err: CommitError) -> Self {
        match err {
            CommitError::EmptyMessage => RepoError::EmptyMessage,
            CommitError::NothingToCommit => RepoError::NothingToCommit,
            CommitError::NothingToRemove => RepoError::NothingToRemove,
        }
    }
}

impl From<SplitError> for RepoError {
    fn from(err: SplitError) -> Self {
        match err {
            SplitError::AlreadyAncestor => RepoError::AlreadyAncestor,
            SplitError::UnrelatedHistories => RepoError::UnrelatedHistories,
            SplitError::Store(e) => RepoError::Store(e),
        }
    }
}
