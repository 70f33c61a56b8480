//! engine::merge
//!
//! The `merge` command.
//!
//! # Flow
//!
//! 1. Check preconditions (branch exists, clean index, not self, no
//!    untracked file in the way)
//! 2. Resolve the split point; fast-forward or stop if already merged
//! 3. Plan the three-way merge and apply it through the index
//! 4. Commit with both heads as parents
//!
//! Conflicts do not stop the merge. Conflicted files are written with
//! markers, staged and committed like any other change.

use chrono::Utc;

use super::{RepoError, Repository};
use crate::core::commit::Commit;
use crate::core::graph::{self, SplitPoint};
use crate::core::index::Index;
use crate::core::merge::{conflict_contents, plan_merge, MergeAction};
use crate::core::types::{BranchName, ObjectId};
use crate::worktree::WorkTree;

/// Result of a completed merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The new merge commit.
    pub commit: ObjectId,
    /// Whether any file was written with conflict markers.
    pub conflicted: bool,
}

impl<W: WorkTree> Repository<W> {
    /// Merge branch `name` into the current branch.
    ///
    /// # Errors
    ///
    /// - [`RepoError::NoSuchBranch`] if `name` does not exist
    /// - [`RepoError::UncommittedChanges`] if the index is not empty
    /// - [`RepoError::SelfMerge`] if `name` is the current branch
    /// - [`RepoError::UntrackedObstruction`] if an untracked file is in the way
    /// - [`RepoError::AlreadyAncestor`] if `name` is already merged
    /// - [`RepoError::FastForwarded`] after fast-forwarding the current branch
    pub fn merge(&self, name: &str) -> Result<MergeOutcome, RepoError> {
        let other_branch = BranchName::new(name).map_err(|_| RepoError::NoSuchBranch)?;
        let (other_id, other) = self
            .branch_commit(&other_branch)?
            .ok_or(RepoError::NoSuchBranch)?;

        let current_branch = self.current_branch()?;
        let mut index = Index::load(self.paths(), &current_branch)?;
        if !index.is_empty() {
            return Err(RepoError::UncommittedChanges);
        }
        if other_branch == current_branch {
            return Err(RepoError::SelfMerge);
        }

        let (head_id, head) = self.head()?;
        self.check_untracked(&head, &other)?;

        let split_id = match graph::find_split_point(&self.objects(), &head_id, &other_id)? {
            SplitPoint::FastForward => {
                self.sync_worktree(&head, &other)?;
                self.refs().set_branch(&current_branch, &other_id)?;
                tracing::info!(branch = %current_branch, commit = %other_id, "fast-forwarded");
                return Err(RepoError::FastForwarded);
            }
            SplitPoint::Common(oid) => oid,
        };
        let split = self.objects().get_commit(&split_id)?;
        tracing::debug!(split = %split_id, other = %other_branch, "found split point");

        let plan = plan_merge(head.tracked(), other.tracked(), split.tracked());
        let store = self.objects();
        for action in &plan.actions {
            match action {
                MergeAction::Take { path, blob } => {
                    let bytes = store.get(blob)?;
                    self.work_tree().write(path, &bytes)?;
                    index.stage(path.clone(), blob.clone(), head.tracked().get(path));
                }
                MergeAction::Remove { path } => {
                    index.remove(path, true)?;
                    self.work_tree().delete(path)?;
                }
                MergeAction::Conflict {
                    path,
                    current,
                    other,
                } => {
                    let current = current.as_ref().map(|oid| store.get(oid)).transpose()?;
                    let other = other.as_ref().map(|oid| store.get(oid)).transpose()?;
                    let contents = conflict_contents(current.as_deref(), other.as_deref());
                    let oid = store.put(&contents)?;
                    self.work_tree().write(path, &contents)?;
                    index.stage(path.clone(), oid, head.tracked().get(path));
                    tracing::debug!(path = %path, "merge conflict");
                }
            }
        }

        let message = format!("Merged {other_branch} into {current_branch}.");
        let commit = Commit::merge(&message, Utc::now(), &head_id, &head, &other_id, &index)?;
        let oid = store.put_commit(&commit)?;
        self.refs().set_branch(&current_branch, &oid)?;
        Index::clear(self.paths(), &current_branch)?;

        let conflicted = plan.has_conflict();
        tracing::info!(commit = %oid, conflicted, "merged");
        Ok(MergeOutcome {
            commit: oid,
            conflicted,
        })
    }
}
