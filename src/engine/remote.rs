//! engine::remote
//!
//! Remotes and the `push`, `fetch` and `pull` commands.
//!
//! # Transport
//!
//! A remote is another repository's `.twig` directory on the local
//! filesystem. Both sides are plain [`ObjectStore`]s over their own
//! [`RepoPaths`], so transport is copying files between two stores.
//!
//! History is copied parents first, and each commit only after its blobs.
//! The branch ref on the receiving side moves last, so an interrupted
//! transfer leaves extra objects behind but never a dangling ref.

use std::path::{Path, PathBuf};

use super::{MergeOutcome, RepoError, Repository};
use crate::core::graph;
use crate::core::paths::RepoPaths;
use crate::core::refs::RefStore;
use crate::core::store::{ObjectStore, StoreError};
use crate::core::types::{BranchName, ObjectId, RemoteName};
use crate::worktree::WorkTree;

impl<W: WorkTree> Repository<W> {
    // =========================================================================
    // Remote records
    // =========================================================================

    /// Record `path` as the `.twig` directory of remote `name`.
    ///
    /// The path is stored as given. It does not need to exist yet.
    pub fn add_remote(&self, name: &str, path: &Path) -> Result<(), RepoError> {
        let remote = RemoteName::new(name)?;
        if self.refs().remote(&remote)?.is_some() {
            return Err(RepoError::RemoteExists);
        }
        self.refs().add_remote(&remote, path)?;
        tracing::info!(remote = %remote, path = %path.display(), "added remote");
        Ok(())
    }

    pub fn remove_remote(&self, name: &str) -> Result<(), RepoError> {
        let remote = RemoteName::new(name).map_err(|_| RepoError::RemoteNotFound)?;
        if !self.refs().remove_remote(&remote)? {
            return Err(RepoError::RemoteNotFound);
        }
        tracing::info!(remote = %remote, "removed remote");
        Ok(())
    }

    /// Store handle for remote `name`.
    ///
    /// Relative remote paths are resolved against the work tree root.
    fn remote_paths(&self, name: &str) -> Result<(RemoteName, RepoPaths), RepoError> {
        let remote = RemoteName::new(name).map_err(|_| RepoError::RemoteNotFound)?;
        let recorded = self
            .refs()
            .remote(&remote)?
            .ok_or(RepoError::RemoteNotFound)?;
        let meta_dir: PathBuf = if recorded.is_absolute() {
            recorded
        } else {
            self.paths().work_dir().join(recorded)
        };
        if !meta_dir.is_dir() {
            return Err(RepoError::RemoteDirectoryNotFound);
        }
        Ok((remote, RepoPaths::new(meta_dir)))
    }

    // =========================================================================
    // Transfer
    // =========================================================================

    /// Copy the current head's history to `branch` on remote `name` and
    /// advance that branch.
    ///
    /// The remote branch is created if missing. The remote's work tree is
    /// not touched.
    ///
    /// # Errors
    ///
    /// [`RepoError::DivergedHistory`] if the remote branch head is not in
    /// the local head's history.
    pub fn push(&self, name: &str, branch: &str) -> Result<(), RepoError> {
        let (remote, remote_paths) = self.remote_paths(name)?;
        let branch = BranchName::new(branch)?;
        let (head_id, _) = self.head()?;

        let remote_refs = RefStore::new(&remote_paths);
        if let Some(remote_head) = remote_refs.branch_head(&branch)? {
            if !graph::ancestors(&self.objects(), &head_id)?.contains(&remote_head) {
                return Err(RepoError::DivergedHistory);
            }
        }

        let copied = copy_history(&self.objects(), &ObjectStore::new(&remote_paths), &head_id)?;
        remote_refs.set_branch(&branch, &head_id)?;
        tracing::info!(remote = %remote, branch = %branch, commit = %head_id, copied, "pushed");
        Ok(())
    }

    /// Copy `branch` from remote `name` and point `<name>/<branch>` at it.
    ///
    /// Returns the name of the remote-tracking branch.
    pub fn fetch(&self, name: &str, branch: &str) -> Result<BranchName, RepoError> {
        let (remote, remote_paths) = self.remote_paths(name)?;
        let branch = BranchName::new(branch).map_err(|_| RepoError::RemoteBranchNotFound)?;
        let remote_head = RefStore::new(&remote_paths)
            .branch_head(&branch)?
            .ok_or(RepoError::RemoteBranchNotFound)?;

        let tracking = BranchName::remote_tracking(&remote, &branch);
        if self.refs().name_collides(&tracking) {
            return Err(RepoError::BranchExists);
        }
        let copied = copy_history(
            &ObjectStore::new(&remote_paths),
            &self.objects(),
            &remote_head,
        )?;
        self.refs().set_branch(&tracking, &remote_head)?;
        tracing::info!(branch = %tracking, commit = %remote_head, copied, "fetched");
        Ok(tracking)
    }

    /// Fetch, then merge the remote-tracking branch into the current branch.
    pub fn pull(&self, name: &str, branch: &str) -> Result<MergeOutcome, RepoError> {
        let tracking = self.fetch(name, branch)?;
        self.merge(tracking.as_str())
    }
}

/// Copy every commit reachable from `head` that `dst` lacks, with its blobs.
///
/// Returns the number of commits copied.
fn copy_history(
    src: &ObjectStore<'_>,
    dst: &ObjectStore<'_>,
    head: &ObjectId,
) -> Result<usize, StoreError> {
    let missing = graph::missing_ancestry(src, head, |oid| dst.has_commit(oid))?;
    for oid in &missing {
        let commit = src.get_commit(oid)?;
        for blob in commit.tracked().values() {
            if !dst.exists(blob) {
                dst.put(&src.get(blob)?)?;
            }
        }
        let written = dst.put_commit(&commit)?;
        if &written != oid {
            return Err(StoreError::Corrupt {
                what: format!("commit {oid}"),
                message: format!("re-encodes to {written}"),
            });
        }
        tracing::trace!(commit = %oid, "copied commit");
    }
    Ok(missing.len())
}
