//! core::index
//!
//! The staging area, kept apart from commits.
//!
//! # Architecture
//!
//! Each branch owns one [`Index`] holding the changes queued for its next
//! commit:
//! - `staged` - paths to add or update, with their new blob ids
//! - `untracked` - paths to drop from the snapshot
//!
//! The index is stored as JSON at `.twig/index/<branch>.json`. A missing
//! file is an empty index. Commits never carry index state, so staging a
//! file never rewrites a stored commit.
//!
//! # Invariants
//!
//! - `staged` never contains an entry equal to what HEAD already tracks
//! - A path is never both staged and queued for removal

use std::collections::{BTreeMap, BTreeSet};
use std::fs;

use serde::{Deserialize, Serialize};

use crate::core::commit::CommitError;
use crate::core::paths::RepoPaths;
use crate::core::store::{write_atomic, StoreError};
use crate::core::types::{BranchName, ObjectId, RepoPath};

/// Pending changes for the next commit on a branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Index {
    staged: BTreeMap<RepoPath, ObjectId>,
    untracked: BTreeSet<RepoPath>,
}

impl Index {
    /// Load the index for `branch`, or an empty one if none is stored.
    pub fn load(paths: &RepoPaths, branch: &BranchName) -> Result<Self, StoreError> {
        let path = paths.index_path(branch);
        match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
                what: path.display().to_string(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Persist the index for `branch`. An empty index removes the file.
    pub fn save(&self, paths: &RepoPaths, branch: &BranchName) -> Result<(), StoreError> {
        if self.is_empty() {
            return Self::clear(paths, branch);
        }
        let path = paths.index_path(branch);
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        write_atomic(&path, &json).map_err(|source| StoreError::Io { path, source })
    }

    /// Drop all pending changes for `branch`.
    pub fn clear(paths: &RepoPaths, branch: &BranchName) -> Result<(), StoreError> {
        let path = paths.index_path(branch);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty() && self.untracked.is_empty()
    }

    pub fn staged(&self) -> &BTreeMap<RepoPath, ObjectId> {
        &self.staged
    }

    /// Paths queued for removal in the next commit.
    pub fn untracked(&self) -> &BTreeSet<RepoPath> {
        &self.untracked
    }

    /// Stage `oid` as the new content of `path`.
    ///
    /// If `oid` equals `head_tracked` (what HEAD already records for the
    /// path), any staged entry is dropped instead: re-adding an unchanged
    /// file is a no-op on the index.
    pub fn stage(&mut self, path: RepoPath, oid: ObjectId, head_tracked: Option<&ObjectId>) {
        if head_tracked == Some(&oid) {
            self.staged.remove(&path);
        } else {
            self.untracked.remove(&path);
            self.staged.insert(path, oid);
        }
    }

    /// Cancel a pending removal of `path`.
    ///
    /// Returns `true` if `path` was queued for removal.
    pub fn restore(&mut self, path: &RepoPath) -> bool {
        self.untracked.remove(path)
    }

    /// Unstage `path` and, if HEAD tracks it, queue it for removal.
    ///
    /// Returns `true` when the path was queued for removal, meaning the
    /// caller should delete the working copy.
    ///
    /// # Errors
    ///
    /// [`CommitError::NothingToRemove`] if the path is neither staged nor tracked.
    pub fn remove(&mut self, path: &RepoPath, tracked_by_head: bool) -> Result<bool, CommitError> {
        let was_staged = self.staged.remove(path).is_some();
        if !was_staged && !tracked_by_head {
            return Err(CommitError::NothingToRemove);
        }
        if tracked_by_head {
            self.untracked.insert(path.clone());
        }
        Ok(tracked_by_head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn path(p: &str) -> RepoPath {
        RepoPath::new(p).unwrap()
    }

    #[test]
    fn stage_new_file() {
        let mut index = Index::default();
        index.stage(path("a"), ObjectId::hash_bytes(b"1"), None);
        assert_eq!(index.staged().len(), 1);
        assert!(!index.is_empty());
    }

    #[test]
    fn stage_unchanged_file_is_noop() {
        let oid = ObjectId::hash_bytes(b"1");
        let mut index = Index::default();
        index.stage(path("a"), oid.clone(), Some(&oid));
        assert!(index.is_empty());
    }

    #[test]
    fn restaging_original_content_clears_entry() {
        let original = ObjectId::hash_bytes(b"1");
        let mut index = Index::default();
        index.stage(path("a"), ObjectId::hash_bytes(b"2"), Some(&original));
        assert_eq!(index.staged().len(), 1);
        index.stage(path("a"), original.clone(), Some(&original));
        assert!(index.staged().is_empty());
    }

    #[test]
    fn remove_tracked_queues_removal() {
        let mut index = Index::default();
        assert!(index.remove(&path("a"), true).unwrap());
        assert!(index.untracked().contains(&path("a")));
    }

    #[test]
    fn remove_staged_only_unstages() {
        let mut index = Index::default();
        index.stage(path("a"), ObjectId::hash_bytes(b"1"), None);
        assert!(!index.remove(&path("a"), false).unwrap());
        assert!(index.is_empty());
    }

    #[test]
    fn remove_unknown_fails() {
        let mut index = Index::default();
        assert_eq!(
            index.remove(&path("a"), false).unwrap_err(),
            CommitError::NothingToRemove
        );
    }

    #[test]
    fn restore_cancels_removal() {
        let mut index = Index::default();
        index.remove(&path("a"), true).unwrap();
        assert!(index.restore(&path("a")));
        assert!(!index.restore(&path("a")));
        assert!(index.is_empty());
    }

    #[test]
    fn persistence_roundtrip() {
        let temp = TempDir::new().unwrap();
        let paths = RepoPaths::for_work_dir(temp.path());
        paths.ensure_dirs().unwrap();
        let branch = BranchName::new("master").unwrap();

        assert!(Index::load(&paths, &branch).unwrap().is_empty());

        let mut index = Index::default();
        index.stage(path("dir/a"), ObjectId::hash_bytes(b"1"), None);
        index.remove(&path("b"), true).unwrap();
        index.save(&paths, &branch).unwrap();

        assert_eq!(Index::load(&paths, &branch).unwrap(), index);

        Index::clear(&paths, &branch).unwrap();
        assert!(Index::load(&paths, &branch).unwrap().is_empty());
    }

    #[test]
    fn saving_empty_index_removes_file() {
        let temp = TempDir::new().unwrap();
        let paths = RepoPaths::for_work_dir(temp.path());
        paths.ensure_dirs().unwrap();
        let branch = BranchName::new("master").unwrap();

        let mut index = Index::default();
        index.stage(path("a"), ObjectId::hash_bytes(b"1"), None);
        index.save(&paths, &branch).unwrap();
        assert!(paths.index_path(&branch).exists());

        Index::default().save(&paths, &branch).unwrap();
        assert!(!paths.index_path(&branch).exists());
    }

    #[test]
    fn remote_tracking_branch_index_nests() {
        let temp = TempDir::new().unwrap();
        let paths = RepoPaths::for_work_dir(temp.path());
        paths.ensure_dirs().unwrap();
        let branch = BranchName::new("origin/master").unwrap();

        let mut index = Index::default();
        index.stage(path("a"), ObjectId::hash_bytes(b"1"), None);
        index.save(&paths, &branch).unwrap();
        assert_eq!(Index::load(&paths, &branch).unwrap(), index);
    }
}
