//! core::commit
//!
//! Immutable commit snapshots.
//!
//! # Architecture
//!
//! A commit records the full map of tracked paths to blob ids. Unchanged
//! files are shared by reference: a child commit copies its parent's
//! `path -> blob id` entries, never the blob contents, so lookups never need
//! to walk ancestry.
//!
//! Staged and removed paths are not part of a commit. They live in the
//! branch's [`Index`](crate::core::index::Index), which is folded into the
//! next commit when it is built.
//!
//! # Identity
//!
//! A commit's id is the SHA-256 of its canonical JSON serialization. Tracked
//! paths are kept in a `BTreeMap`, so the same snapshot always serializes to
//! the same bytes.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use twig::core::commit::Commit;
//! use twig::core::index::Index;
//! use twig::core::types::{ObjectId, RepoPath};
//!
//! let root = Commit::root();
//! let root_id = root.id().unwrap();
//!
//! let mut index = Index::default();
//! index.stage(RepoPath::new("a.txt").unwrap(), ObjectId::hash_bytes(b"a"), None);
//!
//! let child = Commit::child("add a", Utc::now(), &root_id, &root, &index).unwrap();
//! assert_eq!(child.parent(), Some(&root_id));
//! assert_eq!(child.tracked().len(), 1);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::index::Index;
use crate::core::types::{ObjectId, RepoPath};

/// Message of the root commit created by `init`.
pub const ROOT_MESSAGE: &str = "initial commit";

/// Map of tracked paths to blob ids.
pub type Tracked = BTreeMap<RepoPath, ObjectId>;

/// Errors from building snapshots or editing the index.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommitError {
    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No reason to remove the file.")]
    NothingToRemove,
}

/// An immutable snapshot of tracked files plus lineage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Commit {
    message: String,
    timestamp: DateTime<Utc>,
    parent: Option<ObjectId>,
    second_parent: Option<ObjectId>,
    tracked: Tracked,
}

impl Commit {
    /// The root commit every repository starts from.
    ///
    /// It is dated at the Unix epoch and tracks nothing, so independently
    /// initialized repositories share the same root id.
    pub fn root() -> Self {
        Self {
            message: ROOT_MESSAGE.to_string(),
            timestamp: DateTime::UNIX_EPOCH,
            parent: None,
            second_parent: None,
            tracked: Tracked::new(),
        }
    }

    /// Build a commit on top of `parent` by folding `index` into its snapshot.
    ///
    /// # Errors
    ///
    /// - [`CommitError::EmptyMessage`] if `message` is empty
    /// - [`CommitError::NothingToCommit`] if the index is empty
    pub fn child(
        message: &str,
        timestamp: DateTime<Utc>,
        parent_id: &ObjectId,
        parent: &Commit,
        index: &Index,
    ) -> Result<Self, CommitError> {
        Self::build(message, timestamp, parent_id, parent, None, index)
    }

    /// Build a merge commit. The snapshot folds `index` over the first
    /// parent exactly as [`Commit::child`] does.
    pub fn merge(
        message: &str,
        timestamp: DateTime<Utc>,
        parent_id: &ObjectId,
        parent: &Commit,
        second_parent_id: &ObjectId,
        index: &Index,
    ) -> Result<Self, CommitError> {
        Self::build(
            message,
            timestamp,
            parent_id,
            parent,
            Some(second_parent_id.clone()),
            index,
        )
    }

    fn build(
        message: &str,
        timestamp: DateTime<Utc>,
        parent_id: &ObjectId,
        parent: &Commit,
        second_parent: Option<ObjectId>,
        index: &Index,
    ) -> Result<Self, CommitError> {
        if message.is_empty() {
            return Err(CommitError::EmptyMessage);
        }
        if index.is_empty() {
            return Err(CommitError::NothingToCommit);
        }

        let mut tracked: Tracked = parent
            .tracked
            .iter()
            .filter(|(path, _)| !index.untracked().contains(*path))
            .map(|(path, oid)| (path.clone(), oid.clone()))
            .collect();
        for (path, oid) in index.staged() {
            tracked.insert(path.clone(), oid.clone());
        }

        Ok(Self {
            message: message.to_string(),
            timestamp,
            parent: Some(parent_id.clone()),
            second_parent,
            tracked,
        })
    }

    /// Serialize to the canonical JSON form used for storage and identity.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Parse a commit from its stored form.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// The content-addressed identity of this commit.
    pub fn id(&self) -> Result<ObjectId, serde_json::Error> {
        Ok(ObjectId::hash_bytes(&self.to_canonical_json()?))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    /// First parent, or `None` for the root commit.
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    /// Second parent, present only on merge commits.
    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    /// All parents, first parent first.
    pub fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.parent.iter().chain(self.second_parent.iter())
    }

    pub fn is_merge(&self) -> bool {
        self.second_parent.is_some()
    }

    pub fn tracked(&self) -> &Tracked {
        &self.tracked
    }
}
