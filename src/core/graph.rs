//! core::graph
//!
//! Commit DAG traversal.
//!
//! # Architecture
//!
//! Commits point at their parents by id, so the history is a DAG walked from
//! a head towards the root. Merge commits have two parents and every walk
//! here follows both. Nothing is cached: each traversal loads commits through
//! a [`CommitSource`].
//!
//! # Invariants
//!
//! - Traversals visit each commit at most once
//! - Every walk terminates at the root commit (no parent)

use std::collections::{HashSet, VecDeque};

use thiserror::Error;

use crate::core::commit::Commit;
use crate::core::store::{CommitSource, StoreError};
use crate::core::types::ObjectId;

/// Errors from split-point resolution.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The other head is already part of the current history.
    #[error("Given branch is an ancestor of the current branch.")]
    AlreadyAncestor,

    /// The two heads have no commit in common.
    #[error("Given branch shares no history with the current branch.")]
    UnrelatedHistories,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Where two histories meet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitPoint {
    /// The current head is an ancestor of the other head.
    FastForward,
    /// The nearest common ancestor of both heads.
    Common(ObjectId),
}

/// Every commit reachable from `start`, including `start` itself.
pub fn ancestors<S>(source: &S, start: &ObjectId) -> Result<HashSet<ObjectId>, StoreError>
where
    S: CommitSource + ?Sized,
{
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([start.clone()]);
    while let Some(oid) = queue.pop_front() {
        if !seen.insert(oid.clone()) {
            continue;
        }
        let commit = source.commit(&oid)?;
        queue.extend(commit.parents().cloned());
    }
    Ok(seen)
}

/// Whether `ancestor` is reachable from `descendant`.
pub fn is_ancestor<S>(
    source: &S,
    ancestor: &ObjectId,
    descendant: &ObjectId,
) -> Result<bool, StoreError>
where
    S: CommitSource + ?Sized,
{
    Ok(ancestors(source, descendant)?.contains(ancestor))
}

/// Find where `other` split off from `current`.
///
/// The other history is walked breadth-first, so the first commit found in
/// the current history is the nearest common ancestor.
///
/// # Errors
///
/// - [`SplitError::AlreadyAncestor`] if `other` is reachable from `current`
/// - [`SplitError::UnrelatedHistories`] if no commit is shared
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use chrono::Utc;
/// use twig::core::commit::Commit;
/// use twig::core::graph::{find_split_point, SplitPoint};
/// use twig::core::index::Index;
/// use twig::core::store::{CommitSource, StoreError};
/// use twig::core::types::{ObjectId, RepoPath};
///
/// struct Mem(HashMap<ObjectId, Commit>);
/// impl CommitSource for Mem {
///     fn commit(&self, oid: &ObjectId) -> Result<Commit, StoreError> {
///         self.0.get(oid).cloned().ok_or_else(|| StoreError::NotFound(oid.to_string()))
///     }
/// }
///
/// let root = Commit::root();
/// let root_id = root.id().unwrap();
/// let mut index = Index::default();
/// index.stage(RepoPath::new("f").unwrap(), ObjectId::hash_bytes(b"x"), None);
/// let next = Commit::child("next", Utc::now(), &root_id, &root, &index).unwrap();
/// let next_id = next.id().unwrap();
///
/// let mem = Mem(HashMap::from([(root_id.clone(), root), (next_id.clone(), next)]));
/// assert_eq!(find_split_point(&mem, &root_id, &next_id).unwrap(), SplitPoint::FastForward);
/// ```
pub fn find_split_point<S>(
    source: &S,
    current: &ObjectId,
    other: &ObjectId,
) -> Result<SplitPoint, SplitError>
where
    S: CommitSource + ?Sized,
{
    let current_history = ancestors(source, current)?;
    if current_history.contains(other) {
        return Err(SplitError::AlreadyAncestor);
    }

    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([other.clone()]);
    while let Some(oid) = queue.pop_front() {
        if current_history.contains(&oid) {
            return Ok(if &oid == current {
                SplitPoint::FastForward
            } else {
                SplitPoint::Common(oid)
            });
        }
        if !seen.insert(oid.clone()) {
            continue;
        }
        let commit = source.commit(&oid)?;
        queue.extend(commit.parents().cloned());
    }
    Err(SplitError::UnrelatedHistories)
}

/// The first-parent chain from `start` back to the root, newest first.
pub fn first_parent_history<S>(
    source: &S,
    start: &ObjectId,
) -> Result<Vec<(ObjectId, Commit)>, StoreError>
where
    S: CommitSource + ?Sized,
{
    let mut history = Vec::new();
    let mut next = Some(start.clone());
    while let Some(oid) = next {
        let commit = source.commit(&oid)?;
        next = commit.parent().cloned();
        history.push((oid, commit));
    }
    Ok(history)
}

/// Commits reachable from `start` for which `present` is false, ordered so
/// every commit comes after its parents.
///
/// The walk does not descend past a commit that is already present, since
/// its ancestry is present too.
pub fn missing_ancestry<S, F>(
    source: &S,
    start: &ObjectId,
    present: F,
) -> Result<Vec<ObjectId>, StoreError>
where
    S: CommitSource + ?Sized,
    F: Fn(&ObjectId) -> bool,
{
    let mut order = Vec::new();
    let mut visited = HashSet::new();
    // (commit, parents already pushed)
    let mut stack = vec![(start.clone(), false)];

    while let Some((oid, expanded)) = stack.pop() {
        if expanded {
            order.push(oid);
            continue;
        }
        if present(&oid) || !visited.insert(oid.clone()) {
            continue;
        }
        let commit = source.commit(&oid)?;
        stack.push((oid, true));
        for parent in commit.parents() {
            if !visited.contains(parent) {
                stack.push((parent.clone(), false));
            }
        }
    }
    Ok(order)
}
