//! core::merge
//!
//! Three-way reconciliation of tracked-file maps.
//!
//! # Architecture
//!
//! [`plan_merge`] is pure: it compares the `current`, `other` and `split`
//! snapshots and returns a [`MergePlan`] without touching storage or the
//! work tree. The engine applies the plan through the same stage/remove
//! primitives `add` and `rm` use.
//!
//! Only paths in `split ∪ other` are considered. A path that exists only in
//! `current` was added on this side and needs no action.
//!
//! # Decision table
//!
//! | split | current | other | condition | action |
//! |---|---|---|---|---|
//! | yes | yes | yes | other == split | none |
//! | yes | yes | yes | current == split | take other |
//! | yes | yes | yes | otherwise | conflict |
//! | yes | yes | no | current == split | remove |
//! | yes | yes | no | otherwise | conflict |
//! | yes | no | yes | other == split | none |
//! | yes | no | yes | otherwise | conflict |
//! | yes | no | no | | none |
//! | no | no | yes | | take other |
//! | no | yes | yes | | conflict |

use std::collections::BTreeSet;

use crate::core::commit::Tracked;
use crate::core::types::{ObjectId, RepoPath};

/// One step of a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Check out and stage the other side's blob.
    Take { path: RepoPath, blob: ObjectId },
    /// Delete the file and stage its removal.
    Remove { path: RepoPath },
    /// Write conflict markers around both sides and stage the result.
    /// A side is `None` when that snapshot lacks the file.
    Conflict {
        path: RepoPath,
        current: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

impl MergeAction {
    pub fn path(&self) -> &RepoPath {
        match self {
            MergeAction::Take { path, .. }
            | MergeAction::Remove { path }
            | MergeAction::Conflict { path, .. } => path,
        }
    }
}

/// The ordered actions for one merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    pub actions: Vec<MergeAction>,
}

impl MergePlan {
    pub fn has_conflict(&self) -> bool {
        self.actions
            .iter()
            .any(|a| matches!(a, MergeAction::Conflict { .. }))
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Compute the merge plan for bringing `other` into `current`.
///
/// Actions are ordered by path.
///
/// # Example
///
/// ```
/// use twig::core::commit::Tracked;
/// use twig::core::merge::{plan_merge, MergeAction};
/// use twig::core::types::{ObjectId, RepoPath};
///
/// let f = RepoPath::new("f.txt").unwrap();
/// let a = ObjectId::hash_bytes(b"a");
/// let b = ObjectId::hash_bytes(b"b");
///
/// let split = Tracked::from([(f.clone(), a.clone())]);
/// let current = split.clone();
/// let other = Tracked::from([(f.clone(), b.clone())]);
///
/// let plan = plan_merge(&current, &other, &split);
/// assert_eq!(plan.actions, vec![MergeAction::Take { path: f, blob: b }]);
/// assert!(!plan.has_conflict());
/// ```
pub fn plan_merge(current: &Tracked, other: &Tracked, split: &Tracked) -> MergePlan {
    let paths: BTreeSet<&RepoPath> = split.keys().chain(other.keys()).collect();

    let actions = paths
        .into_iter()
        .filter_map(|path| {
            decide(
                path,
                split.get(path),
                current.get(path),
                other.get(path),
            )
        })
        .collect();

    MergePlan { actions }
}

/// The action for one path, or `None` to leave the current version.
///
/// A path absent from the split but present on both sides always conflicts,
/// whether or not the two versions match. Neither side silently wins.
fn decide(
    path: &RepoPath,
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    other: Option<&ObjectId>,
) -> Option<MergeAction> {
    let conflict = || MergeAction::Conflict {
        path: path.clone(),
        current: current.cloned(),
        other: other.cloned(),
    };

    match (split, current, other) {
        (Some(s), Some(c), Some(o)) => {
            if o == s {
                None
            } else if c == s {
                Some(MergeAction::Take {
                    path: path.clone(),
                    blob: o.clone(),
                })
            } else {
                Some(conflict())
            }
        }
        (Some(s), Some(c), None) => {
            if c == s {
                Some(MergeAction::Remove { path: path.clone() })
            } else {
                Some(conflict())
            }
        }
        (Some(s), None, Some(o)) => (o != s).then(conflict),
        (Some(_), None, None) => None,
        (None, None, Some(o)) => Some(MergeAction::Take {
            path: path.clone(),
            blob: o.clone(),
        }),
        // Added on both sides, identical or not.
        (None, Some(_), Some(_)) => Some(conflict()),
        (None, _, None) => None,
    }
}

/// Render the conflict file for one path.
///
/// An absent side renders as empty. A non-empty side that does not end in a
/// newline gets one so the markers stay on their own lines.
///
/// ```
/// use twig::core::merge::conflict_contents;
///
/// let out = conflict_contents(Some(b"b"), Some(b"c\n"));
/// assert_eq!(out, b"<<<<<<< HEAD\nb\n=======\nc\n>>>>>>>\n");
/// ```
pub fn conflict_contents(current: Option<&[u8]>, other: Option<&[u8]>) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"<<<<<<< HEAD\n");
    push_side(&mut out, current);
    out.extend_from_slice(b"=======\n");
    push_side(&mut out, other);
    out.extend_from_slice(b">>>>>>>\n");
    out
}

fn push_side(out: &mut Vec<u8>, side: Option<&[u8]>) {
    let bytes = side.unwrap_or_default();
    out.extend_from_slice(bytes);
    if !bytes.is_empty() && !bytes.ends_with(b"\n") {
        out.push(b'\n');
    }
}
