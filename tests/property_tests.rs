//! Property-based tests for the store, commits and merge planning.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use tempfile::TempDir;

use twig::core::commit::{Commit, Tracked};
use twig::core::index::Index;
use twig::core::merge::{plan_merge, MergeAction};
use twig::core::paths::RepoPaths;
use twig::core::store::ObjectStore;
use twig::core::types::{ObjectId, RepoPath};

/// Strategy for a snapshot over a small shared set of paths, so that
/// generated snapshots overlap often.
fn tracked() -> impl Strategy<Value = Tracked> {
    prop::collection::btree_map(
        prop::sample::select(vec!["a.txt", "b.txt", "dir/c.txt", "dir/d.txt", "e"]),
        prop::sample::select(vec!["v1", "v2", "v3"]),
        0..5,
    )
    .prop_map(|files| {
        files
            .into_iter()
            .map(|(path, content)| {
                (
                    RepoPath::new(path).unwrap(),
                    ObjectId::hash_bytes(content.as_bytes()),
                )
            })
            .collect()
    })
}

/// One staging operation: `Some(content)` stages, `None` removes.
fn index_ops() -> impl Strategy<Value = BTreeMap<&'static str, Option<&'static str>>> {
    prop::collection::btree_map(
        prop::sample::select(vec!["a.txt", "b.txt", "dir/c.txt", "dir/d.txt", "e"]),
        prop::option::of(prop::sample::select(vec!["v1", "v2", "v4"])),
        0..5,
    )
}

fn apply(current: &Tracked, actions: &[MergeAction]) -> Tracked {
    let mut result = current.clone();
    for action in actions {
        match action {
            MergeAction::Take { path, blob } => {
                result.insert(path.clone(), blob.clone());
            }
            MergeAction::Remove { path } => {
                result.remove(path);
            }
            MergeAction::Conflict { .. } => panic!("unexpected conflict"),
        }
    }
    result
}

fn commit_with(tracked: &Tracked) -> (ObjectId, Commit) {
    let root = Commit::root();
    let root_id = root.id().unwrap();
    if tracked.is_empty() {
        return (root_id, root);
    }
    let mut index = Index::default();
    for (path, oid) in tracked {
        index.stage(path.clone(), oid.clone(), None);
    }
    let ts = Utc.timestamp_opt(1_000, 0).unwrap();
    let commit = Commit::child("setup", ts, &root_id, &root, &index).unwrap();
    (commit.id().unwrap(), commit)
}

proptest! {
    /// Storing the same bytes twice yields one id, the content hash.
    #[test]
    fn store_put_is_idempotent(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let dir = TempDir::new().unwrap();
        let paths = RepoPaths::for_work_dir(dir.path());
        paths.ensure_dirs().unwrap();
        let store = ObjectStore::new(&paths);

        let first = store.put(&bytes).unwrap();
        let second = store.put(&bytes).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &ObjectId::hash_bytes(&bytes));
        prop_assert_eq!(store.get(&first).unwrap(), bytes);
    }

    /// A child's snapshot is the parent's minus removals plus staged files,
    /// and its id survives a storage round trip.
    #[test]
    fn commit_folds_index_over_parent(parent_files in tracked(), ops in index_ops()) {
        let (parent_id, parent) = commit_with(&parent_files);

        let mut index = Index::default();
        let mut expected = parent_files.clone();
        for (name, op) in &ops {
            let path = RepoPath::new(*name).unwrap();
            let head = parent.tracked().get(&path);
            match op {
                Some(content) => {
                    let oid = ObjectId::hash_bytes(content.as_bytes());
                    index.stage(path.clone(), oid.clone(), head);
                    expected.insert(path, oid);
                }
                None => {
                    if index.remove(&path, head.is_some()).is_ok() {
                        expected.remove(&path);
                    }
                }
            }
        }
        prop_assume!(!index.is_empty());

        let ts = Utc.timestamp_opt(2_000, 0).unwrap();
        let child = Commit::child("change", ts, &parent_id, &parent, &index).unwrap();
        prop_assert_eq!(child.tracked(), &expected);
        prop_assert_eq!(child.parent(), Some(&parent_id));

        let json = child.to_canonical_json().unwrap();
        let reloaded = Commit::from_json(&json).unwrap();
        prop_assert_eq!(reloaded.id().unwrap(), child.id().unwrap());
    }

    /// If the other side never changed anything, there is nothing to do.
    #[test]
    fn merge_with_unchanged_other_is_empty(current in tracked(), split in tracked()) {
        let plan = plan_merge(&current, &split, &split);
        prop_assert!(plan.is_empty());
    }

    /// If this side never changed anything, merging reproduces the other
    /// side exactly and cleanly.
    #[test]
    fn merge_with_unchanged_current_takes_other(other in tracked(), split in tracked()) {
        let plan = plan_merge(&split, &other, &split);
        prop_assert!(!plan.has_conflict());
        prop_assert_eq!(apply(&split, &plan.actions), other);
    }

    /// Actions are sorted by path with at most one action per path, and
    /// only touch paths known to the split or the other side.
    #[test]
    fn merge_actions_are_ordered_and_scoped(
        current in tracked(),
        other in tracked(),
        split in tracked(),
    ) {
        let plan = plan_merge(&current, &other, &split);
        let paths: Vec<&RepoPath> = plan.actions.iter().map(|a| a.path()).collect();
        prop_assert!(paths.windows(2).all(|w| w[0] < w[1]));
        for path in paths {
            prop_assert!(split.contains_key(path) || other.contains_key(path));
        }
    }
}
