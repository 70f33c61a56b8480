//! engine::status
//!
//! The `status` report.

use std::collections::BTreeSet;

use super::{RepoError, Repository};
use crate::core::types::{BranchName, ObjectId, RepoPath};
use crate::worktree::WorkTree;

/// How a file differs from what is recorded for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Modification {
    Deleted,
    Modified,
}

impl std::fmt::Display for Modification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Modification::Deleted => write!(f, "deleted"),
            Modification::Modified => write!(f, "modified"),
        }
    }
}

/// Snapshot of branch, index and work tree state.
///
/// Every list is sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub current: BranchName,
    pub branches: Vec<BranchName>,
    pub staged: Vec<RepoPath>,
    pub removed: Vec<RepoPath>,
    pub modified: Vec<(RepoPath, Modification)>,
    pub untracked: Vec<RepoPath>,
}

impl<W: WorkTree> Repository<W> {
    /// Compare HEAD, the index and the work tree.
    ///
    /// - modified: a staged file changed or deleted since staging, or a
    ///   tracked file changed without being staged, or deleted without `rm`
    /// - untracked: a file neither staged nor tracked, or one queued for
    ///   removal that exists again
    pub fn status(&self) -> Result<StatusReport, RepoError> {
        let current = self.current_branch()?;
        let branches = self.refs().list_branches()?;
        let index = self.index()?;
        let (_, head) = self.head()?;
        let tree = self.work_tree();

        let hash_of = |path: &RepoPath| -> Result<Option<ObjectId>, RepoError> {
            if tree.exists(path) {
                Ok(Some(ObjectId::hash_bytes(&tree.read(path)?)))
            } else {
                Ok(None)
            }
        };

        let mut modified = BTreeSet::new();
        for (path, staged) in index.staged() {
            match hash_of(path)? {
                None => {
                    modified.insert((path.clone(), Modification::Deleted));
                }
                Some(oid) if &oid != staged => {
                    modified.insert((path.clone(), Modification::Modified));
                }
                Some(_) => {}
            }
        }
        for (path, tracked) in head.tracked() {
            match hash_of(path)? {
                None if !index.untracked().contains(path) => {
                    modified.insert((path.clone(), Modification::Deleted));
                }
                Some(oid) if !index.staged().contains_key(path) && &oid != tracked => {
                    modified.insert((path.clone(), Modification::Modified));
                }
                _ => {}
            }
        }

        let untracked = tree
            .list_files()?
            .into_iter()
            .filter(|path| {
                let known =
                    index.staged().contains_key(path) || head.tracked().contains_key(path);
                !known || index.untracked().contains(path)
            })
            .collect();

        Ok(StatusReport {
            current,
            branches,
            staged: index.staged().keys().cloned().collect(),
            removed: index.untracked().iter().cloned().collect(),
            modified: modified.into_iter().collect(),
            untracked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use std::fs;
    use tempfile::TempDir;

    fn p(name: &str) -> RepoPath {
        RepoPath::new(name).unwrap()
    }

    fn setup() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), Config::default()).unwrap();
        (temp, repo)
    }

    #[test]
    fn fresh_repo_is_clean() {
        let (_temp, repo) = setup();
        let status = repo.status().unwrap();
        assert_eq!(status.current.as_str(), "master");
        assert_eq!(status.branches, vec![status.current.clone()]);
        assert!(status.staged.is_empty());
        assert!(status.removed.is_empty());
        assert!(status.modified.is_empty());
        assert!(status.untracked.is_empty());
    }

    #[test]
    fn dotfiles_are_listed_but_not_dot_directories() {
        let (temp, repo) = setup();
        fs::write(temp.path().join(".env"), "x").unwrap();
        fs::create_dir_all(temp.path().join(".cache")).unwrap();
        fs::write(temp.path().join(".cache/blob"), "x").unwrap();

        let status = repo.status().unwrap();
        assert_eq!(status.untracked, vec![p(".env")]);
    }

    #[test]
    fn reports_every_section() {
        let (temp, repo) = setup();
        let w = |name: &str, content: &str| fs::write(temp.path().join(name), content).unwrap();

        w("tracked.txt", "t");
        w("gone.txt", "g");
        w("edited.txt", "e");
        w("removed.txt", "r");
        for name in ["tracked.txt", "gone.txt", "edited.txt", "removed.txt"] {
            repo.add(&p(name)).unwrap();
        }
        repo.commit("base").unwrap();
        repo.create_branch("dev").unwrap();

        w("new.txt", "n");
        repo.add(&p("new.txt")).unwrap();
        w("new.txt", "n changed after staging");
        repo.remove(&p("removed.txt")).unwrap();
        fs::remove_file(temp.path().join("gone.txt")).unwrap();
        w("edited.txt", "e2");
        w("stray.txt", "s");

        let status = repo.status().unwrap();
        let names = |v: &[RepoPath]| v.iter().map(|p| p.to_string()).collect::<Vec<_>>();

        assert_eq!(
            status.branches.iter().map(|b| b.as_str()).collect::<Vec<_>>(),
            vec!["dev", "master"]
        );
        assert_eq!(names(&status.staged), vec!["new.txt"]);
        assert_eq!(names(&status.removed), vec!["removed.txt"]);
        assert_eq!(
            status.modified,
            vec![
                (p("edited.txt"), Modification::Modified),
                (p("gone.txt"), Modification::Deleted),
                (p("new.txt"), Modification::Modified),
            ]
        );
        assert_eq!(names(&status.untracked), vec!["stray.txt"]);
    }

    #[test]
    fn recreated_removed_file_is_untracked() {
        let (temp, repo) = setup();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        repo.add(&p("a.txt")).unwrap();
        repo.commit("base").unwrap();
        repo.remove(&p("a.txt")).unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();

        let status = repo.status().unwrap();
        assert_eq!(status.untracked, vec![p("a.txt")]);
        assert_eq!(status.removed, vec![p("a.txt")]);
    }
}
