//! core::refs
//!
//! Branch, HEAD and remote records.
//!
//! # Architecture
//!
//! These are the only mutable records in a repository:
//! - `HEAD` holds the name of the current branch
//! - `branches/<name>` holds a branch's head commit id
//! - `remotes/<name>` holds the path of a remote's `.twig` directory
//!
//! Each record is a small text file rewritten with an atomic rename.
//! Remote-tracking branches (`origin/master`) nest one directory deep
//! under `branches/`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::paths::RepoPaths;
use crate::core::store::{write_atomic, StoreError};
use crate::core::types::{BranchName, ObjectId, RemoteName};

/// Reads and writes refs for one repository.
pub struct RefStore<'a> {
    paths: &'a RepoPaths,
}

impl<'a> RefStore<'a> {
    pub fn new(paths: &'a RepoPaths) -> Self {
        Self { paths }
    }

    // =========================================================================
    // HEAD
    // =========================================================================

    /// The current branch.
    pub fn head(&self) -> Result<BranchName, StoreError> {
        let path = self.paths.head_path();
        let text = read_text(&path)?.ok_or_else(|| StoreError::NotFound("HEAD".into()))?;
        BranchName::new(text.trim()).map_err(|e| StoreError::Corrupt {
            what: "HEAD".into(),
            message: e.to_string(),
        })
    }

    pub fn set_head(&self, branch: &BranchName) -> Result<(), StoreError> {
        write_text(&self.paths.head_path(), branch.as_str())
    }

    // =========================================================================
    // Branches
    // =========================================================================

    /// The head commit of `branch`, or `None` if the branch does not exist.
    pub fn branch_head(&self, branch: &BranchName) -> Result<Option<ObjectId>, StoreError> {
        let path = self.paths.branch_path(branch);
        if path.is_dir() {
            return Ok(None);
        }
        match read_text(&path)? {
            Some(text) => ObjectId::new(text.trim())
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    what: format!("branch {branch}"),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    pub fn branch_exists(&self, branch: &BranchName) -> Result<bool, StoreError> {
        Ok(self.branch_head(branch)?.is_some())
    }

    /// Whether `branch` cannot be stored beside the existing branches.
    ///
    /// Branch files nest by `/`, so `a` and `a/b` cannot both exist.
    pub fn name_collides(&self, branch: &BranchName) -> bool {
        let path = self.paths.branch_path(branch);
        if path.is_dir() {
            return true;
        }
        let root = self.paths.branches_dir();
        path.ancestors()
            .skip(1)
            .take_while(|dir| *dir != root.as_path())
            .any(Path::is_file)
    }

    /// Point `branch` at `oid`, creating it if needed.
    pub fn set_branch(&self, branch: &BranchName, oid: &ObjectId) -> Result<(), StoreError> {
        write_text(&self.paths.branch_path(branch), oid.as_str())
    }

    /// Delete the pointer for `branch`. Commits are left untouched.
    ///
    /// Returns `false` if the branch did not exist.
    pub fn delete_branch(&self, branch: &BranchName) -> Result<bool, StoreError> {
        let path = self.paths.branch_path(branch);
        let removed = remove_file(&path)?;
        // Drop namespace directories left empty so the name can be reused.
        let root = self.paths.branches_dir();
        for dir in path
            .ancestors()
            .skip(1)
            .take_while(|dir| *dir != root.as_path())
        {
            if fs::remove_dir(dir).is_err() {
                break;
            }
        }
        Ok(removed)
    }

    /// All branches, sorted by name, including remote-tracking branches.
    pub fn list_branches(&self) -> Result<Vec<BranchName>, StoreError> {
        let root = self.paths.branches_dir();
        let mut names = Vec::new();
        collect_branches(&root, "", &mut names)?;
        names.sort();
        Ok(names)
    }

    // =========================================================================
    // Remotes
    // =========================================================================

    /// Record `remote` as living at `meta_dir`.
    pub fn add_remote(&self, remote: &RemoteName, meta_dir: &Path) -> Result<(), StoreError> {
        write_text(
            &self.paths.remote_path(remote),
            &meta_dir.to_string_lossy(),
        )
    }

    /// The recorded `.twig` path of `remote`, or `None` if unknown.
    pub fn remote(&self, remote: &RemoteName) -> Result<Option<PathBuf>, StoreError> {
        Ok(read_text(&self.paths.remote_path(remote))?.map(|text| PathBuf::from(text.trim_end())))
    }

    /// Returns `false` if the remote did not exist.
    pub fn remove_remote(&self, remote: &RemoteName) -> Result<bool, StoreError> {
        remove_file(&self.paths.remote_path(remote))
    }

    /// All remote names, sorted.
    pub fn list_remotes(&self) -> Result<Vec<RemoteName>, StoreError> {
        let dir = self.paths.remotes_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path: dir, source }),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
            if let Some(name) = entry
                .file_name()
                .to_str()
                .and_then(|n| RemoteName::new(n).ok())
            {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

fn collect_branches(dir: &Path, prefix: &str, out: &mut Vec<BranchName>) -> Result<(), StoreError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
    };
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let full = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };
        let path = entry.path();
        if path.is_dir() {
            collect_branches(&path, &full, out)?;
        } else if let Ok(branch) = BranchName::new(full) {
            out.push(branch);
        }
    }
    Ok(())
}

fn read_text(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_text(path: &Path, text: &str) -> Result<(), StoreError> {
    write_atomic(path, format!("{text}\n").as_bytes()).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn remove_file(path: &Path) -> Result<bool, StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, RepoPaths) {
        let temp = TempDir::new().unwrap();
        let paths = RepoPaths::for_work_dir(temp.path());
        paths.ensure_dirs().unwrap();
        (temp, paths)
    }

    fn branch(name: &str) -> BranchName {
        BranchName::new(name).unwrap()
    }

    #[test]
    fn head_roundtrip() {
        let (_temp, paths) = setup();
        let refs = RefStore::new(&paths);
        assert!(matches!(refs.head(), Err(StoreError::NotFound(_))));
        refs.set_head(&branch("master")).unwrap();
        assert_eq!(refs.head().unwrap(), branch("master"));
    }

    #[test]
    fn nested_names_collide_with_plain_ones() {
        let (_temp, paths) = setup();
        let refs = RefStore::new(&paths);
        let oid = ObjectId::hash_bytes(b"c");

        refs.set_branch(&branch("a"), &oid).unwrap();
        assert!(refs.name_collides(&branch("a/b")));
        assert!(!refs.name_collides(&branch("a")));
        assert!(!refs.name_collides(&branch("ab/c")));

        refs.set_branch(&branch("x/y"), &oid).unwrap();
        assert!(refs.name_collides(&branch("x")));
        assert!(!refs.name_collides(&branch("x/z")));

        // Deleting the last branch in a namespace frees the plain name.
        refs.delete_branch(&branch("x/y")).unwrap();
        assert!(!refs.name_collides(&branch("x")));
        refs.set_branch(&branch("x"), &oid).unwrap();
        assert_eq!(refs.list_branches().unwrap(), vec![branch("a"), branch("x")]);
    }

    #[test]
    fn branch_lifecycle() {
        let (_temp, paths) = setup();
        let refs = RefStore::new(&paths);
        let oid = ObjectId::hash_bytes(b"c");

        assert_eq!(refs.branch_head(&branch("dev")).unwrap(), None);
        refs.set_branch(&branch("dev"), &oid).unwrap();
        assert_eq!(refs.branch_head(&branch("dev")).unwrap(), Some(oid));
        assert!(refs.branch_exists(&branch("dev")).unwrap());

        assert!(refs.delete_branch(&branch("dev")).unwrap());
        assert!(!refs.delete_branch(&branch("dev")).unwrap());
        assert!(!refs.branch_exists(&branch("dev")).unwrap());
    }

    #[test]
    fn list_includes_remote_tracking() {
        let (_temp, paths) = setup();
        let refs = RefStore::new(&paths);
        let oid = ObjectId::hash_bytes(b"c");
        for name in ["master", "origin/master", "dev", "origin/dev"] {
            refs.set_branch(&branch(name), &oid).unwrap();
        }
        let names: Vec<String> = refs
            .list_branches()
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(names, vec!["dev", "master", "origin/dev", "origin/master"]);
    }

    #[test]
    fn remote_directory_is_not_a_branch() {
        let (_temp, paths) = setup();
        let refs = RefStore::new(&paths);
        refs.set_branch(&branch("origin/master"), &ObjectId::hash_bytes(b"c"))
            .unwrap();
        assert_eq!(refs.branch_head(&branch("origin")).unwrap(), None);
    }

    #[test]
    fn remote_lifecycle() {
        let (_temp, paths) = setup();
        let refs = RefStore::new(&paths);
        let origin = RemoteName::new("origin").unwrap();

        assert_eq!(refs.remote(&origin).unwrap(), None);
        refs.add_remote(&origin, Path::new("/srv/other/.twig")).unwrap();
        assert_eq!(
            refs.remote(&origin).unwrap(),
            Some(PathBuf::from("/srv/other/.twig"))
        );
        assert_eq!(refs.list_remotes().unwrap(), vec![origin.clone()]);
        assert!(refs.remove_remote(&origin).unwrap());
        assert!(!refs.remove_remote(&origin).unwrap());
        assert!(refs.list_remotes().unwrap().is_empty());
    }
}
