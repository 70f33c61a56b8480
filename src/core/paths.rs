//! core::paths
//!
//! Centralized path routing for twig storage locations.
//!
//! # Architecture
//!
//! Every store operation takes a [`RepoPaths`] value naming the repository
//! it acts on. Local and remote repositories are addressed the same way:
//! a remote is simply another `RepoPaths` built from the path recorded under
//! `remotes/`. No code outside this module should compute `*.join(".twig")`
//! paths.
//!
//! # Storage Layout
//!
//! All repository data is stored under `<work_dir>/.twig/`:
//! - `HEAD` - Current branch name
//! - `config.toml` - Repository configuration
//! - `objects/` - Blobs keyed by content hash
//! - `commits/` - Commit objects keyed by content hash
//! - `branches/` - One file per branch holding its head commit id
//! - `remotes/` - One file per remote holding its `.twig` path
//! - `index/` - Staged/removed overlay per branch
//!
//! # Example
//!
//! ```
//! use twig::core::paths::RepoPaths;
//! use std::path::PathBuf;
//!
//! let paths = RepoPaths::for_work_dir("/repo");
//!
//! assert_eq!(paths.meta_dir(), PathBuf::from("/repo/.twig"));
//! assert_eq!(paths.head_path(), PathBuf::from("/repo/.twig/HEAD"));
//! ```

use std::path::{Path, PathBuf};

use crate::core::types::{BranchName, ObjectId, RemoteName};

/// Name of the metadata directory at the root of a work tree.
pub const META_DIR: &str = ".twig";

/// Centralized path routing for one repository's storage.
///
/// This is the explicit store handle passed to every store operation.
///
/// # Invariants
///
/// - `meta_dir` is the `.twig` directory itself, not the work tree
/// - The work tree, when present, is the parent of `meta_dir`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPaths {
    meta_dir: PathBuf,
}

impl RepoPaths {
    /// Create paths for a repository whose metadata lives at `meta_dir`.
    ///
    /// This is how remotes are addressed: `add-remote` records the path of
    /// the remote's `.twig` directory.
    pub fn new(meta_dir: impl Into<PathBuf>) -> Self {
        Self {
            meta_dir: meta_dir.into(),
        }
    }

    /// Create paths for the repository rooted at `work_dir`.
    pub fn for_work_dir(work_dir: impl AsRef<Path>) -> Self {
        Self::new(work_dir.as_ref().join(META_DIR))
    }

    /// Walk up from `start` looking for a directory containing `.twig`.
    ///
    /// Returns `None` if no enclosing repository exists.
    pub fn discover(start: &Path) -> Option<Self> {
        start
            .ancestors()
            .find(|dir| dir.join(META_DIR).is_dir())
            .map(Self::for_work_dir)
    }

    // =========================================================================
    // Repo-scoped paths
    // =========================================================================

    /// The `.twig` directory.
    pub fn meta_dir(&self) -> &Path {
        &self.meta_dir
    }

    /// The work tree containing the `.twig` directory.
    pub fn work_dir(&self) -> &Path {
        self.meta_dir.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Whether this repository has been initialized.
    pub fn exists(&self) -> bool {
        self.meta_dir.is_dir()
    }

    /// `<meta>/HEAD`, the current branch name.
    pub fn head_path(&self) -> PathBuf {
        self.meta_dir.join("HEAD")
    }

    /// `<meta>/config.toml`.
    pub fn config_path(&self) -> PathBuf {
        self.meta_dir.join("config.toml")
    }

    /// `<meta>/objects/`.
    pub fn objects_dir(&self) -> PathBuf {
        self.meta_dir.join("objects")
    }

    /// `<meta>/objects/<oid>`.
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_dir().join(oid.as_str())
    }

    /// `<meta>/commits/`.
    pub fn commits_dir(&self) -> PathBuf {
        self.meta_dir.join("commits")
    }

    /// `<meta>/commits/<oid>`.
    pub fn commit_path(&self, oid: &ObjectId) -> PathBuf {
        self.commits_dir().join(oid.as_str())
    }

    /// `<meta>/branches/`.
    pub fn branches_dir(&self) -> PathBuf {
        self.meta_dir.join("branches")
    }

    /// `<meta>/branches/<name>`; remote-tracking branches nest one level.
    pub fn branch_path(&self, branch: &BranchName) -> PathBuf {
        self.branches_dir().join(branch.as_str())
    }

    /// `<meta>/remotes/`.
    pub fn remotes_dir(&self) -> PathBuf {
        self.meta_dir.join("remotes")
    }

    /// `<meta>/remotes/<name>`.
    pub fn remote_path(&self, remote: &RemoteName) -> PathBuf {
        self.remotes_dir().join(remote.as_str())
    }

    /// `<meta>/index/`.
    pub fn index_dir(&self) -> PathBuf {
        self.meta_dir.join("index")
    }

    /// `<meta>/index/<branch>.json`.
    pub fn index_path(&self, branch: &BranchName) -> PathBuf {
        self.index_dir().join(format!("{}.json", branch.as_str()))
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Create the directory skeleton.
    ///
    /// # Errors
    ///
    /// Returns an IO error if directory creation fails.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.objects_dir())?;
        std::fs::create_dir_all(self.commits_dir())?;
        std::fs::create_dir_all(self.branches_dir())?;
        std::fs::create_dir_all(self.remotes_dir())?;
        std::fs::create_dir_all(self.index_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> RepoPaths {
        RepoPaths::for_work_dir("/repo")
    }

    #[test]
    fn meta_and_work_dir() {
        let paths = paths();
        assert_eq!(paths.meta_dir(), Path::new("/repo/.twig"));
        assert_eq!(paths.work_dir(), Path::new("/repo"));
    }

    #[test]
    fn remote_handle_from_meta_dir() {
        let remote = RepoPaths::new("/other/.twig");
        assert_eq!(remote.work_dir(), Path::new("/other"));
        assert_eq!(remote.head_path(), PathBuf::from("/other/.twig/HEAD"));
    }

    #[test]
    fn object_and_commit_paths_are_separate() {
        let paths = paths();
        let oid = ObjectId::hash_bytes(b"x");
        assert_eq!(
            paths.object_path(&oid),
            PathBuf::from(format!("/repo/.twig/objects/{}", oid))
        );
        assert_eq!(
            paths.commit_path(&oid),
            PathBuf::from(format!("/repo/.twig/commits/{}", oid))
        );
    }

    #[test]
    fn remote_tracking_branch_nests() {
        let branch = BranchName::new("origin/master").unwrap();
        assert_eq!(
            paths().branch_path(&branch),
            PathBuf::from("/repo/.twig/branches/origin/master")
        );
    }

    #[test]
    fn index_path_per_branch() {
        let branch = BranchName::new("master").unwrap();
        assert_eq!(
            paths().index_path(&branch),
            PathBuf::from("/repo/.twig/index/master.json")
        );
    }

    #[test]
    fn remote_path() {
        let remote = RemoteName::new("origin").unwrap();
        assert_eq!(
            paths().remote_path(&remote),
            PathBuf::from("/repo/.twig/remotes/origin")
        );
    }

    #[test]
    fn discover_walks_up() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".twig")).unwrap();
        let nested = temp.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = RepoPaths::discover(&nested).unwrap();
        assert_eq!(found.work_dir(), temp.path());
    }

    #[test]
    fn discover_none_outside_repo() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(RepoPaths::discover(temp.path()).is_none());
    }
}
