//! engine::repository
//!
//! The repository handle and its local commands.
//!
//! # Architecture
//!
//! A [`Repository`] ties together one [`RepoPaths`] store handle, a
//! [`WorkTree`] and the loaded [`Config`]. Every command is a method on it;
//! merge, status and remote commands live in sibling modules as further
//! `impl` blocks.
//!
//! # Ordering
//!
//! Objects are written before the ref that names them, and the ref before
//! the index is cleared. An interrupted command can leave orphaned objects
//! or a stale index, never a branch pointing at a missing commit.

use std::path::Path;

use chrono::Utc;

use super::RepoError;
use crate::core::commit::Commit;
use crate::core::config::{Config, RepoConfig};
use crate::core::graph;
use crate::core::index::Index;
use crate::core::paths::RepoPaths;
use crate::core::refs::RefStore;
use crate::core::store::{ObjectStore, StoreError};
use crate::core::types::{BranchName, ObjectId, RepoPath};
use crate::worktree::{FsWorkTree, WorkTree};

/// An opened twig repository.
#[derive(Debug)]
pub struct Repository<W: WorkTree = FsWorkTree> {
    paths: RepoPaths,
    tree: W,
    config: Config,
}

impl Repository<FsWorkTree> {
    /// Create a new repository in `work_dir`.
    ///
    /// Writes the root commit, creates the configured default branch and
    /// points HEAD at it.
    ///
    /// # Errors
    ///
    /// [`RepoError::AlreadyInitialized`] if `work_dir` already holds a `.twig`.
    pub fn init(work_dir: &Path, config: Config) -> Result<Self, RepoError> {
        let paths = RepoPaths::for_work_dir(work_dir);
        if paths.exists() {
            return Err(RepoError::AlreadyInitialized);
        }
        paths.ensure_dirs().map_err(|source| StoreError::Io {
            path: paths.meta_dir().to_path_buf(),
            source,
        })?;

        let root_id = ObjectStore::new(&paths).put_commit(&Commit::root())?;
        let branch = config.default_branch();
        let refs = RefStore::new(&paths);
        refs.set_branch(&branch, &root_id)?;
        refs.set_head(&branch)?;

        let repo_config = RepoConfig {
            default_branch: Some(branch.to_string()),
            log: None,
        };
        Config::write_repo(&paths, &repo_config)?;

        tracing::info!(branch = %branch, root = %root_id, "initialized repository");
        let tree = FsWorkTree::new(work_dir);
        Ok(Self {
            paths,
            tree,
            config,
        })
    }

    /// Open the repository enclosing `dir`.
    ///
    /// # Errors
    ///
    /// [`RepoError::NotInitialized`] if no `.twig` directory is found.
    pub fn open(dir: &Path) -> Result<Self, RepoError> {
        let paths = RepoPaths::discover(dir).ok_or(RepoError::NotInitialized)?;
        let config = Config::load(Some(&paths))?;
        let tree = FsWorkTree::new(paths.work_dir());
        tracing::debug!(work_dir = %paths.work_dir().display(), "opened repository");
        Ok(Self {
            paths,
            tree,
            config,
        })
    }
}

impl<W: WorkTree> Repository<W> {
    /// Assemble a repository from an existing store and a custom work tree.
    pub fn from_parts(paths: RepoPaths, tree: W, config: Config) -> Result<Self, RepoError> {
        if !paths.exists() {
            return Err(RepoError::NotInitialized);
        }
        Ok(Self {
            paths,
            tree,
            config,
        })
    }

    pub fn paths(&self) -> &RepoPaths {
        &self.paths
    }

    pub fn work_tree(&self) -> &W {
        &self.tree
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn objects(&self) -> ObjectStore<'_> {
        ObjectStore::new(&self.paths)
    }

    pub(crate) fn refs(&self) -> RefStore<'_> {
        RefStore::new(&self.paths)
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn current_branch(&self) -> Result<BranchName, RepoError> {
        Ok(self.refs().head()?)
    }

    /// The current branch's head commit.
    pub fn head(&self) -> Result<(ObjectId, Commit), RepoError> {
        let branch = self.current_branch()?;
        let oid = self
            .refs()
            .branch_head(&branch)?
            .ok_or_else(|| StoreError::NotFound(format!("branch {branch}")))?;
        let commit = self.objects().get_commit(&oid)?;
        Ok((oid, commit))
    }

    /// The head commit of `branch`, if the branch exists.
    pub fn branch_commit(
        &self,
        branch: &BranchName,
    ) -> Result<Option<(ObjectId, Commit)>, RepoError> {
        match self.refs().branch_head(branch)? {
            Some(oid) => {
                let commit = self.objects().get_commit(&oid)?;
                Ok(Some((oid, commit)))
            }
            None => Ok(None),
        }
    }

    /// The current branch's index.
    pub fn index(&self) -> Result<Index, RepoError> {
        let branch = self.current_branch()?;
        Ok(Index::load(&self.paths, &branch)?)
    }

    /// Resolve a full or abbreviated commit id.
    ///
    /// # Errors
    ///
    /// [`RepoError::NoSuchCommit`] if the id is unknown or ambiguous.
    pub fn resolve_commit(&self, id: &str) -> Result<(ObjectId, Commit), RepoError> {
        let oid = match self.objects().resolve_prefix(id) {
            Ok(oid) => oid,
            Err(StoreError::NotFound(_) | StoreError::AmbiguousPrefix(_)) => {
                return Err(RepoError::NoSuchCommit)
            }
            Err(e) => return Err(e.into()),
        };
        let commit = self.objects().get_commit(&oid)?;
        Ok((oid, commit))
    }

    // =========================================================================
    // Staging and committing
    // =========================================================================

    /// Stage the working copy of `path` for the next commit.
    ///
    /// If `path` is queued for removal the removal is cancelled and nothing
    /// else changes.
    pub fn add(&self, path: &RepoPath) -> Result<(), RepoError> {
        if !self.tree.exists(path) {
            return Err(RepoError::FileNotFound);
        }
        let branch = self.current_branch()?;
        let mut index = Index::load(&self.paths, &branch)?;

        if index.restore(path) {
            tracing::debug!(path = %path, "cancelled pending removal");
            return Ok(index.save(&self.paths, &branch)?);
        }

        let (_, head) = self.head()?;
        let bytes = self.tree.read(path)?;
        let oid = ObjectId::hash_bytes(&bytes);
        let tracked = head.tracked().get(path);
        if tracked != Some(&oid) {
            self.objects().put(&bytes)?;
        }
        index.stage(path.clone(), oid, tracked);
        index.save(&self.paths, &branch)?;
        tracing::debug!(path = %path, "staged");
        Ok(())
    }

    /// Fold the index into a new commit on the current branch.
    pub fn commit(&self, message: &str) -> Result<ObjectId, RepoError> {
        let branch = self.current_branch()?;
        let index = Index::load(&self.paths, &branch)?;
        let (head_id, head) = self.head()?;

        let commit = Commit::child(message, Utc::now(), &head_id, &head, &index)?;
        let oid = self.objects().put_commit(&commit)?;
        self.refs().set_branch(&branch, &oid)?;
        Index::clear(&self.paths, &branch)?;

        tracing::info!(branch = %branch, commit = %oid, "committed");
        Ok(oid)
    }

    /// Unstage `path` and, if HEAD tracks it, delete it and queue its removal.
    pub fn remove(&self, path: &RepoPath) -> Result<(), RepoError> {
        let branch = self.current_branch()?;
        let mut index = Index::load(&self.paths, &branch)?;
        let (_, head) = self.head()?;

        let untracked = index.remove(path, head.tracked().contains_key(path))?;
        if untracked {
            self.tree.delete(path)?;
        }
        index.save(&self.paths, &branch)?;
        tracing::debug!(path = %path, untracked, "removed");
        Ok(())
    }

    // =========================================================================
    // History
    // =========================================================================

    /// First-parent history of HEAD, newest first.
    pub fn log(&self) -> Result<Vec<(ObjectId, Commit)>, RepoError> {
        let (head_id, _) = self.head()?;
        Ok(graph::first_parent_history(&self.objects(), &head_id)?)
    }

    /// Every stored commit, ordered by id.
    pub fn global_log(&self) -> Result<Vec<(ObjectId, Commit)>, RepoError> {
        let store = self.objects();
        store
            .list_commits()?
            .into_iter()
            .map(|oid| {
                let commit = store.get_commit(&oid)?;
                Ok((oid, commit))
            })
            .collect()
    }

    /// Ids of every commit whose message is exactly `message`.
    ///
    /// # Errors
    ///
    /// [`RepoError::NoCommitWithMessage`] if none match.
    pub fn find(&self, message: &str) -> Result<Vec<ObjectId>, RepoError> {
        let found: Vec<ObjectId> = self
            .global_log()?
            .into_iter()
            .filter(|(_, commit)| commit.message() == message)
            .map(|(oid, _)| oid)
            .collect();
        if found.is_empty() {
            return Err(RepoError::NoCommitWithMessage);
        }
        Ok(found)
    }

    // =========================================================================
    // Checkout, branches and reset
    // =========================================================================

    /// Restore `path` from `commit` (HEAD when `None`) into the work tree.
    ///
    /// The index is not touched.
    pub fn checkout_file(&self, commit: Option<&str>, path: &RepoPath) -> Result<(), RepoError> {
        let (_, commit) = match commit {
            Some(id) => self.resolve_commit(id)?,
            None => self.head()?,
        };
        let blob = commit
            .tracked()
            .get(path)
            .ok_or(RepoError::FileNotInCommit)?;
        let bytes = self.objects().get(blob)?;
        self.tree.write(path, &bytes)?;
        tracing::debug!(path = %path, "checked out file");
        Ok(())
    }

    /// Switch to `name`, replacing the work tree with its head snapshot.
    pub fn checkout_branch(&self, name: &str) -> Result<(), RepoError> {
        let target = BranchName::new(name).map_err(|_| RepoError::CheckoutNoSuchBranch)?;
        let (_, target_commit) = self
            .branch_commit(&target)?
            .ok_or(RepoError::CheckoutNoSuchBranch)?;
        if target == self.current_branch()? {
            return Err(RepoError::CannotCheckoutCurrentBranch);
        }

        let (_, head) = self.head()?;
        self.sync_worktree(&head, &target_commit)?;
        Index::clear(&self.paths, &target)?;
        self.refs().set_head(&target)?;

        tracing::info!(branch = %target, "checked out branch");
        Ok(())
    }

    /// Create `name` at the current head. HEAD does not move.
    pub fn create_branch(&self, name: &str) -> Result<(), RepoError> {
        let branch = BranchName::new(name)?;
        if self.refs().branch_exists(&branch)? || self.refs().name_collides(&branch) {
            return Err(RepoError::BranchExists);
        }
        let (head_id, _) = self.head()?;
        self.refs().set_branch(&branch, &head_id)?;
        tracing::info!(branch = %branch, commit = %head_id, "created branch");
        Ok(())
    }

    /// Delete the pointer `name`. Its commits stay in the store.
    pub fn remove_branch(&self, name: &str) -> Result<(), RepoError> {
        let branch = BranchName::new(name).map_err(|_| RepoError::NoSuchBranch)?;
        if !self.refs().branch_exists(&branch)? {
            return Err(RepoError::NoSuchBranch);
        }
        if branch == self.current_branch()? {
            return Err(RepoError::CannotRemoveCurrentBranch);
        }
        self.refs().delete_branch(&branch)?;
        Index::clear(&self.paths, &branch)?;
        tracing::info!(branch = %branch, "removed branch");
        Ok(())
    }

    /// Move the current branch to commit `id` and sync the work tree to it.
    pub fn reset(&self, id: &str) -> Result<(), RepoError> {
        let (target_id, target) = self.resolve_commit(id)?;
        let branch = self.current_branch()?;
        let (_, head) = self.head()?;

        self.sync_worktree(&head, &target)?;
        Index::clear(&self.paths, &branch)?;
        self.refs().set_branch(&branch, &target_id)?;

        tracing::info!(branch = %branch, commit = %target_id, "reset");
        Ok(())
    }

    /// Replace the work tree snapshot of `from` with that of `to`.
    ///
    /// Files tracked by `from` but not `to` are deleted and every file `to`
    /// tracks is written. Untracked files are left alone unless they would
    /// be overwritten, which fails before anything changes.
    pub(crate) fn sync_worktree(&self, from: &Commit, to: &Commit) -> Result<(), RepoError> {
        self.check_untracked(from, to)?;

        for path in from.tracked().keys() {
            if !to.tracked().contains_key(path) {
                self.tree.delete(path)?;
            }
        }
        let store = self.objects();
        for (path, blob) in to.tracked() {
            let bytes = store.get(blob)?;
            self.tree.write(path, &bytes)?;
        }
        Ok(())
    }

    /// Fail if a work tree file unknown to `head` would be overwritten by a
    /// different version from `target`.
    pub(crate) fn check_untracked(&self, head: &Commit, target: &Commit) -> Result<(), RepoError> {
        for path in self.tree.list_files()? {
            if head.tracked().contains_key(&path) {
                continue;
            }
            let Some(incoming) = target.tracked().get(&path) else {
                continue;
            };
            let current = ObjectId::hash_bytes(&self.tree.read(&path)?);
            if &current != incoming {
                tracing::debug!(path = %path, "untracked file would be overwritten");
                return Err(RepoError::UntrackedObstruction);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), Config::default()).unwrap();
        (temp, repo)
    }

    fn p(name: &str) -> RepoPath {
        RepoPath::new(name).unwrap()
    }

    fn write(temp: &TempDir, name: &str, content: &str) {
        let path = temp.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn read(temp: &TempDir, name: &str) -> String {
        fs::read_to_string(temp.path().join(name)).unwrap()
    }

    #[test]
    fn init_creates_root_and_master() {
        let (_temp, repo) = setup();
        assert_eq!(repo.current_branch().unwrap().as_str(), "master");
        let (head_id, head) = repo.head().unwrap();
        assert_eq!(head_id, Commit::root().id().unwrap());
        assert!(head.tracked().is_empty());
        assert!(repo.paths().config_path().exists());
    }

    #[test]
    fn init_twice_fails() {
        let (temp, _repo) = setup();
        assert!(matches!(
            Repository::init(temp.path(), Config::default()),
            Err(RepoError::AlreadyInitialized)
        ));
    }

    #[test]
    fn open_outside_repo_fails() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            Repository::open(temp.path()),
            Err(RepoError::NotInitialized)
        ));
    }

    #[test]
    fn open_from_subdirectory() {
        let (temp, _repo) = setup();
        let nested = temp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        let repo = Repository::open(&nested).unwrap();
        assert_eq!(repo.paths().work_dir(), temp.path());
    }

    #[test]
    fn add_missing_file_fails() {
        let (_temp, repo) = setup();
        assert!(matches!(
            repo.add(&p("nope.txt")),
            Err(RepoError::FileNotFound)
        ));
    }

    #[test]
    fn add_commit_advances_branch() {
        let (temp, repo) = setup();
        write(&temp, "a.txt", "hello");
        repo.add(&p("a.txt")).unwrap();
        assert_eq!(repo.index().unwrap().staged().len(), 1);

        let oid = repo.commit("first").unwrap();
        let (head_id, head) = repo.head().unwrap();
        assert_eq!(head_id, oid);
        assert_eq!(
            head.tracked().get(&p("a.txt")),
            Some(&ObjectId::hash_bytes(b"hello"))
        );
        assert!(repo.index().unwrap().is_empty());
    }

    #[test]
    fn add_unchanged_tracked_file_stages_nothing() {
        let (temp, repo) = setup();
        write(&temp, "a.txt", "hello");
        repo.add(&p("a.txt")).unwrap();
        repo.commit("first").unwrap();

        repo.add(&p("a.txt")).unwrap();
        assert!(repo.index().unwrap().is_empty());
        assert!(matches!(repo.commit("again"), Err(RepoError::NothingToCommit)));
    }

    #[test]
    fn empty_message_rejected() {
        let (temp, repo) = setup();
        write(&temp, "a.txt", "hello");
        repo.add(&p("a.txt")).unwrap();
        assert!(matches!(repo.commit(""), Err(RepoError::EmptyMessage)));
    }

    #[test]
    fn remove_tracked_deletes_and_commits_removal() {
        let (temp, repo) = setup();
        write(&temp, "a.txt", "hello");
        repo.add(&p("a.txt")).unwrap();
        repo.commit("first").unwrap();

        repo.remove(&p("a.txt")).unwrap();
        assert!(!temp.path().join("a.txt").exists());
        repo.commit("drop a").unwrap();
        assert!(repo.head().unwrap().1.tracked().is_empty());
    }

    #[test]
    fn remove_staged_only_keeps_file() {
        let (temp, repo) = setup();
        write(&temp, "a.txt", "hello");
        repo.add(&p("a.txt")).unwrap();
        repo.remove(&p("a.txt")).unwrap();
        assert!(temp.path().join("a.txt").exists());
        assert!(repo.index().unwrap().is_empty());
    }

    #[test]
    fn remove_unknown_fails() {
        let (temp, repo) = setup();
        write(&temp, "a.txt", "hello");
        assert!(matches!(
            repo.remove(&p("a.txt")),
            Err(RepoError::NothingToRemove)
        ));
    }

    #[test]
    fn add_after_remove_cancels_removal() {
        let (temp, repo) = setup();
        write(&temp, "a.txt", "hello");
        repo.add(&p("a.txt")).unwrap();
        repo.commit("first").unwrap();
        repo.remove(&p("a.txt")).unwrap();

        write(&temp, "a.txt", "hello");
        repo.add(&p("a.txt")).unwrap();
        assert!(repo.index().unwrap().is_empty());
    }

    #[test]
    fn log_and_find() {
        let (temp, repo) = setup();
        write(&temp, "a.txt", "1");
        repo.add(&p("a.txt")).unwrap();
        let first = repo.commit("first").unwrap();
        write(&temp, "a.txt", "2");
        repo.add(&p("a.txt")).unwrap();
        let second = repo.commit("second").unwrap();

        let log: Vec<ObjectId> = repo.log().unwrap().into_iter().map(|(id, _)| id).collect();
        assert_eq!(log, vec![second, first.clone(), Commit::root().id().unwrap()]);
        assert_eq!(repo.find("first").unwrap(), vec![first]);
        assert_eq!(repo.global_log().unwrap().len(), 3);
        assert!(matches!(
            repo.find("missing"),
            Err(RepoError::NoCommitWithMessage)
        ));
    }

    #[test]
    fn checkout_file_from_head_and_commit() {
        let (temp, repo) = setup();
        write(&temp, "a.txt", "v1");
        repo.add(&p("a.txt")).unwrap();
        let v1 = repo.commit("v1").unwrap();
        write(&temp, "a.txt", "v2");
        repo.add(&p("a.txt")).unwrap();
        repo.commit("v2").unwrap();

        write(&temp, "a.txt", "scratch");
        repo.checkout_file(None, &p("a.txt")).unwrap();
        assert_eq!(read(&temp, "a.txt"), "v2");

        repo.checkout_file(Some(v1.short(8)), &p("a.txt")).unwrap();
        assert_eq!(read(&temp, "a.txt"), "v1");

        assert!(matches!(
            repo.checkout_file(None, &p("other.txt")),
            Err(RepoError::FileNotInCommit)
        ));
        assert!(matches!(
            repo.checkout_file(Some("ffffffff"), &p("a.txt")),
            Err(RepoError::NoSuchCommit)
        ));
    }

    #[test]
    fn branch_checkout_swaps_tree() {
        let (temp, repo) = setup();
        write(&temp, "shared.txt", "base");
        repo.add(&p("shared.txt")).unwrap();
        repo.commit("base").unwrap();
        repo.create_branch("dev").unwrap();

        write(&temp, "master-only.txt", "m");
        repo.add(&p("master-only.txt")).unwrap();
        repo.commit("master work").unwrap();

        repo.checkout_branch("dev").unwrap();
        assert_eq!(repo.current_branch().unwrap().as_str(), "dev");
        assert!(!temp.path().join("master-only.txt").exists());
        assert_eq!(read(&temp, "shared.txt"), "base");

        repo.checkout_branch("master").unwrap();
        assert_eq!(read(&temp, "master-only.txt"), "m");
    }

    #[test]
    fn checkout_branch_errors() {
        let (_temp, repo) = setup();
        assert!(matches!(
            repo.checkout_branch("nope"),
            Err(RepoError::CheckoutNoSuchBranch)
        ));
        assert!(matches!(
            repo.checkout_branch("master"),
            Err(RepoError::CannotCheckoutCurrentBranch)
        ));
    }

    #[test]
    fn checkout_blocked_by_untracked_file() {
        let (temp, repo) = setup();
        repo.create_branch("dev").unwrap();
        repo.checkout_branch("dev").unwrap();
        write(&temp, "a.txt", "dev version");
        repo.add(&p("a.txt")).unwrap();
        repo.commit("dev adds a").unwrap();
        repo.checkout_branch("master").unwrap();

        write(&temp, "a.txt", "local scratch");
        assert!(matches!(
            repo.checkout_branch("dev"),
            Err(RepoError::UntrackedObstruction)
        ));
        assert_eq!(read(&temp, "a.txt"), "local scratch");
    }

    #[test]
    fn checkout_blocked_by_untracked_dotfile() {
        let (temp, repo) = setup();
        repo.create_branch("dev").unwrap();
        repo.checkout_branch("dev").unwrap();
        write(&temp, ".env", "dev secrets");
        repo.add(&p(".env")).unwrap();
        repo.commit("dev adds .env").unwrap();
        repo.checkout_branch("master").unwrap();
        assert!(!temp.path().join(".env").exists());

        write(&temp, ".env", "local secrets");
        assert!(matches!(
            repo.checkout_branch("dev"),
            Err(RepoError::UntrackedObstruction)
        ));
        assert_eq!(read(&temp, ".env"), "local secrets");
    }

    #[test]
    fn branch_create_and_remove() {
        let (_temp, repo) = setup();
        repo.create_branch("dev").unwrap();
        assert!(matches!(
            repo.create_branch("dev"),
            Err(RepoError::BranchExists)
        ));
        assert!(matches!(
            repo.remove_branch("master"),
            Err(RepoError::CannotRemoveCurrentBranch)
        ));
        repo.remove_branch("dev").unwrap();
        assert!(matches!(
            repo.remove_branch("dev"),
            Err(RepoError::NoSuchBranch)
        ));
    }

    #[test]
    fn nested_branch_names_cannot_shadow_each_other() {
        let (_temp, repo) = setup();
        repo.create_branch("a").unwrap();
        assert!(matches!(
            repo.create_branch("a/b"),
            Err(RepoError::BranchExists)
        ));

        repo.create_branch("x/y").unwrap();
        assert!(matches!(
            repo.create_branch("x"),
            Err(RepoError::BranchExists)
        ));
        repo.remove_branch("x/y").unwrap();
        repo.create_branch("x").unwrap();
    }

    #[test]
    fn reset_moves_branch_and_tree() {
        let (temp, repo) = setup();
        write(&temp, "a.txt", "v1");
        repo.add(&p("a.txt")).unwrap();
        let v1 = repo.commit("v1").unwrap();
        write(&temp, "a.txt", "v2");
        write(&temp, "b.txt", "b");
        repo.add(&p("a.txt")).unwrap();
        repo.add(&p("b.txt")).unwrap();
        repo.commit("v2").unwrap();

        write(&temp, "c.txt", "pending");
        repo.add(&p("c.txt")).unwrap();

        repo.reset(v1.as_str()).unwrap();
        assert_eq!(repo.head().unwrap().0, v1);
        assert_eq!(read(&temp, "a.txt"), "v1");
        assert!(!temp.path().join("b.txt").exists());
        assert!(repo.index().unwrap().is_empty());
        // Untracked files survive.
        assert_eq!(read(&temp, "c.txt"), "pending");
    }

    #[test]
    fn reset_unknown_commit() {
        let (_temp, repo) = setup();
        assert!(matches!(
            repo.reset("0123abcd"),
            Err(RepoError::NoSuchCommit)
        ));
    }

    #[test]
    fn index_is_per_branch() {
        let (temp, repo) = setup();
        repo.create_branch("dev").unwrap();
        write(&temp, "a.txt", "x");
        repo.add(&p("a.txt")).unwrap();

        repo.checkout_branch("dev").unwrap();
        assert!(repo.index().unwrap().is_empty());
    }
}
