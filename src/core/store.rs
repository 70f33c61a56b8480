//! core::store
//!
//! Content-addressed object storage.
//!
//! # Architecture
//!
//! Blobs live under `objects/` and commits under `commits/`, each file
//! named by the SHA-256 of its contents. Since names are derived from
//! content, writing an object that already exists is a no-op and stored
//! objects are never modified.
//!
//! The store does not cache anything. Every read goes to disk, which keeps
//! a local repository and a remote repository interchangeable: both are
//! just an [`ObjectStore`] over a different [`RepoPaths`].
//!
//! # Example
//!
//! ```
//! use twig::core::paths::RepoPaths;
//! use twig::core::store::ObjectStore;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let paths = RepoPaths::for_work_dir(dir.path());
//! paths.ensure_dirs().unwrap();
//!
//! let store = ObjectStore::new(&paths);
//! let oid = store.put(b"hello").unwrap();
//! assert_eq!(store.get(&oid).unwrap(), b"hello");
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::commit::Commit;
use crate::core::paths::RepoPaths;
use crate::core::types::ObjectId;

/// Errors from object storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No stored object has this id.
    #[error("object not found: {0}")]
    NotFound(String),

    /// An id prefix matched more than one commit.
    #[error("ambiguous commit id prefix: {0}")]
    AmbiguousPrefix(String),

    /// A stored file could not be parsed.
    #[error("corrupt {what}: {message}")]
    Corrupt { what: String, message: String },

    /// Filesystem failure.
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization failure.
    #[error("failed to serialize: {0}")]
    Serialize(String),
}

/// Read-only access to commits by id.
///
/// History traversal only needs this, which lets graph algorithms run
/// against an in-memory commit set in tests.
pub trait CommitSource {
    /// Load the commit with id `oid`.
    fn commit(&self, oid: &ObjectId) -> Result<Commit, StoreError>;
}

/// Blob and commit storage for one repository.
pub struct ObjectStore<'a> {
    paths: &'a RepoPaths,
}

impl<'a> ObjectStore<'a> {
    pub fn new(paths: &'a RepoPaths) -> Self {
        Self { paths }
    }

    // =========================================================================
    // Blobs
    // =========================================================================

    /// Store `bytes` as a blob and return its id.
    pub fn put(&self, bytes: &[u8]) -> Result<ObjectId, StoreError> {
        let oid = ObjectId::hash_bytes(bytes);
        let path = self.paths.object_path(&oid);
        if !path.exists() {
            write_atomic(&path, bytes).map_err(|source| StoreError::Io { path, source })?;
        }
        Ok(oid)
    }

    /// Read the blob with id `oid`.
    pub fn get(&self, oid: &ObjectId) -> Result<Vec<u8>, StoreError> {
        let path = self.paths.object_path(oid);
        read_object(&path, oid)
    }

    pub fn exists(&self, oid: &ObjectId) -> bool {
        self.paths.object_path(oid).is_file()
    }

    // =========================================================================
    // Commits
    // =========================================================================

    /// Store `commit` and return its id.
    pub fn put_commit(&self, commit: &Commit) -> Result<ObjectId, StoreError> {
        let json = commit
            .to_canonical_json()
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        let oid = ObjectId::hash_bytes(&json);
        let path = self.paths.commit_path(&oid);
        if !path.exists() {
            write_atomic(&path, &json).map_err(|source| StoreError::Io { path, source })?;
        }
        Ok(oid)
    }

    /// Load the commit with id `oid`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if no such commit is stored
    /// - [`StoreError::Corrupt`] if the stored JSON does not parse
    pub fn get_commit(&self, oid: &ObjectId) -> Result<Commit, StoreError> {
        let path = self.paths.commit_path(oid);
        let bytes = read_object(&path, oid)?;
        Commit::from_json(&bytes).map_err(|e| StoreError::Corrupt {
            what: format!("commit {oid}"),
            message: e.to_string(),
        })
    }

    pub fn has_commit(&self, oid: &ObjectId) -> bool {
        self.paths.commit_path(oid).is_file()
    }

    /// Ids of every stored commit, sorted.
    pub fn list_commits(&self) -> Result<Vec<ObjectId>, StoreError> {
        let dir = self.paths.commits_dir();
        let entries = fs::read_dir(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
            // Skip temp files and anything else that is not an object id.
            if let Some(oid) = entry
                .file_name()
                .to_str()
                .and_then(|name| ObjectId::new(name).ok())
            {
                ids.push(oid);
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Resolve a full or abbreviated commit id.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if nothing matches
    /// - [`StoreError::AmbiguousPrefix`] if more than one commit matches
    pub fn resolve_prefix(&self, prefix: &str) -> Result<ObjectId, StoreError> {
        let prefix = prefix.to_ascii_lowercase();
        if prefix.len() == ObjectId::HEX_LEN {
            let oid = ObjectId::new(prefix.clone()).map_err(|_| StoreError::NotFound(prefix))?;
            return if self.has_commit(&oid) {
                Ok(oid)
            } else {
                Err(StoreError::NotFound(oid.to_string()))
            };
        }
        if prefix.is_empty() {
            return Err(StoreError::NotFound(prefix));
        }

        let mut matches = self
            .list_commits()?
            .into_iter()
            .filter(|oid| oid.as_str().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(oid), None) => Ok(oid),
            (Some(_), Some(_)) => Err(StoreError::AmbiguousPrefix(prefix)),
            (None, _) => Err(StoreError::NotFound(prefix)),
        }
    }
}

impl CommitSource for ObjectStore<'_> {
    fn commit(&self, oid: &ObjectId) -> Result<Commit, StoreError> {
        self.get_commit(oid)
    }
}

fn read_object(path: &Path, oid: &ObjectId) -> Result<Vec<u8>, StoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(StoreError::NotFound(oid.to_string()))
        }
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write `bytes` to `path` through a temp file and rename.
///
/// Parent directories are created as needed. A reader never observes a
/// partially written file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(&temp_path, path)
}
