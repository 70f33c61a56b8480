//! worktree
//!
//! Working-directory file access.
//!
//! # Architecture
//!
//! The engine never touches the work tree directly. Every read, write and
//! delete goes through the [`WorkTree`] trait, keyed by [`RepoPath`], so
//! paths can never escape the tree. [`FsWorkTree`] is the filesystem
//! implementation.
//!
//! # Listing
//!
//! [`WorkTree::list_files`] walks the tree recursively and skips every
//! directory whose name starts with `.`, which excludes `.twig` itself.
//! Dotfiles are listed like any other file.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::RepoPath;

/// Errors from work tree access.
#[derive(Debug, Error)]
pub enum WorkTreeError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: RepoPath,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: RepoPath,
        source: std::io::Error,
    },

    #[error("failed to delete '{path}': {source}")]
    Delete {
        path: RepoPath,
        source: std::io::Error,
    },

    #[error("failed to list '{}': {source}", dir.display())]
    List {
        dir: PathBuf,
        source: std::io::Error,
    },
}

/// File operations on a working directory.
pub trait WorkTree {
    fn exists(&self, path: &RepoPath) -> bool;

    fn read(&self, path: &RepoPath) -> Result<Vec<u8>, WorkTreeError>;

    /// Write `bytes`, creating parent directories.
    fn write(&self, path: &RepoPath, bytes: &[u8]) -> Result<(), WorkTreeError>;

    /// Delete the file. Absent files are not an error.
    fn delete(&self, path: &RepoPath) -> Result<(), WorkTreeError>;

    /// Every visible file, sorted.
    fn list_files(&self) -> Result<Vec<RepoPath>, WorkTreeError>;
}

/// A work tree rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct FsWorkTree {
    root: PathBuf,
}

impl FsWorkTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &RepoPath) -> PathBuf {
        self.root.join(path.as_str())
    }

    fn walk(&self, dir: &Path, prefix: &str, out: &mut Vec<RepoPath>) -> Result<(), WorkTreeError> {
        let entries = fs::read_dir(dir).map_err(|source| WorkTreeError::List {
            dir: dir.to_path_buf(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| WorkTreeError::List {
                dir: dir.to_path_buf(),
                source,
            })?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(dir = %dir.display(), "skipping non-UTF-8 file name");
                continue;
            };
            let relative = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };
            let file_type = entry.file_type().map_err(|source| WorkTreeError::List {
                dir: dir.to_path_buf(),
                source,
            })?;
            if file_type.is_dir() {
                if name.starts_with('.') {
                    continue;
                }
                self.walk(&entry.path(), &relative, out)?;
            } else if let Ok(path) = RepoPath::new(relative) {
                out.push(path);
            }
        }
        Ok(())
    }
}

impl WorkTree for FsWorkTree {
    fn exists(&self, path: &RepoPath) -> bool {
        self.full_path(path).is_file()
    }

    fn read(&self, path: &RepoPath) -> Result<Vec<u8>, WorkTreeError> {
        fs::read(self.full_path(path)).map_err(|source| WorkTreeError::Read {
            path: path.clone(),
            source,
        })
    }

    fn write(&self, path: &RepoPath, bytes: &[u8]) -> Result<(), WorkTreeError> {
        let full = self.full_path(path);
        let write_err = |source| WorkTreeError::Write {
            path: path.clone(),
            source,
        };
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&full, bytes).map_err(write_err)
    }

    fn delete(&self, path: &RepoPath) -> Result<(), WorkTreeError> {
        match fs::remove_file(self.full_path(path)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(WorkTreeError::Delete {
                path: path.clone(),
                source,
            }),
        }
    }

    fn list_files(&self) -> Result<Vec<RepoPath>, WorkTreeError> {
        let mut files = Vec::new();
        self.walk(&self.root, "", &mut files)?;
        files.sort();
        Ok(files)
    }
}
