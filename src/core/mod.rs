//! core
//!
//! Core domain types, storage and algorithms for twig.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, RemoteName, ObjectId, RepoPath
//! - [`paths`] - Centralized path routing for twig storage
//! - [`store`] - Content-addressed blob and commit storage
//! - [`refs`] - HEAD, branch and remote records
//! - [`commit`] - Immutable commit snapshots
//! - [`index`] - Per-branch staging area
//! - [`graph`] - Commit DAG traversal and split-point resolution
//! - [`merge`] - Three-way merge planning
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Stored objects are immutable; only refs and the index change
//! - Every store operation names the repository it acts on

pub mod commit;
pub mod config;
pub mod graph;
pub mod index;
pub mod merge;
pub mod paths;
pub mod refs;
pub mod store;
pub mod types;
