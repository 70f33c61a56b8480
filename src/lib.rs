//! twig - a small distributed version-control system
//!
//! twig snapshots a working directory into content-addressed commits,
//! keeps named branches over them, merges branches with a three-way merge
//! and exchanges history with other repositories reachable by path.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - One method per command on a [`engine::Repository`]
//! - [`core`] - Domain types, object store, refs, index, graph walks and merge planning
//! - [`worktree`] - Working-directory file access
//! - [`ui`] - Output formatting
//! - [`logging`] - Diagnostic logging setup
//!
//! # Correctness Invariants
//!
//! twig maintains the following invariants:
//!
//! 1. Stored objects are immutable and named by their content hash
//! 2. A branch never points at a commit that is not stored
//! 3. A failed command leaves the work tree unchanged
//! 4. Untracked files are never overwritten

pub mod cli;
pub mod core;
pub mod engine;
pub mod logging;
pub mod ui;
pub mod worktree;
