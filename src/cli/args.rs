//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// twig - a small distributed version-control system
#[derive(Parser, Debug)]
#[command(name = "twig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if twig was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create a repository in the current directory
    Init,

    /// Stage a file for the next commit
    Add {
        /// File to stage
        file: String,
    },

    /// Record staged changes as a new commit
    Commit {
        /// Commit message
        message: Option<String>,
    },

    /// Unstage a file, or stop tracking it and delete it
    Rm {
        /// File to remove
        file: String,
    },

    /// Show the history of the current head
    Log,

    /// Show every commit ever made
    #[command(name = "global-log")]
    GlobalLog,

    /// Print the ids of commits with the given message
    Find {
        /// Exact commit message
        message: String,
    },

    /// Show branches, staged, removed, modified and untracked files
    Status,

    /// Restore a file or switch branches
    #[command(after_help = "\
FORMS:
    twig checkout -- <file>          restore <file> from the head commit
    twig checkout <id> -- <file>     restore <file> from commit <id>
    twig checkout <branch>           switch to <branch>")]
    Checkout {
        /// Branch to switch to, or commit to restore from
        target: Option<String>,

        /// File to restore
        #[arg(last = true)]
        file: Option<String>,
    },

    /// Create a branch at the current head
    Branch {
        /// New branch name
        name: String,
    },

    /// Delete a branch pointer
    #[command(name = "rm-branch")]
    RmBranch {
        /// Branch to delete
        name: String,
    },

    /// Move the current branch to a commit
    Reset {
        /// Commit id or unique prefix
        commit: String,
    },

    /// Merge a branch into the current branch
    Merge {
        /// Branch to merge
        branch: String,
    },

    /// Record a remote repository
    #[command(name = "add-remote")]
    AddRemote {
        /// Remote name
        name: String,
        /// Path to the remote's .twig directory
        path: PathBuf,
    },

    /// Forget a remote repository
    #[command(name = "rm-remote")]
    RmRemote {
        /// Remote name
        name: String,
    },

    /// Copy the current head to a remote branch
    Push {
        /// Remote name
        remote: String,
        /// Remote branch
        branch: String,
    },

    /// Copy a remote branch to <remote>/<branch>
    Fetch {
        /// Remote name
        remote: String,
        /// Remote branch
        branch: String,
    },

    /// Fetch a remote branch and merge it
    Pull {
        /// Remote name
        remote: String,
        /// Remote branch
        branch: String,
    },
}
