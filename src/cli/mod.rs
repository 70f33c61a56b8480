//! cli
//!
//! Command-line interface layer for twig.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install logging
//! - Delegate to command handlers
//! - Does NOT perform repository mutations directly
//!
//! # Errors
//!
//! Every failure surfaces as an `anyhow::Error` whose message is printed
//! verbatim by `main`, which then exits with status 1. Argument errors are
//! reduced to a single fixed message instead of clap's usage text.

pub mod args;
pub mod commands;

pub use args::{Cli, Command};

use clap::error::ErrorKind;
use clap::Parser;
use thiserror::Error;

use crate::engine::{self, RepoError};
use crate::logging;
use anyhow::Result;

/// Errors detected before a command runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("Please enter a command.")]
    NoCommand,

    #[error("No command with that name exists.")]
    UnknownCommand,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    run_from(std::env::args_os())
}

/// Run the CLI with explicit arguments, the first being the program name.
pub fn run_from<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            ErrorKind::InvalidSubcommand => return Err(CliError::UnknownCommand.into()),
            ErrorKind::MissingSubcommand
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                return Err(CliError::NoCommand.into())
            }
            _ => return Err(RepoError::UsageError.into()),
        },
    };

    logging::init(cli.debug);

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    let command = cli.command.ok_or(CliError::NoCommand)?;
    tracing::debug!(?command, "dispatching");
    commands::dispatch(command, &ctx)
}
