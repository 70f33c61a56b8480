//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Printing that respects quiet mode
//! - [`format`] - Rendering of log entries and status reports
//!
//! # Design
//!
//! Command handlers never print directly. Rendering is pure string
//! building so it can be tested without capturing stdout.

pub mod format;
pub mod output;
