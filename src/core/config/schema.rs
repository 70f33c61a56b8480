//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$TWIG_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/twig/config.toml`
//! 3. `~/.twig/config.toml` (canonical write location)
//!
//! # Repo Config
//!
//! Located at `.twig/config.toml`, written by `init`.
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., `default_branch` must be
//! a valid branch name).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::BranchName;

/// Shortest allowed hash abbreviation.
pub const MIN_ABBREV: usize = 4;

/// Default hash abbreviation in `Merge:` lines.
pub const DEFAULT_ABBREV: usize = 7;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// default_branch = "main"
///
/// [log]
/// abbrev = 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Branch created by `init`
    pub default_branch: Option<String>,

    /// Log rendering
    pub log: Option<LogConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_default_branch(self.default_branch.as_deref())?;
        if let Some(log) = &self.log {
            log.validate()?;
        }
        Ok(())
    }
}

/// Repository configuration.
///
/// Same keys as [`GlobalConfig`]; values set here win.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Branch created by `init`
    pub default_branch: Option<String>,

    /// Log rendering
    pub log: Option<LogConfig>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_default_branch(self.default_branch.as_deref())?;
        if let Some(log) = &self.log {
            log.validate()?;
        }
        Ok(())
    }
}

/// `[log]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Hash prefix length in `Merge:` lines
    pub abbrev: Option<usize>,
}

impl LogConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(abbrev) = self.abbrev {
            let max = crate::core::types::ObjectId::HEX_LEN;
            if !(MIN_ABBREV..=max).contains(&abbrev) {
                return Err(ConfigError::InvalidValue(format!(
                    "log.abbrev must be between {MIN_ABBREV} and {max}, got {abbrev}"
                )));
            }
        }
        Ok(())
    }
}

fn validate_default_branch(name: Option<&str>) -> Result<(), ConfigError> {
    if let Some(name) = name {
        BranchName::new(name).map_err(|e| {
            ConfigError::InvalidValue(format!("invalid default_branch: {}", e))
        })?;
    }
    Ok(())
}
