//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! twig has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$TWIG_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/twig/config.toml`
//! 3. `~/.config/twig/config.toml`
//!
//! `~/.twig` is never read: repository discovery would treat `~` as a
//! work tree.
//!
//! # Example
//!
//! ```no_run
//! use twig::core::config::Config;
//! use twig::core::paths::RepoPaths;
//!
//! let paths = RepoPaths::for_work_dir("/path/to/repo");
//! let config = Config::load(Some(&paths)).unwrap();
//!
//! println!("Default branch: {}", config.default_branch());
//! println!("Abbrev: {}", config.log_abbrev());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, LogConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::paths::RepoPaths;
use crate::core::store::write_atomic;
use crate::core::types::BranchName;

pub use crate::core::types::DEFAULT_BRANCH;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence: repo config overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `repo` is provided, also loads its `.twig/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or fail
    /// validation. Missing config files are not an error.
    pub fn load(repo: Option<&RepoPaths>) -> Result<Self, ConfigError> {
        Self::load_from(Self::find_global_config(), repo)
    }

    /// Load with an explicit global config path instead of searching.
    pub fn load_from(
        global_path: Option<PathBuf>,
        repo: Option<&RepoPaths>,
    ) -> Result<Self, ConfigError> {
        let global: GlobalConfig = match &global_path {
            Some(path) => read_toml(path)?,
            None => GlobalConfig::default(),
        };
        global.validate()?;

        let repo = match repo.map(RepoPaths::config_path) {
            Some(path) if path.exists() => {
                let config: RepoConfig = read_toml(&path)?;
                config.validate()?;
                Some(config)
            }
            _ => None,
        };

        tracing::debug!(global = ?global_path, repo = repo.is_some(), "loaded config");
        Ok(Self {
            global,
            repo,
            global_path,
        })
    }

    /// Locate the global config file, if one exists.
    fn find_global_config() -> Option<PathBuf> {
        // 1. Check $TWIG_CONFIG
        if let Ok(path) = std::env::var("TWIG_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/twig/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("twig/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.config/twig/config.toml
        dirs::home_dir()
            .map(|home| home.join(".config/twig/config.toml"))
            .filter(|path| path.exists())
    }

    /// Write repo config atomically.
    pub fn write_repo(repo: &RepoPaths, config: &RepoConfig) -> Result<PathBuf, ConfigError> {
        let path = repo.config_path();
        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        write_atomic(&path, contents.as_bytes()).map_err(|e| ConfigError::WriteError {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// The branch `init` creates.
    pub fn default_branch(&self) -> BranchName {
        self.repo
            .as_ref()
            .and_then(|r| r.default_branch.as_deref())
            .or(self.global.default_branch.as_deref())
            .and_then(|name| BranchName::new(name).ok())
            .unwrap_or_default()
    }

    /// Hash prefix length in `Merge:` lines.
    pub fn log_abbrev(&self) -> usize {
        let repo = self
            .repo
            .as_ref()
            .and_then(|r| r.log.as_ref())
            .and_then(|l| l.abbrev);
        let global = self.global.log.as_ref().and_then(|l| l.abbrev);
        repo.or(global).unwrap_or(schema::DEFAULT_ABBREV)
    }

    /// Get the path the global config was loaded from.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
