//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BranchName`] - Validated branch name (may contain `/` for remote-tracking branches)
//! - [`RemoteName`] - Validated remote name (single path component)
//! - [`ObjectId`] - Content hash of a blob or commit (SHA-256, hex)
//! - [`RepoPath`] - Validated repository-relative file path
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so a branch name can never escape the
//! `branches/` directory and a file path can never escape the work tree.
//!
//! # Examples
//!
//! ```
//! use twig::core::types::{BranchName, ObjectId};
//!
//! let branch = BranchName::new("feature/login").unwrap();
//! let oid = ObjectId::hash_bytes(b"hello");
//!
//! assert!(BranchName::new("invalid..name").is_err());
//! assert!(ObjectId::new("not-a-sha").is_err());
//! assert_eq!(oid.as_str().len(), 64);
//! # let _ = branch;
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid remote name: {0}")]
    InvalidRemoteName(String),

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),
}

/// Branch created by `init` when nothing is configured.
pub const DEFAULT_BRANCH: &str = "master";

/// A validated branch name.
///
/// Branch names are stored as files under `.twig/branches/`, so the rules
/// keep them inside that directory:
/// - Cannot be empty
/// - Cannot start with `.` or `-`, or end with `/`
/// - Cannot contain `..`, `//`, `\`, spaces or ASCII control characters
/// - No path component may start with `.`
///
/// Remote-tracking branches use the `<remote>/<branch>` form.
///
/// # Example
///
/// ```
/// use twig::core::types::BranchName;
///
/// let name = BranchName::new("origin/master").unwrap();
/// assert_eq!(name.as_str(), "origin/master");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new(".hidden").is_err());
/// assert!(BranchName::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name violates the rules above.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// The remote-tracking branch for `branch` on `remote`.
    ///
    /// # Example
    ///
    /// ```
    /// use twig::core::types::{BranchName, RemoteName};
    ///
    /// let remote = RemoteName::new("origin").unwrap();
    /// let branch = BranchName::new("master").unwrap();
    /// assert_eq!(BranchName::remote_tracking(&remote, &branch).as_str(), "origin/master");
    /// ```
    pub fn remote_tracking(remote: &RemoteName, branch: &BranchName) -> Self {
        Self(format!("{}/{}", remote.as_str(), branch.as_str()))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot be empty".into(),
            ));
        }
        if name.starts_with('.') || name.starts_with('-') {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot start with '.' or '-'".into(),
            ));
        }
        if name.ends_with('/') || name.starts_with('/') {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot start or end with '/'".into(),
            ));
        }
        if name.contains("..") || name.contains("//") {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot contain '..' or '//'".into(),
            ));
        }
        for c in name.chars() {
            if c == ' ' || c == '\\' || c.is_ascii_control() {
                return Err(TypeError::InvalidBranchName(format!(
                    "branch name cannot contain {c:?}"
                )));
            }
        }
        if name.split('/').any(|component| component.starts_with('.')) {
            return Err(TypeError::InvalidBranchName(
                "path component cannot start with '.'".into(),
            ));
        }
        Ok(())
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BranchName {
    /// The [`DEFAULT_BRANCH`].
    fn default() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated remote name.
///
/// Unlike branch names, remote names are a single component: they prefix
/// remote-tracking branches, so a `/` would make `<remote>/<branch>` ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemoteName(String);

impl RemoteName {
    /// Create a new validated remote name.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.contains('/') {
            return Err(TypeError::InvalidRemoteName(
                "remote name cannot contain '/'".into(),
            ));
        }
        BranchName::validate(&name).map_err(|e| match e {
            TypeError::InvalidBranchName(msg) => TypeError::InvalidRemoteName(msg),
            other => other,
        })?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RemoteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A content hash identifying a stored blob or commit.
///
/// Object ids are lowercase hex SHA-256 digests (64 characters).
///
/// # Example
///
/// ```
/// use twig::core::types::ObjectId;
///
/// let oid = ObjectId::hash_bytes(b"hi");
/// assert_eq!(oid, ObjectId::hash_bytes(b"hi"));
/// assert_eq!(oid.short(7).len(), 7);
///
/// let upper = oid.as_str().to_ascii_uppercase();
/// assert_eq!(ObjectId::new(upper).unwrap(), oid);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Length of a full hex object id.
    pub const HEX_LEN: usize = 64;

    /// Create a new validated object id.
    ///
    /// The id is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidObjectId` if the string is not 64 hex characters.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        Self::validate(&oid)?;
        Ok(Self(oid))
    }

    /// Hash raw bytes into an object id.
    pub fn hash_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hex::encode(hasher.finalize()))
    }

    /// Get an abbreviated form of the id.
    ///
    /// Returns the first `len` characters, or the full id if `len` exceeds it.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    fn validate(oid: &str) -> Result<(), TypeError> {
        if oid.len() != Self::HEX_LEN {
            return Err(TypeError::InvalidObjectId(format!(
                "expected {} hex characters, got {}",
                Self::HEX_LEN,
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidObjectId(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObjectId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ObjectId> for String {
    fn from(oid: ObjectId) -> Self {
        oid.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A work-tree-relative file path using `/` separators.
///
/// Paths are the keys of tracked/staged maps, so they must be stable across
/// platforms and must never point outside the work tree or into `.twig`.
/// Dotfiles are ordinary paths; files under a dot-directory are rejected,
/// matching what [`WorkTree::list_files`](crate::worktree::WorkTree::list_files)
/// can see.
///
/// # Example
///
/// ```
/// use twig::core::types::RepoPath;
///
/// assert_eq!(RepoPath::new("src/main.rs").unwrap().as_str(), "src/main.rs");
/// assert_eq!(RepoPath::new("./notes.txt").unwrap().as_str(), "notes.txt");
/// assert!(RepoPath::new("../escape").is_err());
/// assert!(RepoPath::new(".twig/HEAD").is_err());
/// assert!(RepoPath::new(".env").is_ok());
/// assert!(RepoPath::new(".config/app.toml").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoPath(String);

impl RepoPath {
    pub fn new(path: impl Into<String>) -> Result<Self, TypeError> {
        let raw = path.into().replace('\\', "/");
        let components: Vec<&str> = raw
            .split('/')
            .filter(|c| !c.is_empty() && *c != ".")
            .collect();

        if components.is_empty() {
            return Err(TypeError::InvalidPath("path cannot be empty".into()));
        }
        if components.iter().any(|c| *c == "..") {
            return Err(TypeError::InvalidPath(format!(
                "path '{raw}' leaves the work tree"
            )));
        }
        if raw.starts_with('/') {
            return Err(TypeError::InvalidPath(format!(
                "path '{raw}' must be relative"
            )));
        }
        if components[0] == crate::core::paths::META_DIR {
            return Err(TypeError::InvalidPath(format!(
                "path '{raw}' is inside the repository metadata"
            )));
        }
        // Work tree listing never descends into dot-directories.
        let dirs = &components[..components.len() - 1];
        if dirs.iter().any(|c| c.starts_with('.')) {
            return Err(TypeError::InvalidPath(format!(
                "path '{raw}' is inside a hidden directory"
            )));
        }
        Ok(Self(components.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RepoPath {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RepoPath> for String {
    fn from(path: RepoPath) -> Self {
        path.0
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
