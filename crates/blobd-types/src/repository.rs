//! Repository names.
//!
//! A repository is a namespace that scopes a group of objects. It is parsed
//! from the URL path and used as half of the object table key; it is not an
//! access-control boundary.
//!
//! Valid repository names:
//! - Must be non-empty
//! - Must not contain `/` (a repository is exactly one path segment)

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A validated repository name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Repository(String);

impl Repository {
    /// Validate and wrap a repository name.
    ///
    /// ```
    /// use blobd_types::Repository;
    ///
    /// assert!(Repository::new("codingtest").is_ok());
    /// assert!(Repository::new("").is_err());
    /// assert!(Repository::new("a/b").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidRepository {
                name,
                reason: "repository name must not be empty",
            });
        }
        if name.contains('/') {
            return Err(TypeError::InvalidRepository {
                name,
                reason: "repository name must not contain '/'",
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Repository({:?})", self.0)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Repository {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Repository {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Repository {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Repository {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Repository> for String {
    fn from(repo: Repository) -> Self {
        repo.0
    }
}
