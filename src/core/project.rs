//! Project identification - WHICH project a dependency belongs to.
//!
//! A project root is the canonical base import path of one versioned project.
//! Any number of packages (sub-paths) can map onto the same root.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Canonical project root, e.g. `github.com/user/repo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectRoot(String);

impl ProjectRoot {
    /// Create a project root from any string-like value.
    pub fn new(root: impl Into<String>) -> Self {
        ProjectRoot(root.into())
    }

    /// Get the root as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectRoot {
    fn from(s: &str) -> Self {
        ProjectRoot::new(s)
    }
}

impl From<String> for ProjectRoot {
    fn from(s: String) -> Self {
        ProjectRoot(s)
    }
}

impl AsRef<str> for ProjectRoot {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A project root plus the (optional) alternate location it is fetched from.
///
/// Two identifiers are equal when their roots are equal; the source only
/// changes where the project is fetched from, not which project it is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectIdentifier {
    pub root: ProjectRoot,

    /// Fork or mirror URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ProjectIdentifier {
    /// Identify a project fetched from its canonical location.
    pub fn new(root: impl Into<ProjectRoot>) -> Self {
        ProjectIdentifier {
            root: root.into(),
            source: None,
        }
    }

    /// Identify a project fetched from an alternate source.
    ///
    /// An empty source is treated as no source at all.
    pub fn with_source(root: impl Into<ProjectRoot>, source: impl Into<String>) -> Self {
        let source = source.into();
        ProjectIdentifier {
            root: root.into(),
            source: if source.is_empty() { None } else { Some(source) },
        }
    }

    /// The location this project is fetched from.
    pub fn fetch_location(&self) -> &str {
        self.source.as_deref().unwrap_or(self.root.as_str())
    }
}

impl PartialEq for ProjectIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl Eq for ProjectIdentifier {}

impl Hash for ProjectIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root.hash(state);
    }
}

impl fmt::Display for ProjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}({})", self.root, source),
            None => write!(f, "{}", self.root),
        }
    }
}
