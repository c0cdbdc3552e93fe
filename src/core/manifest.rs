//! The desired-constraints side of an import.

use std::collections::BTreeMap;

use serde::Serialize;

use super::constraint::Constraint;
use super::project::ProjectRoot;

/// Per-project manifest entry: where to fetch it and what to accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub constraint: Constraint,
}

/// Mapping from project root to its constraint, ordered by root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportManifest {
    pub constraints: BTreeMap<ProjectRoot, ProjectProperties>,
}

impl ImportManifest {
    pub fn new() -> Self {
        ImportManifest::default()
    }

    /// Record the properties for `root`, replacing any previous entry.
    pub fn insert(&mut self, root: ProjectRoot, props: ProjectProperties) {
        self.constraints.insert(root, props);
    }

    pub fn get(&self, root: &ProjectRoot) -> Option<&ProjectProperties> {
        self.constraints.get(root)
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProjectRoot, &ProjectProperties)> {
        self.constraints.iter()
    }
}
