//! The resolved-versions side of an import.

use serde::Serialize;

use super::project::ProjectIdentifier;
use super::version::Version;

/// A project locked to a concrete version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockedProject {
    pub ident: ProjectIdentifier,
    pub version: Version,

    /// Packages used from the project; importers leave this empty
    pub packages: Vec<String>,
}

impl LockedProject {
    pub fn new(ident: ProjectIdentifier, version: Version) -> Self {
        LockedProject {
            ident,
            version,
            packages: Vec::new(),
        }
    }
}

/// Locked projects in the order they were imported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportLock {
    pub projects: Vec<LockedProject>,
}

impl ImportLock {
    pub fn new() -> Self {
        ImportLock::default()
    }

    pub fn push(&mut self, project: LockedProject) {
        self.projects.push(project);
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LockedProject> {
        self.projects.iter()
    }
}
