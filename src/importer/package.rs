//! Raw and consolidated import records.

use serde::{Deserialize, Serialize};

use crate::core::ProjectRoot;

/// One package reference found in a foreign tool's configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedPackage {
    /// Package path, not necessarily the project root
    pub name: String,

    /// Revision or tag the package is locked to
    #[serde(default, rename = "lock", alias = "lock_hint")]
    pub lock_hint: String,

    /// Alternate source, or fork, for the project
    #[serde(default)]
    pub source: String,

    /// Branch or version the package is constrained to
    #[serde(default, rename = "constraint", alias = "constraint_hint")]
    pub constraint_hint: String,
}

impl ImportedPackage {
    pub fn new(name: impl Into<String>) -> Self {
        ImportedPackage {
            name: name.into(),
            ..ImportedPackage::default()
        }
    }

    pub fn with_lock_hint(mut self, hint: impl Into<String>) -> Self {
        self.lock_hint = hint.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_constraint_hint(mut self, hint: impl Into<String>) -> Self {
        self.constraint_hint = hint.into();
        self
    }
}

/// All package references for one project root, merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedProject {
    pub root: ProjectRoot,

    /// Merged fields; `name` is the root
    pub package: ImportedPackage,
}

impl ImportedProject {
    pub(crate) fn new(root: ProjectRoot, mut package: ImportedPackage) -> Self {
        package.name = root.to_string();
        ImportedProject { root, package }
    }

    /// Fill in every field that is still empty from `pkg`.
    ///
    /// The first reference to set a field wins; later ones only fill gaps,
    /// since some tools split a config and a lock file.
    pub(crate) fn merge(&mut self, pkg: &ImportedPackage) {
        fill(&mut self.package.source, &pkg.source);
        fill(&mut self.package.constraint_hint, &pkg.constraint_hint);
        fill(&mut self.package.lock_hint, &pkg.lock_hint);
    }
}

fn fill(field: &mut String, value: &str) {
    if field.is_empty() && !value.is_empty() {
        *field = value.to_string();
    }
}

/// The `[[package]]` list of an imports file.
#[derive(Debug, Default, Deserialize)]
pub struct ImportsFile {
    #[serde(default, rename = "package")]
    pub packages: Vec<ImportedPackage>,
}
