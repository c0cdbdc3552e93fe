//! Catalog source - versions read from a static TOML file.
//!
//! The catalog stands in for a live source manager: it records, per project,
//! the tags and branches that exist and the revision each points at. Nothing
//! is fetched.
//!
//! ```toml
//! [[project]]
//! root = "github.com/x/y"
//! prefixes = ["example.org/y"]
//!
//! [[project.version]]
//! tag = "v1.2.0"
//! revision = "abc123"
//!
//! [[project.version]]
//! branch = "master"
//! revision = "def456"
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::deduce::deduce_root;
use super::SourceManager;
use crate::core::{ProjectIdentifier, ProjectRoot, Revision, Version};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "project")]
    projects: Vec<CatalogProject>,
}

#[derive(Debug, Deserialize)]
struct CatalogProject {
    root: String,

    /// Additional import path prefixes that belong to this root
    #[serde(default)]
    prefixes: Vec<String>,

    #[serde(default, rename = "version")]
    versions: Vec<CatalogVersion>,
}

#[derive(Debug, Deserialize)]
struct CatalogVersion {
    tag: Option<String>,
    branch: Option<String>,
    revision: String,
}

impl CatalogVersion {
    fn to_version(&self, root: &str) -> Result<Version> {
        let label = match (&self.tag, &self.branch) {
            (Some(tag), None) => Version::tag(tag),
            (None, Some(branch)) => Version::branch(branch),
            (Some(_), Some(_)) => {
                bail!("version {} of {} has both a tag and a branch", self.revision, root)
            }
            (None, None) => {
                bail!("version {} of {} needs a tag or a branch", self.revision, root)
            }
        };
        Ok(label.pair(Revision::new(&self.revision)))
    }
}

/// A [`SourceManager`] backed by a version catalog.
#[derive(Debug, Default)]
pub struct CatalogSource {
    versions: HashMap<ProjectRoot, Vec<Version>>,

    /// (prefix, root), longest prefix first
    prefixes: Vec<(String, ProjectRoot)>,
}

impl CatalogSource {
    /// Load a catalog from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse catalog: {}", path.display()))
    }

    /// Parse a catalog from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(contents)?;

        let mut source = CatalogSource::default();
        for project in file.projects {
            let root = ProjectRoot::new(&project.root);
            if source.versions.contains_key(&root) {
                bail!("project {} is listed more than once", root);
            }

            let versions = project
                .versions
                .iter()
                .map(|v| v.to_version(&project.root))
                .collect::<Result<Vec<_>>>()?;

            source
                .prefixes
                .push((project.root.clone(), root.clone()));
            for prefix in project.prefixes {
                source.prefixes.push((prefix, root.clone()));
            }
            source.versions.insert(root, versions);
        }

        source
            .prefixes
            .sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        Ok(source)
    }

    /// Number of projects in the catalog.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl SourceManager for CatalogSource {
    fn list_versions(&self, ident: &ProjectIdentifier) -> Result<Vec<Version>> {
        match self.versions.get(&ident.root) {
            Some(versions) => Ok(versions.clone()),
            None => bail!("no versions known for {}", ident),
        }
    }

    fn deduce_project_root(&self, import_path: &str) -> Result<ProjectRoot> {
        let path = import_path.trim_end_matches('/');
        for (prefix, root) in &self.prefixes {
            let under_prefix = path
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
            if under_prefix {
                return Ok(root.clone());
            }
        }

        deduce_root(import_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VersionKind;

    const CATALOG: &str = r#"
[[project]]
root = "github.com/x/y"

[[project.version]]
tag = "v1.2.0"
revision = "abc123"

[[project.version]]
branch = "master"
revision = "def456"

[[project]]
root = "example.org/tools"
prefixes = ["example.org/tools-mirror"]

[[project.version]]
tag = "nightly"
revision = "fff000"
"#;

    #[test]
    fn test_catalog_versions() {
        let catalog = CatalogSource::parse(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let versions = catalog
            .list_versions(&ProjectIdentifier::new("github.com/x/y"))
            .unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].kind(), VersionKind::Semver);
        assert_eq!(versions[0].lock_display(), "v1.2.0@abc123");
        assert_eq!(versions[1].kind(), VersionKind::Branch);

        let tools = catalog
            .list_versions(&ProjectIdentifier::new("example.org/tools"))
            .unwrap();
        assert_eq!(tools[0].kind(), VersionKind::Tag);
    }

    #[test]
    fn test_catalog_unknown_project() {
        let catalog = CatalogSource::parse(CATALOG).unwrap();
        let err = catalog
            .list_versions(&ProjectIdentifier::new("github.com/other/z"))
            .unwrap_err();
        assert!(err.to_string().contains("github.com/other/z"));
    }

    #[test]
    fn test_catalog_root_deduction() {
        let catalog = CatalogSource::parse(CATALOG).unwrap();

        let root = |p: &str| catalog.deduce_project_root(p).unwrap().to_string();
        assert_eq!(root("example.org/tools"), "example.org/tools");
        assert_eq!(root("example.org/tools/cmd/gen"), "example.org/tools");
        assert_eq!(root("example.org/tools-mirror/pkg"), "example.org/tools");
        assert_eq!(root("github.com/x/y/sub"), "github.com/x/y");
        // Falls back to host-based deduction
        assert_eq!(root("github.com/a/b/c"), "github.com/a/b");
        assert!(catalog.deduce_project_root("example.org/toolsmith").is_err());
    }

    #[test]
    fn test_catalog_rejects_ambiguous_version() {
        let err = CatalogSource::parse(
            r#"
[[project]]
root = "github.com/x/y"

[[project.version]]
tag = "v1.0.0"
branch = "master"
revision = "abc"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("both a tag and a branch"));
    }

    #[test]
    fn test_catalog_rejects_duplicate_project() {
        let err = CatalogSource::parse(
            r#"
[[project]]
root = "github.com/x/y"

[[project]]
root = "github.com/x/y"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}
