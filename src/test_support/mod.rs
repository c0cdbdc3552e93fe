//! Test utilities and mocks for Wharf unit tests.
//!
//! [`MockSourceManager`] answers version listings and root deductions from
//! in-memory tables and can be told to fail, so importer behavior can be
//! tested without a catalog file.
//!
//! # Example
//!
//! ```rust,ignore
//! use wharf::test_support::MockSourceManager;
//!
//! let sm = MockSourceManager::new()
//!     .with_versions("github.com/x/y", vec![Version::tag("v1.0.0").pair("abc".into())])
//!     .fail_listing_after("github.com/x/y", 1);
//! ```

pub mod fixtures;

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::core::{ProjectIdentifier, ProjectRoot, Version};
use crate::sources::{deduce_root, SourceManager};

// Re-export fixtures for convenience
pub use fixtures::*;

/// In-memory source manager.
#[derive(Debug, Default)]
pub struct MockSourceManager {
    versions: HashMap<ProjectRoot, Vec<Version>>,

    /// Explicit import path -> root mappings
    roots: HashMap<String, ProjectRoot>,

    /// Import paths whose deduction fails
    bad_paths: Vec<String>,

    /// Roots whose listing succeeds this many times, then fails
    list_budget: HashMap<ProjectRoot, usize>,

    list_calls: RefCell<HashMap<ProjectRoot, usize>>,
}

impl MockSourceManager {
    pub fn new() -> Self {
        MockSourceManager::default()
    }

    /// Register the versions listed for `root`.
    pub fn with_versions(mut self, root: &str, versions: Vec<Version>) -> Self {
        self.versions.insert(ProjectRoot::new(root), versions);
        self
    }

    /// Map `path` onto `root` instead of deducing it.
    pub fn with_root(mut self, path: &str, root: &str) -> Self {
        self.roots.insert(path.to_string(), ProjectRoot::new(root));
        self
    }

    /// Make root deduction fail for `path`.
    pub fn with_bad_path(mut self, path: &str) -> Self {
        self.bad_paths.push(path.to_string());
        self
    }

    /// Let listing for `root` succeed `successes` times, then fail.
    pub fn fail_listing_after(mut self, root: &str, successes: usize) -> Self {
        self.list_budget.insert(ProjectRoot::new(root), successes);
        self
    }

    /// How many times versions of `root` were listed.
    pub fn list_calls(&self, root: &str) -> usize {
        self.list_calls
            .borrow()
            .get(&ProjectRoot::new(root))
            .copied()
            .unwrap_or(0)
    }
}

impl SourceManager for MockSourceManager {
    fn list_versions(&self, ident: &ProjectIdentifier) -> Result<Vec<Version>> {
        let calls = {
            let mut counts = self.list_calls.borrow_mut();
            let count = counts.entry(ident.root.clone()).or_insert(0);
            *count += 1;
            *count
        };

        if let Some(&budget) = self.list_budget.get(&ident.root) {
            if calls > budget {
                bail!("simulated listing failure for {}", ident);
            }
        }

        match self.versions.get(&ident.root) {
            Some(versions) => Ok(versions.clone()),
            None => bail!("no versions known for {}", ident),
        }
    }

    fn deduce_project_root(&self, import_path: &str) -> Result<ProjectRoot> {
        if self.bad_paths.iter().any(|p| p == import_path) {
            bail!("unable to deduce repository and source type for `{}`", import_path);
        }
        if let Some(root) = self.roots.get(import_path) {
            return Ok(root.clone());
        }
        deduce_root(import_path)
    }
}
