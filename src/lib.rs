//! Wharf - dependency import for Go-style projects
//!
//! This crate provides the core library functionality for Wharf: it reads
//! dependency records produced by other tools, consolidates them by project
//! root, and turns them into an initial manifest and lock.

pub mod core;
pub mod importer;
pub mod ops;
pub mod sources;
pub mod util;

/// Test utilities and mocks for Wharf unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides an in-memory source manager and fixture files.
#[cfg(test)]
pub mod test_support;

pub use core::{
    constraint::Constraint, lock::ImportLock, manifest::ImportManifest,
    project::ProjectIdentifier, project::ProjectRoot, version::Version,
};

pub use importer::{ImportError, ImportedPackage, Importer};
pub use sources::{CatalogSource, SourceManager};
