//! Core data structures for Wharf.
//!
//! This module contains the foundational types used throughout Wharf:
//! - Project roots and identifiers
//! - Versions, revisions and constraints
//! - The manifest and lock produced by an import

pub mod constraint;
pub mod lock;
pub mod manifest;
pub mod project;
pub mod version;

pub use constraint::Constraint;
pub use lock::{ImportLock, LockedProject};
pub use manifest::{ImportManifest, ProjectProperties};
pub use project::{ProjectIdentifier, ProjectRoot};
pub use version::{Revision, Version, VersionKind};
