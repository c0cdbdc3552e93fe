//! High-level operations.
//!
//! This module contains the implementation of Wharf commands.

pub mod encode;
pub mod import;

pub use encode::{compute_manifest_hash, LockFile, ManifestFile, LOCK_NAME, MANIFEST_NAME};
pub use import::{import, load_imports, ImportOptions, ImportReport};
