//! Manifest and lock file encoding.
//!
//! Wharf.toml holds the constraints an import settled on; Wharf.lock holds
//! the versions it locked. Both are written in a stable order so the same
//! import always produces byte-identical files.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::{Constraint, ImportLock, ImportManifest, LockedProject, Version};

/// Default manifest file name.
pub const MANIFEST_NAME: &str = "Wharf.toml";

/// Default lock file name.
pub const LOCK_NAME: &str = "Wharf.lock";

/// Manifest representation for serialization.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFile {
    #[serde(rename = "constraint", default)]
    pub constraints: Vec<ConstraintEntry>,
}

/// A `[[constraint]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintEntry {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl ConstraintEntry {
    fn new(name: &str, source: Option<&String>, constraint: &Constraint) -> Self {
        let mut entry = ConstraintEntry {
            name: name.to_string(),
            source: source.cloned(),
            branch: None,
            version: None,
            revision: None,
        };

        match constraint {
            Constraint::Any => {}
            Constraint::Branch(name) => entry.branch = Some(name.clone()),
            Constraint::Range(req) => entry.version = Some(req.to_string()),
            Constraint::Exact(v) => match v {
                Version::Revision(rev) => entry.revision = Some(rev.to_string()),
                Version::Branch { name, .. } => entry.branch = Some(name.clone()),
                Version::Tag { name, .. } => entry.version = Some(name.clone()),
                Version::Semver { original, .. } => entry.version = Some(format!("={}", original)),
            },
        }

        entry
    }
}

impl ManifestFile {
    pub fn from_manifest(manifest: &ImportManifest) -> Self {
        // BTreeMap iteration is already sorted by root
        let constraints = manifest
            .iter()
            .map(|(root, props)| {
                ConstraintEntry::new(root.as_str(), props.source.as_ref(), &props.constraint)
            })
            .collect();

        ManifestFile { constraints }
    }

    pub fn to_toml(&self) -> Result<String> {
        let content =
            toml::to_string_pretty(self).with_context(|| "failed to serialize manifest")?;
        Ok(format!(
            "# Generated by `wharf import`.\n\
             # Edit constraints freely; the lock records what was imported.\n\n\
             {content}"
        ))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?)
            .with_context(|| format!("failed to write manifest: {}", path.display()))
    }
}

/// Lock representation for serialization.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFile {
    /// Hash of the manifest written alongside this lock
    pub manifest_hash: String,

    #[serde(default)]
    pub projects: Vec<LockedEntry>,
}

/// A `[[projects]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedEntry {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,

    #[serde(default)]
    pub packages: Vec<String>,
}

impl From<&LockedProject> for LockedEntry {
    fn from(lp: &LockedProject) -> Self {
        let (branch, version) = match &lp.version {
            Version::Revision(_) => (None, None),
            Version::Branch { name, .. } => (Some(name.clone()), None),
            Version::Tag { name, .. } => (None, Some(name.clone())),
            Version::Semver { original, .. } => (None, Some(original.clone())),
        };

        let mut packages = lp.packages.clone();
        packages.sort();

        LockedEntry {
            name: lp.ident.root.to_string(),
            source: lp.ident.source.clone(),
            branch,
            version,
            revision: lp.version.revision().map(|r| r.to_string()),
            packages,
        }
    }
}

impl LockFile {
    /// Create a lock file for `lock`, stamped with the manifest's hash.
    pub fn from_lock(lock: &ImportLock, manifest: &ImportManifest) -> Result<Self> {
        let mut projects: Vec<LockedEntry> = lock.iter().map(LockedEntry::from).collect();

        // Sort for deterministic output
        projects.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(LockFile {
            manifest_hash: compute_manifest_hash(manifest)?,
            projects,
        })
    }

    pub fn to_toml(&self) -> Result<String> {
        let content = toml::to_string_pretty(self).with_context(|| "failed to serialize lock")?;
        Ok(format!(
            "# This file is automatically generated by Wharf.\n\
             # It is not intended for manual editing.\n\n\
             {content}"
        ))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?)
            .with_context(|| format!("failed to write lock: {}", path.display()))
    }

    /// Load a lock file from a path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lock: {}", path.display()))?;

        toml::from_str(&content).with_context(|| "failed to parse lock")
    }
}

/// Compute a hash of the manifest's constraints.
///
/// Hashes a normalized JSON rendering so the value does not depend on TOML
/// formatting.
pub fn compute_manifest_hash(manifest: &ImportManifest) -> Result<String> {
    let mut normalized = serde_json::Map::new();

    for entry in ManifestFile::from_manifest(manifest).constraints {
        let name = entry.name.clone();
        let value = serde_json::to_value(&entry)
            .with_context(|| format!("failed to normalize constraint for {}", name))?;
        normalized.insert(name, value);
    }

    let json = serde_json::to_string(&serde_json::Value::Object(normalized))
        .with_context(|| "failed to normalize manifest")?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}
