//! Version sources.
//!
//! A [`SourceManager`] answers the questions the importer has about projects:
//! which versions exist, which root an import path belongs to, and what a
//! free-text constraint hint means.

pub mod catalog;
pub mod deduce;

pub use catalog::CatalogSource;
pub use deduce::deduce_root;

use anyhow::{bail, Context, Result};

use crate::core::version::parse_semver_tag;
use crate::core::{Constraint, ProjectIdentifier, ProjectRoot, Version, VersionKind};

/// Read-only access to project versions and identities.
pub trait SourceManager {
    /// List every known version (tags, semver tags, branches) of a project.
    fn list_versions(&self, ident: &ProjectIdentifier) -> Result<Vec<Version>>;

    /// Map an import path onto its canonical project root.
    fn deduce_project_root(&self, import_path: &str) -> Result<ProjectRoot>;

    /// Interpret a constraint hint for a project.
    ///
    /// An empty hint is [`Constraint::Any`]. `=X` is an exact semver version.
    /// Otherwise a branch known to the project wins, then anything `semver`
    /// accepts as a range (bare versions become caret ranges), then a known
    /// tag, then anything that looks like a commit hash. Listing failures are
    /// only reported when no range or hash fits.
    fn infer_constraint(&self, hint: &str, ident: &ProjectIdentifier) -> Result<Constraint> {
        let hint = hint.trim();
        if hint.is_empty() {
            return Ok(Constraint::Any);
        }

        if let Some(exact) = hint.strip_prefix('=') {
            let exact = exact.trim();
            if let Some(version) = parse_semver_tag(exact) {
                return Ok(Constraint::Exact(Version::Semver {
                    version,
                    original: exact.to_string(),
                    revision: None,
                }));
            }
        }

        let listing = self.list_versions(ident);

        // A branch named like a version (`v2`) is still the branch
        if let Ok(versions) = &listing {
            let is_branch = versions
                .iter()
                .any(|v| v.kind() == VersionKind::Branch && v.label() == Some(hint));
            if is_branch {
                return Ok(Constraint::Branch(hint.to_string()));
            }
        }

        // All-digit hashes would otherwise parse as a major version
        if !looks_like_revision(hint) {
            let range_text = hint.strip_prefix('v').unwrap_or(hint);
            if let Ok(range) = Constraint::range(range_text) {
                return Ok(range);
            }
        }

        match listing {
            Ok(versions) => {
                if let Some(constraint) = constraint_from_listing(hint, &versions) {
                    return Ok(constraint);
                }
            }
            Err(err) if !looks_like_revision(hint) => {
                return Err(err).with_context(|| {
                    format!("unable to interpret constraint `{}` for {}", hint, ident)
                });
            }
            Err(_) => {}
        }

        if looks_like_revision(hint) {
            return Ok(Constraint::Exact(Version::revision_only(hint)));
        }

        bail!(
            "`{}` is not a valid version, branch, tag or revision for {}",
            hint,
            ident
        )
    }
}

fn constraint_from_listing(hint: &str, versions: &[Version]) -> Option<Constraint> {
    let named = versions.iter().find(|v| v.label() == Some(hint))?;
    match named.kind() {
        VersionKind::Branch => Some(Constraint::Branch(hint.to_string())),
        VersionKind::Tag | VersionKind::Semver => Some(Constraint::Exact(named.unpair())),
        VersionKind::Revision => None,
    }
}

/// Whether `s` could be an abbreviated or full commit hash.
pub fn looks_like_revision(s: &str) -> bool {
    (7..=40).contains(&s.len()) && s.chars().all(|c| c.is_ascii_hexdigit())
}
