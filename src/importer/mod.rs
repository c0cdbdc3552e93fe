//! Importing dependencies from other tools.
//!
//! Foreign configurations are turned into flat lists of [`ImportedPackage`]
//! records by tool-specific readers. The [`Importer`] consolidates those
//! records by project root and decides, for each project, which constraint
//! goes into the manifest and which version goes into the lock.
//!
//! Rules:
//! - When a constraint is ignored, it becomes `*`.
//! - Revisions at a branch head default to that branch.
//! - Semver tags default to `^VERSION`.
//! - Constraints already pinned to one point are ignored.
//! - Constraints the locked version does not satisfy are ignored.
//!
//! Everything runs in input order so feedback is reproducible.

pub mod decision;
pub mod errors;
pub mod package;
pub mod policy;

pub use decision::{DecisionOutcome, ProjectDecision};
pub use errors::ImportError;
pub use package::{ImportedPackage, ImportedProject, ImportsFile};
pub use policy::{constraint_from_version, is_constraint_pinned, test_constraint};

use std::collections::HashMap;
use std::fmt;

use crate::core::version::sort_for_upgrade;
use crate::core::{
    Constraint, ImportLock, ImportManifest, LockedProject, ProjectIdentifier, ProjectProperties,
    ProjectRoot, Revision, Version, VersionKind,
};
use crate::sources::SourceManager;
use crate::util::feedback::{ConstraintFeedback, DepType, Feedback, LockedProjectFeedback};

/// Result of looking up the version behind a locked revision.
#[derive(Debug)]
pub struct LockedVersionLookup {
    pub version: Version,

    /// Why the lookup failed; `version` is then only the bare revision
    pub degraded: Option<ImportError>,
}

impl LockedVersionLookup {
    fn found(version: Version) -> Self {
        LockedVersionLookup {
            version,
            degraded: None,
        }
    }
}

/// Builds a manifest and lock out of imported package records.
pub struct Importer<'a> {
    sm: &'a dyn SourceManager,
    feedback: &'a dyn Feedback,
    verbose: bool,
    manifest: ImportManifest,
    lock: ImportLock,
}

impl<'a> Importer<'a> {
    pub fn new(sm: &'a dyn SourceManager, feedback: &'a dyn Feedback, verbose: bool) -> Self {
        Importer {
            sm,
            feedback,
            verbose,
            manifest: ImportManifest::new(),
            lock: ImportLock::new(),
        }
    }

    pub fn manifest(&self) -> &ImportManifest {
        &self.manifest
    }

    pub fn lock(&self) -> &ImportLock {
        &self.lock
    }

    pub fn into_parts(self) -> (ImportManifest, ImportLock) {
        (self.manifest, self.lock)
    }

    /// Find the tag (plain or semver) named `value`, if the project has one.
    pub fn is_tag(
        &self,
        ident: &ProjectIdentifier,
        value: &str,
    ) -> Result<Option<Version>, ImportError> {
        let versions = self
            .sm
            .list_versions(ident)
            .map_err(|source| ImportError::ListVersions {
                ident: ident.clone(),
                source,
            })?;

        Ok(versions.into_iter().find(|v| {
            matches!(v.kind(), VersionKind::Tag | VersionKind::Semver) && v.to_string() == value
        }))
    }

    /// Work out the version to lock for a project locked at `rev`.
    ///
    /// Tries a version at that revision (narrowed by the constraint when one
    /// is given), then the branch the constraint names, then the bare
    /// revision.
    pub fn lookup_version_for_locked_project(
        &self,
        ident: &ProjectIdentifier,
        constraint: Option<&Constraint>,
        rev: &Revision,
    ) -> LockedVersionLookup {
        let mut versions = match self.sm.list_versions(ident) {
            Ok(versions) => versions,
            Err(source) => {
                return LockedVersionLookup {
                    version: Version::Revision(rev.clone()),
                    degraded: Some(ImportError::LockLookup {
                        ident: ident.clone(),
                        revision: rev.clone(),
                        source,
                    }),
                }
            }
        };

        sort_for_upgrade(&mut versions);

        let branch_name = constraint.and_then(Constraint::branch_name);
        let mut branch_constraint = None;
        let mut matches = Vec::new();
        for v in &versions {
            if v.revision() == Some(rev) {
                matches.push(v);
            }
            if branch_constraint.is_none()
                && v.kind() == VersionKind::Branch
                && branch_name.is_some_and(|name| v.label() == Some(name))
            {
                branch_constraint = Some(v);
            }
        }

        if let Some(&first) = matches.first() {
            let narrowed = constraint.and_then(|c| {
                matches
                    .iter()
                    .copied()
                    .find(|&v| test_constraint(c, Some(v)))
            });
            return LockedVersionLookup::found(narrowed.unwrap_or(first).clone());
        }

        if let Some(branch) = branch_constraint {
            return LockedVersionLookup::found(branch.unpair().pair(rev.clone()));
        }

        LockedVersionLookup::found(Version::Revision(rev.clone()))
    }

    /// Consolidate package references into one record per project root.
    ///
    /// Projects keep the order in which their root was first seen.
    pub fn load_packages(
        &self,
        packages: Vec<ImportedPackage>,
    ) -> Result<Vec<ImportedProject>, ImportError> {
        let mut ordered: Vec<ImportedProject> = Vec::with_capacity(packages.len());
        let mut index: HashMap<ProjectRoot, usize> = HashMap::with_capacity(packages.len());

        for pkg in packages {
            let root = self
                .sm
                .deduce_project_root(&pkg.name)
                .map_err(|source| ImportError::ProjectRoot {
                    path: pkg.name.clone(),
                    source,
                })?;

            match index.get(&root) {
                Some(&i) => ordered[i].merge(&pkg),
                None => {
                    index.insert(root.clone(), ordered.len());
                    ordered.push(ImportedProject::new(root, pkg));
                }
            }
        }

        Ok(ordered)
    }

    /// Load imported packages into the manifest and lock.
    ///
    /// With `default_constraint_from_lock`, projects that have a locked
    /// version but no constraint hint get a constraint derived from the
    /// locked version.
    pub fn import_packages(
        &mut self,
        packages: Vec<ImportedPackage>,
        default_constraint_from_lock: bool,
    ) -> Result<Vec<ProjectDecision>, ImportError> {
        let projects = self.load_packages(packages)?;
        let mut decisions = Vec::with_capacity(projects.len());

        for prj in projects {
            let decision = self.import_project(&prj, default_constraint_from_lock)?;
            decisions.push(decision);
        }

        Ok(decisions)
    }

    fn import_project(
        &mut self,
        prj: &ImportedProject,
        default_constraint_from_lock: bool,
    ) -> Result<ProjectDecision, ImportError> {
        let pkg = &prj.package;
        let ident = ProjectIdentifier::with_source(prj.root.clone(), pkg.source.clone());
        let mut outcomes = Vec::new();

        let mut constraint = match self.sm.infer_constraint(&pkg.constraint_hint, &ident) {
            Ok(c) => c,
            Err(err) => {
                self.report(format_args!(
                    "  Unable to interpret constraint {} for {}: {:#}",
                    pkg.constraint_hint, ident, err
                ));
                outcomes.push(DecisionOutcome::InferenceFailed {
                    hint: pkg.constraint_hint.clone(),
                    message: format!("{:#}", err),
                });
                Constraint::Any
            }
        };

        let mut version = None;
        if !pkg.lock_hint.is_empty() {
            version = match self.is_tag(&ident, &pkg.lock_hint)? {
                Some(tag) => Some(tag),
                None => {
                    let revision = Revision::new(&pkg.lock_hint);
                    let lookup = self.lookup_version_for_locked_project(
                        &ident,
                        Some(&constraint),
                        &revision,
                    );
                    match lookup.degraded {
                        // An unverified revision is not locked
                        Some(err) => {
                            let message = format!("{:#}", anyhow::Error::new(err));
                            self.report(format_args!("  {}", message));
                            outcomes.push(DecisionOutcome::DegradedToRevision { message });
                            None
                        }
                        None => Some(lookup.version),
                    }
                }
            };

            if default_constraint_from_lock && pkg.constraint_hint.is_empty() {
                if let Some(c) = version.as_ref().and_then(constraint_from_version) {
                    constraint = c;
                }
            }
        }

        let mut discarded = false;

        if is_constraint_pinned(&constraint) {
            self.report(format_args!(
                "  Ignoring pinned constraint {} for {}.",
                constraint, ident
            ));
            outcomes.push(DecisionOutcome::DiscardedPinned {
                constraint: std::mem::replace(&mut constraint, Constraint::Any),
            });
            discarded = true;
        }

        // A constraint the locked version does not satisfy would make the
        // solver move the lock.
        if !test_constraint(&constraint, version.as_ref()) {
            self.report(format_args!(
                "  Ignoring constraint {} for {} because it would invalidate the locked version {}.",
                constraint,
                ident,
                DisplayVersion(version.as_ref())
            ));
            outcomes.push(DecisionOutcome::DiscardedConflict {
                constraint: std::mem::replace(&mut constraint, Constraint::Any),
                version: version.clone(),
            });
            discarded = true;
        }

        if !discarded {
            outcomes.push(DecisionOutcome::Accepted);
        }

        self.manifest.insert(
            ident.root.clone(),
            ProjectProperties {
                source: ident.source.clone(),
                constraint: constraint.clone(),
            },
        );
        self.feedback.constraint(&ConstraintFeedback::new(
            ident.clone(),
            constraint.clone(),
            DepType::Imported,
        ));

        if let Some(v) = &version {
            let locked = LockedProject::new(ident.clone(), v.clone());
            self.lock.push(locked.clone());
            self.feedback
                .locked_project(&LockedProjectFeedback::new(locked, DepType::Imported));
        }

        Ok(ProjectDecision {
            ident,
            constraint,
            version,
            outcomes,
        })
    }

    fn report(&self, message: fmt::Arguments<'_>) {
        if self.verbose {
            tracing::info!("{}", message);
        } else {
            tracing::debug!("{}", message);
        }
    }
}

struct DisplayVersion<'v>(Option<&'v Version>);

impl fmt::Display for DisplayVersion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => f.write_str(&v.lock_display()),
            None => f.write_str("<none>"),
        }
    }
}
