//! Constraint rules applied to every imported project.

use crate::core::{Constraint, Version, VersionKind};

/// Whether a constraint already names exactly one point in history.
///
/// Such a constraint is redundant with the lock. Branches move, so they are
/// never pinned.
pub fn is_constraint_pinned(c: &Constraint) -> bool {
    match c {
        Constraint::Exact(v) => match v.kind() {
            VersionKind::Revision | VersionKind::Tag | VersionKind::Semver => true,
            VersionKind::Branch => false,
        },
        Constraint::Any | Constraint::Branch(_) | Constraint::Range(_) => false,
    }
}

/// Whether `c` leaves the locked version `v` in place.
///
/// Branch constraints are assumed to be satisfied by whatever the lock says.
pub fn test_constraint(c: &Constraint, v: Option<&Version>) -> bool {
    match c {
        Constraint::Branch(_) => true,
        Constraint::Exact(Version::Branch { .. }) => true,
        Constraint::Any | Constraint::Exact(_) | Constraint::Range(_) => c.matches(v),
    }
}

/// The constraint implied by a locked version.
///
/// Branches constrain to the branch and semver tags to `^VERSION`. Plain
/// tags constrain to themselves. A bare revision implies nothing.
pub fn constraint_from_version(v: &Version) -> Option<Constraint> {
    match v {
        Version::Revision(_) => None,
        Version::Branch { name, .. } => Some(Constraint::Branch(name.clone())),
        Version::Semver { version, .. } => Some(Constraint::caret(version)),
        Version::Tag { .. } => Some(Constraint::Exact(v.unpair())),
    }
}
