//! Version constraints for imported projects.

use std::fmt;

use semver::{Comparator, Op, VersionReq};
use serde::{Serialize, Serializer};

use super::version::{Revision, Version};

/// A constraint on the versions of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Admits every version
    Any,

    /// Admits exactly one version
    Exact(Version),

    /// Admits a branch by name, whatever it currently points at
    Branch(String),

    /// Admits semver versions satisfying a range expression
    Range(VersionReq),
}

impl Constraint {
    /// Parse a semver range expression.
    pub fn range(text: &str) -> Result<Self, semver::Error> {
        Ok(Constraint::Range(VersionReq::parse(text)?))
    }

    /// A caret range anchored at `version` (`^MAJOR.MINOR.PATCH[-PRE]`).
    pub fn caret(version: &semver::Version) -> Self {
        let req = VersionReq {
            comparators: vec![Comparator {
                op: Op::Caret,
                major: version.major,
                minor: Some(version.minor),
                patch: Some(version.patch),
                pre: version.pre.clone(),
            }],
        };
        Constraint::Range(req)
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Constraint::Any)
    }

    /// The branch name, if this constraint names a branch.
    pub fn branch_name(&self) -> Option<&str> {
        match self {
            Constraint::Branch(name) => Some(name),
            Constraint::Exact(Version::Branch { name, .. }) => Some(name),
            _ => None,
        }
    }

    /// Whether this constraint admits `version`.
    ///
    /// An unknown version (`None`) is only admitted by [`Constraint::Any`].
    pub fn matches(&self, version: Option<&Version>) -> bool {
        match (self, version) {
            (Constraint::Any, _) => true,
            (_, None) => false,
            (Constraint::Exact(want), Some(got)) => exact_matches(want, got),
            (Constraint::Branch(name), Some(got)) => {
                matches!(got, Version::Branch { name: n, .. } if n == name)
            }
            (Constraint::Range(req), Some(got)) => match got {
                Version::Semver { version, .. } => req.matches(version),
                _ => false,
            },
        }
    }
}

fn exact_matches(want: &Version, got: &Version) -> bool {
    match (want, got) {
        (Version::Revision(rev), _) => got.revision() == Some(rev),
        (_, Version::Revision(rev)) => want.revision() == Some(rev),
        (
            Version::Branch { name: a, revision: ra },
            Version::Branch { name: b, revision: rb },
        )
        | (Version::Tag { name: a, revision: ra }, Version::Tag { name: b, revision: rb }) => {
            a == b && revisions_agree(ra, rb)
        }
        (
            Version::Semver {
                version: a,
                revision: ra,
                ..
            },
            Version::Semver {
                version: b,
                revision: rb,
                ..
            },
        ) => a == b && revisions_agree(ra, rb),
        _ => false,
    }
}

/// Revisions only disagree when both sides are paired.
fn revisions_agree(a: &Option<Revision>, b: &Option<Revision>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Any => f.write_str("*"),
            Constraint::Exact(v) => write!(f, "{}", v),
            Constraint::Branch(name) => f.write_str(name),
            Constraint::Range(req) => write!(f, "{}", req),
        }
    }
}

impl Serialize for Constraint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
