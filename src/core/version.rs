//! Versions of an imported project.
//!
//! A [`Version`] is one point (or moving pointer) in a project's history:
//! an opaque revision, a branch, a plain tag, or a semver tag. Everything
//! except a bare revision can be *paired* with the revision it resolves to.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// An opaque, immutable commit identifier (typically a content hash).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Revision(String);

impl Revision {
    pub fn new(rev: impl Into<String>) -> Self {
        Revision(rev.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Revision {
    fn from(s: &str) -> Self {
        Revision::new(s)
    }
}

/// The variant of a [`Version`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionKind {
    Revision,
    Branch,
    Tag,
    Semver,
}

/// A version of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    /// Bare revision; the only thing guaranteed to exist for every commit
    Revision(Revision),

    /// Mutable branch pointer
    Branch {
        name: String,
        revision: Option<Revision>,
    },

    /// Tag whose name is not a semantic version
    Tag {
        name: String,
        revision: Option<Revision>,
    },

    /// Tag whose name parses as a semantic version
    Semver {
        version: semver::Version,
        /// Tag text as published, e.g. `v1.2.0`
        original: String,
        revision: Option<Revision>,
    },
}

impl Version {
    pub fn revision_only(rev: impl Into<String>) -> Self {
        Version::Revision(Revision::new(rev))
    }

    pub fn branch(name: impl Into<String>) -> Self {
        Version::Branch {
            name: name.into(),
            revision: None,
        }
    }

    /// Create a tag version, classifying it as semver when the name parses.
    pub fn tag(name: impl Into<String>) -> Self {
        let name = name.into();
        match parse_semver_tag(&name) {
            Some(version) => Version::Semver {
                version,
                original: name,
                revision: None,
            },
            None => Version::Tag {
                name,
                revision: None,
            },
        }
    }

    /// Create a tag that is never classified as semver.
    pub fn plain_tag(name: impl Into<String>) -> Self {
        Version::Tag {
            name: name.into(),
            revision: None,
        }
    }

    pub fn kind(&self) -> VersionKind {
        match self {
            Version::Revision(_) => VersionKind::Revision,
            Version::Branch { .. } => VersionKind::Branch,
            Version::Tag { .. } => VersionKind::Tag,
            Version::Semver { .. } => VersionKind::Semver,
        }
    }

    /// The underlying revision, if known. A bare revision is its own revision.
    pub fn revision(&self) -> Option<&Revision> {
        match self {
            Version::Revision(rev) => Some(rev),
            Version::Branch { revision, .. }
            | Version::Tag { revision, .. }
            | Version::Semver { revision, .. } => revision.as_ref(),
        }
    }

    /// Whether a human label is bound to a concrete revision.
    pub fn is_paired(&self) -> bool {
        !matches!(self, Version::Revision(_)) && self.revision().is_some()
    }

    /// Drop the revision from a labelled version. Bare revisions are unchanged.
    pub fn unpair(&self) -> Version {
        self.clone().with_revision(None)
    }

    /// Bind a labelled version to `rev`. A bare revision is replaced by `rev`.
    pub fn pair(self, rev: Revision) -> Version {
        match self {
            Version::Revision(_) => Version::Revision(rev),
            other => other.with_revision(Some(rev)),
        }
    }

    fn with_revision(self, rev: Option<Revision>) -> Version {
        match self {
            Version::Revision(r) => Version::Revision(r),
            Version::Branch { name, .. } => Version::Branch { name, revision: rev },
            Version::Tag { name, .. } => Version::Tag { name, revision: rev },
            Version::Semver {
                version, original, ..
            } => Version::Semver {
                version,
                original,
                revision: rev,
            },
        }
    }

    /// The human label, or `None` for a bare revision.
    pub fn label(&self) -> Option<&str> {
        match self {
            Version::Revision(_) => None,
            Version::Branch { name, .. } | Version::Tag { name, .. } => Some(name),
            Version::Semver { original, .. } => Some(original),
        }
    }

    /// Render as `label@revision` for paired versions, otherwise like `Display`.
    pub fn lock_display(&self) -> String {
        match (self.label(), self.revision()) {
            (Some(label), Some(rev)) => format!("{}@{}", label, rev),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Revision(rev) => write!(f, "{}", rev),
            Version::Branch { name, .. } | Version::Tag { name, .. } => f.write_str(name),
            Version::Semver { original, .. } => f.write_str(original),
        }
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.lock_display())
    }
}

/// Parse a tag name as a semantic version.
///
/// A leading `v` is allowed, and missing minor/patch components are filled
/// with zero (`v1.2` is `1.2.0`).
pub fn parse_semver_tag(s: &str) -> Option<semver::Version> {
    let s = s.strip_prefix('v').unwrap_or(s);

    if let Ok(v) = s.parse() {
        return Some(v);
    }

    let parts: Vec<&str> = s.split('.').collect();
    match parts.len() {
        1 => {
            let major: u64 = parts[0].parse().ok()?;
            Some(semver::Version::new(major, 0, 0))
        }
        2 => {
            let major: u64 = parts[0].parse().ok()?;
            let minor: u64 = parts[1].parse().ok()?;
            Some(semver::Version::new(major, minor, 0))
        }
        _ => None,
    }
}

/// Sort versions into upgrade order: the versions one would prefer to move
/// toward come first.
///
/// Semver tags come first, highest to lowest, with pre-releases after all
/// releases. Then branches, plain tags, and finally bare revisions, each
/// group ordered by name. The sort is stable.
pub fn sort_for_upgrade(versions: &mut [Version]) {
    versions.sort_by(upgrade_order);
}

fn kind_rank(v: &Version) -> u8 {
    match v.kind() {
        VersionKind::Semver => 0,
        VersionKind::Branch => 1,
        VersionKind::Tag => 2,
        VersionKind::Revision => 3,
    }
}

fn upgrade_order(a: &Version, b: &Version) -> Ordering {
    match (a, b) {
        (Version::Semver { version: va, .. }, Version::Semver { version: vb, .. }) => {
            let a_pre = !va.pre.is_empty();
            let b_pre = !vb.pre.is_empty();
            a_pre
                .cmp(&b_pre)
                .then_with(|| vb.cmp(va))
                .then_with(|| a.to_string().cmp(&b.to_string()))
        }
        (Version::Revision(ra), Version::Revision(rb)) => ra.cmp(rb),
        _ => kind_rank(a)
            .cmp(&kind_rank(b))
            .then_with(|| a.to_string().cmp(&b.to_string())),
    }
}
