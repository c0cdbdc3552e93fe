//! User-facing feedback about import decisions.
//!
//! The importer reports every constraint it settles on and every project it
//! locks. How (and whether) those events are shown is up to the sink.

use std::fmt;
use std::sync::Mutex;

use serde::Serialize;

use crate::core::{Constraint, LockedProject, ProjectIdentifier};

/// Where a dependency came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DepType {
    Imported,
}

impl fmt::Display for DepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepType::Imported => f.write_str("imported"),
        }
    }
}

/// A constraint recorded in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintFeedback {
    pub ident: ProjectIdentifier,
    pub constraint: Constraint,
    pub dep_type: DepType,
}

impl ConstraintFeedback {
    pub fn new(ident: ProjectIdentifier, constraint: Constraint, dep_type: DepType) -> Self {
        ConstraintFeedback {
            ident,
            constraint,
            dep_type,
        }
    }
}

impl fmt::Display for ConstraintFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Using {} as initial constraint for {} dep {}",
            self.constraint, self.dep_type, self.ident.root
        )
    }
}

/// A project recorded in the lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockedProjectFeedback {
    pub project: LockedProject,
    pub dep_type: DepType,
}

impl LockedProjectFeedback {
    pub fn new(project: LockedProject, dep_type: DepType) -> Self {
        LockedProjectFeedback { project, dep_type }
    }
}

impl fmt::Display for LockedProjectFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = &self.project.version;
        let label = version.label().unwrap_or("*");
        match version.revision() {
            Some(rev) => write!(
                f,
                "Locking in {} ({}) for {} dep {}",
                label, rev, self.dep_type, self.project.ident.root
            ),
            None => write!(
                f,
                "Locking in {} for {} dep {}",
                label, self.dep_type, self.project.ident.root
            ),
        }
    }
}

/// Receiver of import feedback events.
pub trait Feedback {
    fn constraint(&self, event: &ConstraintFeedback);

    fn locked_project(&self, event: &LockedProjectFeedback);
}

/// Logs feedback through `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFeedback;

impl Feedback for TracingFeedback {
    fn constraint(&self, event: &ConstraintFeedback) {
        tracing::info!("  {}", event);
    }

    fn locked_project(&self, event: &LockedProjectFeedback) {
        tracing::info!("  {}", event);
    }
}

/// Discards all feedback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl Feedback for NoFeedback {
    fn constraint(&self, _event: &ConstraintFeedback) {}

    fn locked_project(&self, _event: &LockedProjectFeedback) {}
}

/// Collects rendered feedback lines in the order they were emitted.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    lines: Mutex<Vec<String>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        RecordingFeedback::default()
    }

    /// The lines recorded so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    fn record(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl Feedback for RecordingFeedback {
    fn constraint(&self, event: &ConstraintFeedback) {
        self.record(event.to_string());
    }

    fn locked_project(&self, event: &LockedProjectFeedback) {
        self.record(event.to_string());
    }
}
