//! Per-project record of what the importer decided and why.

use serde::Serialize;

use crate::core::{Constraint, ProjectIdentifier, Version};

/// One decision the policy engine took for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// The working constraint was kept
    Accepted,

    /// The constraint already named one point in history
    DiscardedPinned { constraint: Constraint },

    /// The constraint would have invalidated the locked version
    DiscardedConflict {
        constraint: Constraint,
        version: Option<Version>,
    },

    /// The locked revision could not be looked up; nothing is locked
    DegradedToRevision { message: String },

    /// The constraint hint could not be interpreted
    InferenceFailed { hint: String, message: String },
}

/// What was imported for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDecision {
    pub ident: ProjectIdentifier,

    /// Constraint written to the manifest
    pub constraint: Constraint,

    /// Version written to the lock, if any
    pub version: Option<Version>,

    pub outcomes: Vec<DecisionOutcome>,
}

impl ProjectDecision {
    pub fn is_accepted(&self) -> bool {
        self.outcomes.contains(&DecisionOutcome::Accepted)
    }

    pub fn was_discarded(&self) -> bool {
        self.outcomes.iter().any(|o| {
            matches!(
                o,
                DecisionOutcome::DiscardedPinned { .. } | DecisionOutcome::DiscardedConflict { .. }
            )
        })
    }

    pub fn is_degraded(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o, DecisionOutcome::DegradedToRevision { .. }))
    }
}
