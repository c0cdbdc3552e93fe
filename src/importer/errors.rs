//! Import error types and diagnostics.

use thiserror::Error;

use crate::core::{ProjectIdentifier, Revision};
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error during an import.
///
/// `ProjectRoot` and `ListVersions` abort the import. `LockLookup` never does:
/// the project is imported without a lock entry.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot determine the project root for `{path}`")]
    ProjectRoot {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("unable to list versions for {ident}")]
    ListVersions {
        ident: ProjectIdentifier,
        #[source]
        source: anyhow::Error,
    },

    #[error(
        "unable to look up the version represented by {revision} in {ident}; \
         leaving it unlocked"
    )]
    LockLookup {
        ident: ProjectIdentifier,
        revision: Revision,
        #[source]
        source: anyhow::Error,
    },
}

impl ImportError {
    /// Whether the import cannot continue after this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ImportError::LockLookup { .. })
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ImportError::ProjectRoot { path, source } => Diagnostic::error(format!(
                "cannot determine the project root for `{}`",
                path
            ))
            .with_context(format!("{:#}", source))
            .with_suggestion(suggestions::UNKNOWN_ROOT),

            ImportError::ListVersions { ident, source } => {
                let mut diag = Diagnostic::error(format!(
                    "unable to list versions for `{}`",
                    ident.root
                ));
                if let Some(alt) = &ident.source {
                    diag = diag.with_context(format!("fetched from {}", alt));
                }
                diag.with_context(format!("{:#}", source))
                    .with_suggestion(suggestions::MISSING_VERSIONS)
            }

            ImportError::LockLookup {
                ident,
                revision,
                source,
            } => Diagnostic::warning(format!(
                "`{}` was left unlocked: revision {} could not be looked up",
                ident.root, revision
            ))
            .with_context(format!("{:#}", source))
            .with_suggestion(suggestions::UNLOCKED_REVISION),
        }
    }
}
