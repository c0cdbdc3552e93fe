//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod feedback;

pub use config::Config;
pub use diagnostic::Diagnostic;
pub use feedback::{Feedback, NoFeedback, TracingFeedback};
