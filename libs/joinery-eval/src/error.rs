//! # Front-End Errors
//!
//! Errors a front-end reports while turning a program into builder calls.

use joinery_graph::BuildError;
use thiserror::Error;

/// A program the front-end could not turn into a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    /// The front-end rejected the program text.
    #[error("program rejected: {message}")]
    Rejected { message: String },

    /// A builder call referenced a node that was never created.
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl FrontendError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
