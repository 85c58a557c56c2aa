//! # Kernel Errors

use thiserror::Error;

/// Errors raised by a geometry kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// A primitive was requested with unusable parameters.
    #[error("Degenerate geometry: {message}")]
    Degenerate { message: String },

    /// An extracted mesh violates the buffer invariants.
    #[error("Invalid mesh `{part}`: {message}")]
    InvalidMesh { part: String, message: String },

    /// More vertices than a `u32` index can address.
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },
}

impl KernelError {
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::Degenerate {
            message: message.into(),
        }
    }

    pub fn invalid_mesh(part: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidMesh {
            part: part.into(),
            message: message.into(),
        }
    }
}
