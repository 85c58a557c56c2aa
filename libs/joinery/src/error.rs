//! # Pipeline Errors

use joinery_tessellate::TessellateError;
use joinery_validate::ValidationReport;
use std::time::Duration;
use thiserror::Error;

/// Why the pipeline produced no graph or no meshes.
///
/// Blocking findings are not an evaluation failure: [`JoineryError::Blocked`]
/// carries the full report so advisory findings can still be shown.
#[derive(Debug, Error)]
pub enum JoineryError {
    #[error("evaluation {generation} timed out after {} ms", timeout.as_millis())]
    TimedOut { generation: u64, timeout: Duration },

    #[error("evaluation {generation} faulted: {message}")]
    Faulted { generation: u64, message: String },

    /// A newer evaluation was requested; this result is stale.
    #[error("evaluation {generation} superseded by {current}")]
    Superseded { generation: u64, current: u64 },

    #[error("design has {} blocking finding(s)", report.blocking.len())]
    Blocked { report: ValidationReport },

    #[error(transparent)]
    Tessellate(#[from] TessellateError),
}

impl JoineryError {
    /// Timeouts and faults. The caller should surface these as errors
    /// rather than as findings.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::TimedOut { .. } | Self::Faulted { .. })
    }
}
