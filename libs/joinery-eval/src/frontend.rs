//! # Front-End Seam
//!
//! The controller does not parse programs. A [`Frontend`] receives the
//! source text and drives a [`GraphBuilder`] with the builder calls the
//! program describes.

use crate::error::FrontendError;
use joinery_graph::{BuildOp, GraphBuilder};

/// Turns program text into builder calls.
///
/// Runs on a worker thread; a front-end that panics is reported as a
/// faulted evaluation rather than taking the controller down.
pub trait Frontend: Send + Sync + 'static {
    fn build(&self, source: &str, builder: &mut GraphBuilder) -> Result<(), FrontendError>;
}

impl<F> Frontend for F
where
    F: Fn(&str, &mut GraphBuilder) -> Result<(), FrontendError> + Send + Sync + 'static,
{
    fn build(&self, source: &str, builder: &mut GraphBuilder) -> Result<(), FrontendError> {
        self(source, builder)
    }
}

/// Front-end that ignores the program text and replays a recorded
/// builder-call stream.
#[derive(Debug, Clone, Default)]
pub struct ReplayFrontend {
    ops: Vec<BuildOp>,
}

impl ReplayFrontend {
    pub fn new(ops: Vec<BuildOp>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[BuildOp] {
        &self.ops
    }
}

impl Frontend for ReplayFrontend {
    fn build(&self, _source: &str, builder: &mut GraphBuilder) -> Result<(), FrontendError> {
        for op in &self.ops {
            builder.apply(op.clone())?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
