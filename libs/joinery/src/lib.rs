//! # Joinery
//!
//! Evaluate, validate and tessellate woodworking design programs.
//!
//! ## Pipeline
//!
//! ```text
//! source → EvalController → DesignGraph → validate → ValidationReport
//!                                       → tessellate (only when renderable) → Vec<Mesh>
//! ```
//!
//! Callers check three things in order: a fatal evaluation outcome
//! ([`JoineryError::is_fatal`]), blocking findings, and only then the
//! meshes. Advisory findings travel with every [`Evaluation`].
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use joinery::{FrontendError, Workbench};
//! use joinery_graph::{Axis, Face, GraphBuilder, JoinData, PrimitiveData, TransformData};
//!
//! fn frame(_: &str, b: &mut GraphBuilder) -> Result<(), FrontendError> {
//!     let rail = PrimitiveData::board(DVec3::new(400.0, 60.0, 20.0), Axis::X);
//!     let stile = PrimitiveData::board(DVec3::new(60.0, 600.0, 20.0), Axis::Y);
//!     let rail = b.primitive(Some("rail"), rail);
//!     let stile = b.primitive(Some("stile"), stile);
//!     let offset = TransformData::translate(DVec3::new(400.0, 0.0, 0.0));
//!     let placed = b.transform(None, offset, vec![stile]);
//!     let join = b.join(Some("corner"), JoinData::butt(rail, Face::Right, stile, Face::Left));
//!     let root = b.group(Some("frame"), vec![rail, placed, join]);
//!     b.add_root(root);
//!     Ok(())
//! }
//!
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .enable_time()
//!     .build()
//!     .unwrap();
//! let render = runtime.block_on(Workbench::new(frame).build_and_render("frame")).unwrap();
//! assert_eq!(render.meshes.len(), 2);
//! assert!(render.evaluation.report.is_renderable());
//! ```

pub mod error;

pub use error::JoineryError;
pub use joinery_eval::{ControllerConfig, EvalController, Frontend, FrontendError, ReplayFrontend};
pub use joinery_kernel::{Kernel, Mesh, MeshKernel};
pub use joinery_validate::{Finding, FindingKind, Severity, ValidationReport};

use joinery_eval::EvalOutcome;
use joinery_graph::DesignGraph;
use tracing::{debug, info};

// =============================================================================
// RESULTS
// =============================================================================

/// A completed evaluation and its findings.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub graph: DesignGraph,
    pub report: ValidationReport,
    pub generation: u64,
}

impl Evaluation {
    pub fn is_renderable(&self) -> bool {
        self.report.is_renderable()
    }
}

/// An evaluation together with its meshes.
#[derive(Debug, Clone)]
pub struct Render {
    pub evaluation: Evaluation,
    pub meshes: Vec<Mesh>,
}

// =============================================================================
// WORKBENCH
// =============================================================================

/// A front-end, an evaluation controller and a geometry kernel.
pub struct Workbench<F, K> {
    controller: EvalController<F>,
    kernel: K,
}

impl<F: Frontend> Workbench<F, MeshKernel> {
    /// Workbench over the in-tree mesh kernel with default settings.
    pub fn new(frontend: F) -> Self {
        Self::with_kernel(frontend, MeshKernel::new(), ControllerConfig::default())
    }
}

impl<F: Frontend, K: Kernel> Workbench<F, K> {
    pub fn with_kernel(frontend: F, kernel: K, config: ControllerConfig) -> Self {
        Self {
            controller: EvalController::with_config(frontend, config),
            kernel,
        }
    }

    pub fn controller(&self) -> &EvalController<F> {
        &self.controller
    }

    /// Evaluates and validates `source`.
    ///
    /// Blocking findings do not make this fail; check
    /// [`Evaluation::is_renderable`] or call [`render`](Self::render).
    pub async fn evaluate(&self, source: &str) -> Result<Evaluation, JoineryError> {
        let (graph, generation) = match self.controller.evaluate(source).await {
            EvalOutcome::Completed {
                graph, generation, ..
            } => (graph, generation),
            EvalOutcome::Superseded { generation, current } => {
                return Err(JoineryError::Superseded { generation, current })
            }
            EvalOutcome::TimedOut { generation, timeout } => {
                return Err(JoineryError::TimedOut { generation, timeout })
            }
            EvalOutcome::Faulted { generation, message } => {
                return Err(JoineryError::Faulted { generation, message })
            }
        };

        let report = joinery_validate::validate(&graph);
        debug!(
            generation,
            blocking = report.blocking.len(),
            advisory = report.advisory.len(),
            "validated evaluation"
        );
        Ok(Evaluation {
            graph,
            report,
            generation,
        })
    }

    /// Tessellates an evaluation that has no blocking findings.
    pub fn render(&self, evaluation: &Evaluation) -> Result<Vec<Mesh>, JoineryError> {
        if !evaluation.is_renderable() {
            info!(
                generation = evaluation.generation,
                blocking = evaluation.report.blocking.len(),
                "render refused"
            );
            return Err(JoineryError::Blocked {
                report: evaluation.report.clone(),
            });
        }
        let meshes = joinery_tessellate::tessellate(&evaluation.graph, &self.kernel)?;
        info!(generation = evaluation.generation, meshes = meshes.len(), "rendered");
        Ok(meshes)
    }

    /// [`evaluate`](Self::evaluate) followed by [`render`](Self::render).
    pub async fn build_and_render(&self, source: &str) -> Result<Render, JoineryError> {
        let evaluation = self.evaluate(source).await?;
        let meshes = self.render(&evaluation)?;
        Ok(Render { evaluation, meshes })
    }
}
