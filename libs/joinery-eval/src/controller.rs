//! # Evaluation Controller
//!
//! One worker per request, one single-slot channel per worker, one shared
//! generation counter.
//!
//! ```text
//! begin(source) ── lock, generation += 1 ──► spawn_blocking(worker)
//!                                                 │
//! wait() ◄──── oneshot ◄─── catch_unwind(front-end → GraphBuilder)
//!   │
//!   ├─ timeout elapsed               → TimedOut
//!   ├─ generation != counter         → Superseded
//!   ├─ front-end error or panic      → Faulted
//!   └─ otherwise                     → Completed
//! ```
//!
//! Cancellation is by discard only. A timed-out or superseded worker keeps
//! running until its front-end returns, and its result is dropped.

use crate::frontend::Frontend;
use crate::outcome::EvalOutcome;
use config::constants::EVALUATION_TIMEOUT_MS;
use joinery_graph::{DesignGraph, GraphBuilder, GraphDefaults};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Controller settings.
///
/// # Example
///
/// ```rust
/// use joinery_eval::ControllerConfig;
///
/// let config = ControllerConfig::default();
/// assert_eq!(config.timeout().as_secs(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Hard wall-clock limit per evaluation.
    pub timeout_ms: u64,
    /// Seeds every graph the controller builds.
    pub defaults: GraphDefaults,
}

impl ControllerConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout_ms: millis(timeout),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            timeout_ms: EVALUATION_TIMEOUT_MS,
            defaults: GraphDefaults::default(),
        }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

type WorkerResult = Result<DesignGraph, String>;

/// Runs evaluations and decides which results are still wanted.
///
/// Requests are expected to be serialized by the caller. Overlapping
/// requests are allowed; only the newest can complete.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use joinery_eval::{EvalController, EvalState, FrontendError};
/// use joinery_graph::{Axis, GraphBuilder, PrimitiveData};
///
/// let runtime = tokio::runtime::Builder::new_current_thread()
///     .enable_time()
///     .build()
///     .unwrap();
/// runtime.block_on(async {
///     let controller = EvalController::new(
///         |_: &str, builder: &mut GraphBuilder| -> Result<(), FrontendError> {
///             let top = builder.primitive(
///                 Some("top"),
///                 PrimitiveData::board(DVec3::new(800.0, 400.0, 22.0), Axis::X),
///             );
///             builder.add_root(top);
///             Ok(())
///         },
///     );
///     let outcome = controller.evaluate("table").await;
///     assert_eq!(outcome.state(), EvalState::Completed);
///     assert_eq!(outcome.generation(), 1);
/// });
/// ```
pub struct EvalController<F> {
    frontend: Arc<F>,
    generation: Arc<Mutex<u64>>,
    config: ControllerConfig,
}

impl<F: Frontend> EvalController<F> {
    pub fn new(frontend: F) -> Self {
        Self::with_config(frontend, ControllerConfig::default())
    }

    pub fn with_config(frontend: F, config: ControllerConfig) -> Self {
        Self {
            frontend: Arc::new(frontend),
            generation: Arc::new(Mutex::new(0)),
            config,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Generation of the most recent request, 0 before the first.
    pub fn current_generation(&self) -> u64 {
        *self.generation.lock()
    }

    /// Advances the counter without starting work, so every in-flight
    /// evaluation will report Superseded. Returns the new generation.
    pub fn invalidate(&self) -> u64 {
        let generation = self.advance();
        debug!(generation, "invalidated in-flight evaluations");
        generation
    }

    fn advance(&self) -> u64 {
        let mut generation = self.generation.lock();
        *generation += 1;
        *generation
    }

    /// Starts evaluating `source` on tokio's blocking pool.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn begin(&self, source: impl Into<String>) -> PendingEvaluation {
        let generation = self.advance();
        let source = source.into();
        let frontend = Arc::clone(&self.frontend);
        let defaults = self.config.defaults.clone();
        let (sender, receiver) = oneshot::channel();

        debug!(generation, bytes = source.len(), "evaluation started");
        tokio::task::spawn_blocking(move || {
            let result = run_frontend(frontend.as_ref(), &source, defaults);
            if sender.send(result).is_err() {
                info!(
                    generation,
                    "evaluation finished after its waiter gave up; result discarded"
                );
            }
        });

        PendingEvaluation {
            generation,
            counter: Arc::clone(&self.generation),
            receiver,
            timeout: self.config.timeout(),
            started: Instant::now(),
        }
    }

    /// [`begin`](Self::begin) followed by [`PendingEvaluation::wait`].
    pub async fn evaluate(&self, source: impl Into<String>) -> EvalOutcome {
        self.begin(source).wait().await
    }
}

/// Body of one worker. Never unwinds.
fn run_frontend<F: Frontend>(
    frontend: &F,
    source: &str,
    defaults: GraphDefaults,
) -> WorkerResult {
    let mut builder = GraphBuilder::with_defaults(defaults);
    if source.trim().is_empty() {
        return Ok(builder.finish());
    }

    match catch_unwind(AssertUnwindSafe(|| frontend.build(source, &mut builder))) {
        Ok(Ok(())) => Ok(builder.finish()),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => Err(format!(
            "evaluation panicked: {}",
            panic_message(payload.as_ref())
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// =============================================================================
// PENDING EVALUATION
// =============================================================================

/// An evaluation in the Running state.
#[derive(Debug)]
pub struct PendingEvaluation {
    generation: u64,
    counter: Arc<Mutex<u64>>,
    receiver: oneshot::Receiver<WorkerResult>,
    timeout: Duration,
    started: Instant,
}

impl PendingEvaluation {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits for the worker for at most the configured timeout.
    ///
    /// The generation check happens when the result arrives, so a result
    /// for a request that has since been superseded is discarded even if
    /// it is otherwise correct.
    pub async fn wait(self) -> EvalOutcome {
        let generation = self.generation;
        let result = match tokio::time::timeout(self.timeout, self.receiver).await {
            Err(_) => {
                warn!(
                    generation,
                    timeout_ms = millis(self.timeout),
                    "evaluation timed out; worker abandoned"
                );
                return EvalOutcome::TimedOut {
                    generation,
                    timeout: self.timeout,
                };
            }
            // Sender dropped without a result: the worker never ran.
            Ok(Err(_)) => Err("evaluation worker stopped without a result".to_string()),
            Ok(Ok(result)) => result,
        };

        let current = *self.counter.lock();
        if current != generation {
            info!(generation, current, "discarding superseded evaluation");
            return EvalOutcome::Superseded { generation, current };
        }

        match result {
            Ok(graph) => {
                let elapsed = self.started.elapsed();
                debug!(
                    generation,
                    nodes = graph.len(),
                    elapsed_ms = millis(elapsed),
                    "evaluation completed"
                );
                EvalOutcome::Completed {
                    graph,
                    generation,
                    elapsed,
                }
            }
            Err(message) => {
                warn!(generation, %message, "evaluation faulted");
                EvalOutcome::Faulted { generation, message }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
