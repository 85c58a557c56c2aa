//! # Joinery Eval
//!
//! Evaluation control for design programs.
//!
//! ## Architecture
//!
//! ```text
//! source → EvalController ─► worker: Frontend → GraphBuilder → DesignGraph
//!                         ◄─ EvalOutcome { Completed | Superseded | TimedOut | Faulted }
//! ```
//!
//! Each request advances a shared generation counter. A result is only
//! handed back when it arrives within the timeout and its generation is
//! still the newest. Validation and tessellation happen afterwards, on the
//! caller's side.

pub mod controller;
pub mod error;
pub mod frontend;
pub mod outcome;

pub use controller::{ControllerConfig, EvalController, PendingEvaluation};
pub use error::FrontendError;
pub use frontend::{Frontend, ReplayFrontend};
pub use outcome::{EvalOutcome, EvalState};
