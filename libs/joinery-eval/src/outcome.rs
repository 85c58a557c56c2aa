//! # Evaluation Outcomes
//!
//! ```text
//! Running ─┬─ Completed   result arrived in time, generation still current
//!          ├─ Superseded  result arrived in time, a newer request started
//!          ├─ TimedOut    the hard timeout elapsed first
//!          └─ Faulted     the front-end failed or panicked
//! ```

use joinery_graph::DesignGraph;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// State of one evaluation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvalState {
    Running,
    Completed,
    Superseded,
    TimedOut,
    Faulted,
}

impl EvalState {
    /// True for every state except [`EvalState::Running`].
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl fmt::Display for EvalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Superseded => "superseded",
            Self::TimedOut => "timed out",
            Self::Faulted => "faulted",
        };
        f.write_str(name)
    }
}

/// Terminal result of one evaluation request.
#[derive(Debug)]
pub enum EvalOutcome {
    Completed {
        graph: DesignGraph,
        generation: u64,
        elapsed: Duration,
    },
    /// Discarded because `current` was requested after `generation`.
    Superseded { generation: u64, current: u64 },
    /// The worker may still be running; its result will be discarded.
    TimedOut { generation: u64, timeout: Duration },
    Faulted { generation: u64, message: String },
}

impl EvalOutcome {
    pub fn state(&self) -> EvalState {
        match self {
            Self::Completed { .. } => EvalState::Completed,
            Self::Superseded { .. } => EvalState::Superseded,
            Self::TimedOut { .. } => EvalState::TimedOut,
            Self::Faulted { .. } => EvalState::Faulted,
        }
    }

    /// Generation of the request this outcome answers.
    pub fn generation(&self) -> u64 {
        match self {
            Self::Completed { generation, .. }
            | Self::Superseded { generation, .. }
            | Self::TimedOut { generation, .. }
            | Self::Faulted { generation, .. } => *generation,
        }
    }

    /// Timeouts and faults. A superseded request is not an error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::TimedOut { .. } | Self::Faulted { .. })
    }

    pub fn graph(&self) -> Option<&DesignGraph> {
        match self {
            Self::Completed { graph, .. } => Some(graph),
            _ => None,
        }
    }

    pub fn into_graph(self) -> Option<DesignGraph> {
        match self {
            Self::Completed { graph, .. } => Some(graph),
            _ => None,
        }
    }
}

impl fmt::Display for EvalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed {
                graph,
                generation,
                elapsed,
            } => write!(
                f,
                "evaluation {} completed with {} nodes in {} ms",
                generation,
                graph.len(),
                elapsed.as_millis()
            ),
            Self::Superseded { generation, current } => {
                write!(f, "evaluation {} superseded by {}", generation, current)
            }
            Self::TimedOut { generation, timeout } => write!(
                f,
                "evaluation {} timed out after {} ms",
                generation,
                timeout.as_millis()
            ),
            Self::Faulted { generation, message } => {
                write!(f, "evaluation {} faulted: {}", generation, message)
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_mapping() {
        let outcome = EvalOutcome::Superseded {
            generation: 3,
            current: 4,
        };
        assert_eq!(outcome.state(), EvalState::Superseded);
        assert_eq!(outcome.generation(), 3);
        assert!(!outcome.is_fatal());
        assert!(outcome.graph().is_none());
    }

    #[test]
    fn test_fatal_outcomes() {
        let timed_out = EvalOutcome::TimedOut {
            generation: 1,
            timeout: Duration::from_secs(5),
        };
        let faulted = EvalOutcome::Faulted {
            generation: 2,
            message: "boom".into(),
        };
        assert!(timed_out.is_fatal());
        assert!(faulted.is_fatal());
        assert_eq!(timed_out.to_string(), "evaluation 1 timed out after 5000 ms");
        assert_eq!(faulted.to_string(), "evaluation 2 faulted: boom");
    }

    #[test]
    fn test_completed_hands_over_graph() {
        let outcome = EvalOutcome::Completed {
            graph: DesignGraph::new(),
            generation: 7,
            elapsed: Duration::ZERO,
        };
        assert_eq!(outcome.state(), EvalState::Completed);
        assert!(outcome.into_graph().is_some_and(|g| g.is_empty()));
    }

    #[test]
    fn test_only_running_is_not_terminal() {
        assert!(!EvalState::Running.is_terminal());
        assert!(EvalState::TimedOut.is_terminal());
        assert_eq!(EvalState::TimedOut.to_string(), "timed out");
    }
}
