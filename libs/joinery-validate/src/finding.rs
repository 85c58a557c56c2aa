//! # Findings
//!
//! Validation results, classified as blocking (error) or advisory (warning).

use joinery_graph::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Blocking: the graph must not be tessellated.
    Error,
    /// Advisory: surfaced to the user, does not block tessellation.
    Warning,
}

/// Machine-readable classification of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    // Structural
    Cycle,
    DanglingReference,
    UnsetReference,
    DuplicateName,
    StaleNameIndex,
    MissingRoot,
    Orphan,
    LeafWithChildren,
    InvalidFace,
    JoinPartNotPrimitive,
    SelfJoin,
    DrillTargetNotPrimitive,
    JoinFastenerNotFastener,
    FastenerOwnerMismatch,
    // Geometric
    NonPositiveDimension,
    TooFewSegments,
    NegativeClearance,
    DuplicateJoin,
    FastenerTooLong,
    NonPositiveFastener,
    NonPositiveDrill,
    // Material
    EndGrainJoint,
}

impl FindingKind {
    /// Stable kebab-case code.
    pub fn code(self) -> &'static str {
        match self {
            FindingKind::Cycle => "cycle",
            FindingKind::DanglingReference => "dangling-reference",
            FindingKind::UnsetReference => "unset-reference",
            FindingKind::DuplicateName => "duplicate-name",
            FindingKind::StaleNameIndex => "stale-name-index",
            FindingKind::MissingRoot => "missing-root",
            FindingKind::Orphan => "orphan",
            FindingKind::LeafWithChildren => "leaf-with-children",
            FindingKind::InvalidFace => "invalid-face",
            FindingKind::JoinPartNotPrimitive => "join-part-not-primitive",
            FindingKind::SelfJoin => "self-join",
            FindingKind::DrillTargetNotPrimitive => "drill-target-not-primitive",
            FindingKind::JoinFastenerNotFastener => "join-fastener-not-fastener",
            FindingKind::FastenerOwnerMismatch => "fastener-owner-mismatch",
            FindingKind::NonPositiveDimension => "non-positive-dimension",
            FindingKind::TooFewSegments => "too-few-segments",
            FindingKind::NegativeClearance => "negative-clearance",
            FindingKind::DuplicateJoin => "duplicate-join",
            FindingKind::FastenerTooLong => "fastener-too-long",
            FindingKind::NonPositiveFastener => "non-positive-fastener",
            FindingKind::NonPositiveDrill => "non-positive-drill",
            FindingKind::EndGrainJoint => "end-grain-joint",
        }
    }
}

/// A single validation finding.
///
/// `node` is the offending node, or `None` for graph-level findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub kind: FindingKind,
    pub node: Option<NodeId>,
    pub message: String,
    pub hint: Option<String>,
}

impl Finding {
    pub fn new(
        severity: Severity,
        kind: FindingKind,
        node: Option<NodeId>,
        message: String,
    ) -> Self {
        Self {
            severity,
            kind,
            node,
            message,
            hint: None,
        }
    }

    pub fn error(kind: FindingKind, node: Option<NodeId>, message: String) -> Self {
        Self::new(Severity::Error, kind, node, message)
    }

    pub fn warning(kind: FindingKind, node: Option<NodeId>, message: String) -> Self {
        Self::new(Severity::Warning, kind, node, message)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}[{}]", level, self.kind.code())?;
        match self.node {
            Some(node) => write!(f, " {}: ", node.short())?,
            None => f.write_str(" graph: ")?,
        }
        f.write_str(&self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// Findings of every pass, partitioned by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub blocking: Vec<Finding>,
    pub advisory: Vec<Finding>,
}

impl ValidationReport {
    /// Partitions findings by severity, preserving order.
    pub fn from_findings(findings: impl IntoIterator<Item = Finding>) -> Self {
        let (blocking, advisory) = findings.into_iter().partition(Finding::is_blocking);
        Self { blocking, advisory }
    }

    /// True when there is nothing blocking tessellation.
    #[inline]
    pub fn is_renderable(&self) -> bool {
        self.blocking.is_empty()
    }

    /// Blocking findings first, then advisory ones.
    pub fn all(&self) -> impl Iterator<Item = &Finding> {
        self.blocking.iter().chain(self.advisory.iter())
    }

    /// Number of findings of a kind, across both severities.
    pub fn count(&self, kind: FindingKind) -> usize {
        self.all().filter(|f| f.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.blocking.len() + self.advisory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocking.is_empty() && self.advisory.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
