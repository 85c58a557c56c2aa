//! # Geometric Pass
//!
//! Dimension sanity, duplicate joins and fastener fit.
//!
//! References that do not resolve are skipped here; the structural pass
//! reports them.

use crate::finding::{Finding, FindingKind};
use config::constants::MIN_CYLINDER_SEGMENTS;
use joinery_graph::{
    Axis, DesignGraph, FaceSelector, JoinData, Node, NodeData, NodeId, Profile,
};
use std::collections::HashMap;

/// Runs every geometric check.
pub fn check(graph: &DesignGraph) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut seen_joins: HashMap<JoinKey, NodeId> = HashMap::new();

    for node in graph.nodes() {
        match &node.data {
            NodeData::Primitive(primitive) => {
                for axis in [Axis::X, Axis::Y, Axis::Z] {
                    let value = axis.component(primitive.dimensions);
                    // Also catches NaN.
                    if !(value > 0.0) {
                        findings.push(
                            Finding::error(
                                FindingKind::NonPositiveDimension,
                                Some(node.id),
                                format!(
                                    "`{}` has non-positive {} dimension ({})",
                                    node.label(),
                                    axis.as_str(),
                                    value
                                ),
                            )
                            .with_hint("every dimension of a part must be greater than zero"),
                        );
                    }
                }
                if let Profile::Round { segments } = primitive.profile {
                    if segments < MIN_CYLINDER_SEGMENTS {
                        findings.push(Finding::error(
                            FindingKind::TooFewSegments,
                            Some(node.id),
                            format!(
                                "`{}` has a round profile with {} segments (minimum {})",
                                node.label(),
                                segments,
                                MIN_CYLINDER_SEGMENTS
                            ),
                        ));
                    }
                }
            }
            NodeData::Join(join) => {
                if !(join.clearance >= 0.0) {
                    findings.push(Finding::error(
                        FindingKind::NegativeClearance,
                        Some(node.id),
                        format!(
                            "join `{}` has negative clearance ({})",
                            node.label(),
                            join.clearance
                        ),
                    ));
                }
                let key = JoinKey::new(join);
                match seen_joins.get(&key) {
                    Some(first) => findings.push(
                        Finding::error(
                            FindingKind::DuplicateJoin,
                            Some(node.id),
                            format!(
                                "join `{}` duplicates join `{}` (same parts and faces)",
                                node.label(),
                                label(graph, first)
                            ),
                        )
                        .with_hint("remove one of the joins"),
                    ),
                    None => {
                        seen_joins.insert(key, node.id);
                    }
                }
                check_fastener_fit(graph, node, join, &mut findings);
            }
            NodeData::Fastener(fastener) => {
                if !(fastener.length > 0.0) || !(fastener.diameter > 0.0) {
                    findings.push(Finding::error(
                        FindingKind::NonPositiveFastener,
                        Some(node.id),
                        format!(
                            "{} `{}` must have positive length and diameter \
                             (length {}, diameter {})",
                            fastener.kind.name(),
                            node.label(),
                            fastener.length,
                            fastener.diameter
                        ),
                    ));
                }
            }
            NodeData::Drill(drill) => {
                if !(drill.diameter > 0.0) || !(drill.depth > 0.0) {
                    findings.push(Finding::error(
                        FindingKind::NonPositiveDrill,
                        Some(node.id),
                        format!(
                            "drill `{}` must have positive diameter and depth \
                             (diameter {}, depth {})",
                            node.label(),
                            drill.diameter,
                            drill.depth
                        ),
                    ));
                }
            }
            NodeData::Transform(_) | NodeData::Group => {}
        }
    }
    findings
}

// =============================================================================
// DUPLICATE JOINS
// =============================================================================

/// Order-independent identity of a join: the two (part, face) sides,
/// sorted by part id and then face.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinKey {
    first: (NodeId, String),
    second: (NodeId, String),
}

impl JoinKey {
    pub fn new(join: &JoinData) -> Self {
        let a = (join.part_a, face_key(&join.face_a));
        let b = (join.part_b, face_key(&join.face_b));
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }
}

fn face_key(selector: &FaceSelector) -> String {
    match selector.face() {
        Ok(face) => face.as_str().to_string(),
        Err(_) => selector.as_str().to_string(),
    }
}

// =============================================================================
// FASTENER FIT
// =============================================================================

/// Sum of both parts' thickness perpendicular to their joined faces.
///
/// `None` when either side does not resolve to a primitive with a valid face.
pub fn combined_thickness(graph: &DesignGraph, join: &JoinData) -> Option<f64> {
    let side = |part: &NodeId, face: &FaceSelector| {
        let primitive = graph.get(part)?.as_primitive()?;
        let face = face.face().ok()?;
        Some(primitive.thickness_through(face))
    };
    Some(side(&join.part_a, &join.face_a)? + side(&join.part_b, &join.face_b)?)
}

fn check_fastener_fit(
    graph: &DesignGraph,
    node: &Node,
    join: &JoinData,
    findings: &mut Vec<Finding>,
) {
    if !join.kind.is_butt() || join.fasteners.is_empty() {
        return;
    }
    let Some(combined) = combined_thickness(graph, join) else {
        return;
    };
    let units = &graph.defaults().units;
    for id in &join.fasteners {
        let Some(fastener) = graph.get(id).and_then(Node::as_fastener) else {
            continue;
        };
        if fastener.length > combined {
            findings.push(
                Finding::warning(
                    FindingKind::FastenerTooLong,
                    Some(*id),
                    format!(
                        "{} length {} {} exceeds combined thickness {} {} of join `{}`",
                        fastener.kind.name(),
                        fastener.length,
                        units,
                        combined,
                        units,
                        node.label()
                    ),
                )
                .with_hint("the fastener will protrude; use a shorter one"),
            );
        }
    }
}

fn label(graph: &DesignGraph, id: &NodeId) -> String {
    graph.get(id).map(Node::label).unwrap_or_else(|| id.short())
}

// =============================================================================
// TESTS
// =============================================================================
