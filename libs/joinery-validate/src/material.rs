//! # Material Pass
//!
//! Grain-aware joinery warnings. Everything here is advisory.

use crate::finding::{Finding, FindingKind};
use joinery_graph::{DesignGraph, Face, FaceSelector, Node, NodeId};

/// Runs every material check.
pub fn check(graph: &DesignGraph) -> Vec<Finding> {
    let mut findings = Vec::new();
    for node in graph.nodes() {
        let Some(join) = node.as_join() else {
            continue;
        };
        if !join.kind.is_butt() {
            continue;
        }
        let (Some(a), Some(b)) = (
            end_grain_side(graph, &join.part_a, &join.face_a),
            end_grain_side(graph, &join.part_b, &join.face_b),
        ) else {
            continue;
        };
        if a.1 && b.1 {
            findings.push(
                Finding::warning(
                    FindingKind::EndGrainJoint,
                    Some(node.id),
                    format!(
                        "butt join `{}` glues end grain to end grain ({} of `{}`, {} of `{}`)",
                        node.label(),
                        a.0,
                        label(graph, &join.part_a),
                        b.0,
                        label(graph, &join.part_b)
                    ),
                )
                .with_hint("end-grain glue joints are weak; add fasteners or rotate one part"),
            );
        }
    }
    findings
}

/// The resolved face and whether it is end grain for the part.
fn end_grain_side(graph: &DesignGraph, part: &NodeId, face: &FaceSelector) -> Option<(Face, bool)> {
    let primitive = graph.get(part)?.as_primitive()?;
    let face = face.face().ok()?;
    Some((face, face.is_end_grain(primitive.grain)))
}

fn label(graph: &DesignGraph, id: &NodeId) -> String {
    graph.get(id).map(Node::label).unwrap_or_else(|| id.short())
}
