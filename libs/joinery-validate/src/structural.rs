//! # Structural Pass
//!
//! Checks the graph as a graph: cycles, reference integrity, names, root
//! reachability, and the node kinds that cross-references point at.
//!
//! ## Checks
//!
//! | Check | Severity |
//! |-------|----------|
//! | cycle over `children` | error (first cycle only) |
//! | dangling / unset reference | error |
//! | name bound to several nodes, stale index entry | error |
//! | missing root | error |
//! | node unreachable from every root | warning |
//! | children under a primitive, join, drill or fastener | warning |
//! | unknown face selector | error |
//! | join part or drill target not a primitive, self-join | error |
//! | join fastener entry not a fastener, inconsistent fastener owner | error |

use crate::finding::{Finding, FindingKind};
use joinery_graph::{DesignGraph, FaceSelector, Node, NodeData, NodeId, NodeKind, RefField};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// Runs every structural check.
pub fn check(graph: &DesignGraph) -> Vec<Finding> {
    let mut findings = Vec::new();
    check_cycles(graph, &mut findings);
    check_references(graph, &mut findings);
    check_names(graph, &mut findings);
    check_reachability(graph, &mut findings);
    for node in graph.nodes() {
        if !node.children.is_empty() && !node.kind().renders_children() {
            check_leaf_children(graph, node, &mut findings);
        }
        match &node.data {
            NodeData::Join(join) => {
                check_face(node, "face A", &join.face_a, &mut findings);
                check_face(node, "face B", &join.face_b, &mut findings);
                check_join_parts(graph, node, join.part_a, join.part_b, &mut findings);
                check_join_fasteners(graph, node, &join.fasteners, &mut findings);
            }
            NodeData::Drill(drill) => {
                check_face(node, "face", &drill.face, &mut findings);
                check_drill_target(graph, node, drill.target, &mut findings);
            }
            NodeData::Fastener(fastener) => {
                if let Some(owner) = fastener.join {
                    check_fastener_owner(graph, node, owner, &mut findings);
                }
            }
            NodeData::Primitive(_) | NodeData::Transform(_) | NodeData::Group => {}
        }
    }
    findings
}

// =============================================================================
// CYCLES
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    Gray,
    Black,
}

/// Three-color DFS over `children`, started from every node.
///
/// Returns the first cycle found as a closed path (first element repeated
/// at the end). Children that do not resolve are skipped; they are reported
/// by the reference check.
pub fn find_cycle(graph: &DesignGraph) -> Option<Vec<NodeId>> {
    // Absent from the map means white.
    let mut color: HashMap<NodeId, Color> = HashMap::with_capacity(graph.len());

    for start in graph.node_ids() {
        if color.contains_key(start) {
            continue;
        }
        color.insert(*start, Color::Gray);
        let mut stack: Vec<(NodeId, usize)> = vec![(*start, 0)];

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let next = frame.1;
            let children = graph
                .get(&node)
                .map(|n| n.children.as_slice())
                .unwrap_or(&[]);

            if next >= children.len() {
                color.insert(node, Color::Black);
                stack.pop();
                continue;
            }
            frame.1 += 1;

            let child = children[next];
            if !graph.contains(&child) {
                continue;
            }
            match color.get(&child).copied() {
                None => {
                    color.insert(child, Color::Gray);
                    stack.push((child, 0));
                }
                Some(Color::Gray) => {
                    let entry = stack.iter().position(|(id, _)| *id == child).unwrap_or(0);
                    let mut cycle: Vec<NodeId> =
                        stack[entry..].iter().map(|(id, _)| *id).collect();
                    cycle.push(child);
                    return Some(cycle);
                }
                Some(Color::Black) => {}
            }
        }
    }
    None
}

fn check_cycles(graph: &DesignGraph, findings: &mut Vec<Finding>) {
    let Some(cycle) = find_cycle(graph) else {
        return;
    };
    let path = cycle
        .iter()
        .map(|id| label(graph, id))
        .collect::<Vec<_>>()
        .join(" -> ");
    findings.push(
        Finding::error(
            FindingKind::Cycle,
            cycle.first().copied(),
            format!("cycle through children: {}", path),
        )
        .with_hint("a node cannot contain itself, directly or through its descendants"),
    );
}

// =============================================================================
// REFERENCES
// =============================================================================

fn check_references(graph: &DesignGraph, findings: &mut Vec<Finding>) {
    for node in graph.nodes() {
        for reference in node.references() {
            if reference.target.is_absent() {
                findings.push(Finding::error(
                    FindingKind::UnsetReference,
                    Some(node.id),
                    format!(
                        "{} `{}` has an unset {} reference",
                        node.kind(),
                        node.label(),
                        reference.field.as_str()
                    ),
                ));
            } else if !graph.contains(&reference.target) {
                findings.push(Finding::error(
                    FindingKind::DanglingReference,
                    Some(node.id),
                    format!(
                        "{} `{}` references missing node {} through {}",
                        node.kind(),
                        node.label(),
                        reference.target.short(),
                        reference.field.as_str()
                    ),
                ));
            }
        }
    }
}

// =============================================================================
// NAMES
// =============================================================================

fn check_names(graph: &DesignGraph, findings: &mut Vec<Finding>) {
    let mut owners: BTreeMap<&str, Vec<NodeId>> = BTreeMap::new();
    for node in graph.nodes() {
        if let Some(name) = node.bound_name() {
            owners.entry(name).or_default().push(node.id);
        }
    }
    for (name, ids) in &owners {
        if ids.len() > 1 {
            let list = ids.iter().map(NodeId::short).collect::<Vec<_>>().join(", ");
            findings.push(
                Finding::error(
                    FindingKind::DuplicateName,
                    ids.first().copied(),
                    format!("name `{}` is carried by {} nodes ({})", name, ids.len(), list),
                )
                .with_hint("give each part a distinct name"),
            );
        }
    }

    for (name, id) in graph.name_index() {
        match graph.get(id) {
            None => findings.push(Finding::error(
                FindingKind::StaleNameIndex,
                None,
                format!("name `{}` is bound to missing node {}", name, id.short()),
            )),
            Some(node) if node.bound_name() != Some(name.as_str()) => {
                findings.push(Finding::error(
                    FindingKind::StaleNameIndex,
                    Some(node.id),
                    format!(
                        "name `{}` is bound to node `{}`, which no longer carries it",
                        name,
                        node.label()
                    ),
                ))
            }
            Some(_) => {}
        }
    }
}

// =============================================================================
// REACHABILITY
// =============================================================================

/// Nodes reachable from the roots over children and cross-references.
pub fn reachable(graph: &DesignGraph) -> HashSet<NodeId> {
    let mut seen: HashSet<NodeId> = HashSet::with_capacity(graph.len());
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    for root in graph.roots() {
        if graph.contains(root) && seen.insert(*root) {
            queue.push_back(*root);
        }
    }
    while let Some(id) = queue.pop_front() {
        let Some(node) = graph.get(&id) else {
            continue;
        };
        for reference in node.references() {
            if graph.contains(&reference.target) && seen.insert(reference.target) {
                queue.push_back(reference.target);
            }
        }
    }
    seen
}

fn check_reachability(graph: &DesignGraph, findings: &mut Vec<Finding>) {
    for root in graph.roots() {
        if !graph.contains(root) {
            findings.push(Finding::error(
                FindingKind::MissingRoot,
                None,
                format!("root {} does not name a node", root.short()),
            ));
        }
    }

    let seen = reachable(graph);
    for node in graph.nodes() {
        if !seen.contains(&node.id) {
            findings.push(
                Finding::warning(
                    FindingKind::Orphan,
                    Some(node.id),
                    format!("{} `{}` is not reachable from any root", node.kind(), node.label()),
                )
                .with_hint("add it to a group or register it as a root"),
            );
        }
    }
}

// =============================================================================
// KINDS AND FACES
// =============================================================================

fn check_face(node: &Node, which: &str, face: &FaceSelector, findings: &mut Vec<Finding>) {
    if let Err(err) = face.face() {
        findings.push(
            Finding::error(
                FindingKind::InvalidFace,
                Some(node.id),
                format!("{} `{}`: {} {}", node.kind(), node.label(), which, err),
            )
            .with_hint("use one of top, bottom, left, right, front, back"),
        );
    }
}

fn check_join_parts(
    graph: &DesignGraph,
    join: &Node,
    part_a: NodeId,
    part_b: NodeId,
    findings: &mut Vec<Finding>,
) {
    if part_a == part_b && !part_a.is_absent() {
        findings.push(Finding::error(
            FindingKind::SelfJoin,
            Some(join.id),
            format!("join `{}` connects `{}` to itself", join.label(), label(graph, &part_a)),
        ));
    }
    for (field, part) in [(RefField::JoinPartA, part_a), (RefField::JoinPartB, part_b)] {
        if let Some(target) = graph.get(&part) {
            if target.kind() != NodeKind::Primitive {
                findings.push(Finding::error(
                    FindingKind::JoinPartNotPrimitive,
                    Some(join.id),
                    format!(
                        "join `{}`: {} resolves to {} `{}`, expected a primitive",
                        join.label(),
                        field.as_str(),
                        target.kind(),
                        target.label()
                    ),
                ));
            }
        }
    }
}

fn check_join_fasteners(
    graph: &DesignGraph,
    join: &Node,
    fasteners: &[NodeId],
    findings: &mut Vec<Finding>,
) {
    for id in fasteners {
        if let Some(target) = graph.get(id) {
            if target.kind() != NodeKind::Fastener {
                findings.push(Finding::error(
                    FindingKind::JoinFastenerNotFastener,
                    Some(join.id),
                    format!(
                        "join `{}` lists {} `{}` as a fastener",
                        join.label(),
                        target.kind(),
                        target.label()
                    ),
                ));
            }
        }
    }
}

fn check_drill_target(
    graph: &DesignGraph,
    drill: &Node,
    target: NodeId,
    findings: &mut Vec<Finding>,
) {
    if let Some(node) = graph.get(&target) {
        if node.kind() != NodeKind::Primitive {
            findings.push(Finding::error(
                FindingKind::DrillTargetNotPrimitive,
                Some(drill.id),
                format!(
                    "drill `{}` targets {} `{}`, expected a primitive",
                    drill.label(),
                    node.kind(),
                    node.label()
                ),
            ));
        }
    }
}

fn check_fastener_owner(
    graph: &DesignGraph,
    fastener: &Node,
    owner: NodeId,
    findings: &mut Vec<Finding>,
) {
    // Unresolved owners are reported by the reference check.
    let Some(owner_node) = graph.get(&owner) else {
        return;
    };
    let listed = owner_node
        .as_join()
        .map(|join| join.fasteners.contains(&fastener.id));
    let message = match listed {
        Some(true) => return,
        Some(false) => format!(
            "fastener `{}` names join `{}` as its owner, but that join does not list it",
            fastener.label(),
            owner_node.label()
        ),
        None => format!(
            "fastener `{}` names {} `{}` as its owner, expected a join",
            fastener.label(),
            owner_node.kind(),
            owner_node.label()
        ),
    };
    findings.push(Finding::error(
        FindingKind::FastenerOwnerMismatch,
        Some(fastener.id),
        message,
    ));
}

/// Only groups and transforms contribute their children to the render.
fn check_leaf_children(graph: &DesignGraph, node: &Node, findings: &mut Vec<Finding>) {
    let names = node
        .children
        .iter()
        .map(|id| label(graph, id))
        .collect::<Vec<_>>()
        .join(", ");
    findings.push(
        Finding::warning(
            FindingKind::LeafWithChildren,
            Some(node.id),
            format!(
                "{} `{}` has children ({}) that will not be rendered",
                node.kind(),
                node.label(),
                names
            ),
        )
        .with_hint("place the parts in a group or transform instead"),
    );
}

fn label(graph: &DesignGraph, id: &NodeId) -> String {
    graph.get(id).map(Node::label).unwrap_or_else(|| id.short())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use joinery_graph::{
        Axis, DrillData, Face, FastenerData, GraphBuilder, JoinData, PrimitiveData,
    };

    fn board() -> PrimitiveData {
        PrimitiveData::board(DVec3::new(300.0, 90.0, 19.0), Axis::X)
    }

    fn kinds(findings: &[Finding]) -> Vec<FindingKind> {
        findings.iter().map(|f| f.kind).collect()
    }

    fn count(findings: &[Finding], kind: FindingKind) -> usize {
        findings.iter().filter(|f| f.kind == kind).count()
    }

    #[test]
    fn test_clean_graph() {
        let mut b = GraphBuilder::new();
        let a = b.primitive(Some("a"), board());
        let c = b.primitive(Some("c"), board());
        let j = b.join(Some("j"), JoinData::butt(a, Face::Right, c, Face::Left));
        let g = b.group(Some("g"), vec![a, c, j]);
        b.add_root(g);
        assert!(check(&b.finish()).is_empty());
    }

    #[test]
    fn test_three_node_cycle() {
        let a = NodeId::from_path("a");
        let bb = NodeId::from_path("b");
        let c = NodeId::from_path("c");
        let mut builder = GraphBuilder::new();
        builder.group(Some("a"), vec![bb]);
        builder.group(Some("b"), vec![c]);
        builder.group(Some("c"), vec![a]);
        builder.add_root(a);
        let graph = builder.finish();

        let cycle = find_cycle(&graph).unwrap();
        assert_eq!(cycle.len(), 4);
        assert_eq!(cycle.first(), cycle.last());

        let findings = check(&graph);
        assert_eq!(kinds(&findings), vec![FindingKind::Cycle]);
        assert!(findings[0].is_blocking());
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let mut b = GraphBuilder::new();
        let g = NodeId::from_path("g");
        b.group(Some("g"), vec![g]);
        b.add_root(g);
        assert_eq!(find_cycle(&b.finish()), Some(vec![g, g]));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let mut b = GraphBuilder::new();
        let leaf = b.primitive(Some("leaf"), board());
        let left = b.group(Some("left"), vec![leaf]);
        let right = b.group(Some("right"), vec![leaf]);
        let top = b.group(Some("top"), vec![left, right]);
        b.add_root(top);
        assert!(find_cycle(&b.finish()).is_none());
    }

    #[test]
    fn test_only_first_cycle_reported() {
        let mut b = GraphBuilder::new();
        let (x, y) = (NodeId::from_path("x"), NodeId::from_path("y"));
        b.group(Some("x"), vec![x]);
        b.group(Some("y"), vec![y]);
        b.add_root(x);
        b.add_root(y);
        let findings = check(&b.finish());
        assert_eq!(count(&findings, FindingKind::Cycle), 1);
    }

    #[test]
    fn test_dangling_and_unset_references() {
        let mut b = GraphBuilder::new();
        let a = b.primitive(Some("a"), board());
        let j = b.join(Some("j"), JoinData::butt(a, Face::Top, NodeId::ABSENT, Face::Top));
        let g = b.group(Some("g"), vec![a, j, NodeId::from_path("ghost")]);
        b.add_root(g);
        let findings = check(&b.finish());

        assert_eq!(findings.len(), 2);
        assert_eq!(count(&findings, FindingKind::DanglingReference), 1);
        let unset = findings.iter().find(|f| f.kind == FindingKind::UnsetReference);
        assert_eq!(unset.and_then(|f| f.node), Some(j));
    }

    #[test]
    fn test_name_collision_and_stale_index() {
        let mut b = GraphBuilder::new();
        let a = b.primitive(Some("a"), board());
        let c = b.primitive(Some("c"), board());
        b.bind_name(a, "shelf");
        b.bind_name(c, "shelf");
        let g = b.group(Some("g"), vec![a, c]);
        b.add_root(g);
        let graph = b.finish();

        let findings = check(&graph);
        assert_eq!(kinds(&findings), vec![FindingKind::DuplicateName]);

        let mut b = GraphBuilder::new();
        let a = b.primitive(Some("a"), board());
        b.bind_name(a, "old");
        b.bind_name(a, "new");
        b.add_root(a);
        let findings = check(&b.finish());
        assert_eq!(kinds(&findings), vec![FindingKind::StaleNameIndex]);
    }

    #[test]
    fn test_missing_root_and_orphan() {
        let mut b = GraphBuilder::new();
        let a = b.primitive(Some("a"), board());
        let lost = b.primitive(Some("lost"), board());
        b.add_root(a);
        b.add_root(NodeId::from_path("nowhere"));
        let findings = check(&b.finish());

        assert_eq!(kinds(&findings), vec![FindingKind::MissingRoot, FindingKind::Orphan]);
        assert!(findings[0].is_blocking());
        assert!(!findings[1].is_blocking());
        assert_eq!(findings[1].node, Some(lost));
    }

    #[test]
    fn test_parts_reachable_only_through_join() {
        let mut b = GraphBuilder::new();
        let a = b.primitive(Some("a"), board());
        let c = b.primitive(Some("c"), board());
        let j = b.join(Some("j"), JoinData::butt(a, Face::Right, c, Face::Left));
        b.add_root(j);
        let graph = b.finish();
        assert_eq!(reachable(&graph).len(), 3);
        assert!(check(&graph).is_empty());
    }

    #[test]
    fn test_invalid_face_selector() {
        let mut b = GraphBuilder::new();
        let a = b.primitive(Some("a"), board());
        let c = b.primitive(Some("c"), board());
        let j = b.join(Some("j"), JoinData::butt(a, "inside", c, Face::Left));
        b.add_root(j);
        let findings = check(&b.finish());
        assert_eq!(kinds(&findings), vec![FindingKind::InvalidFace]);
        assert!(findings[0].message.contains("inside"));
    }

    #[test]
    fn test_non_canonical_face_spelling_is_invalid() {
        let mut b = GraphBuilder::new();
        let a = b.primitive(Some("a"), board());
        let c = b.primitive(Some("c"), board());
        let j = b.join(Some("j"), JoinData::butt(a, " TOP ", c, "Left"));
        b.add_root(j);
        let findings = check(&b.finish());

        assert_eq!(kinds(&findings), vec![FindingKind::InvalidFace; 2]);
        assert!(findings.iter().all(Finding::is_blocking));
        assert!(findings[0].message.contains("face A"));
        assert!(findings[1].message.contains("face B"));
    }

    #[test]
    fn test_drill_face_selector() {
        let mut b = GraphBuilder::new();
        let a = b.primitive(Some("a"), board());
        let drill = |face: &str| DrillData {
            target: a,
            face: face.into(),
            position: DVec3::new(150.0, 45.0, 19.0),
            diameter: 5.0,
            depth: 10.0,
        };
        let good = b.drill(Some("good"), drill("top"));
        let bad = b.drill(Some("bad"), drill("sideways"));
        let root = b.group(Some("root"), vec![a, good, bad]);
        b.add_root(root);
        let findings = check(&b.finish());

        assert_eq!(kinds(&findings), vec![FindingKind::InvalidFace]);
        assert_eq!(findings[0].node, Some(bad));
        assert!(findings[0].is_blocking());
        assert!(findings[0].message.contains("sideways"));
    }

    #[test]
    fn test_children_under_a_board_are_flagged() {
        let mut b = GraphBuilder::new();
        let shelf = b.primitive(Some("shelf"), board());
        let hidden = b.primitive(Some("hidden"), board());
        b.bind_name(hidden, "hidden");
        assert!(b.add_child(shelf, hidden));
        b.add_root(shelf);
        let graph = b.finish();

        assert!(reachable(&graph).contains(&hidden));
        let findings = check(&graph);
        assert_eq!(kinds(&findings), vec![FindingKind::LeafWithChildren]);
        assert_eq!(findings[0].node, Some(shelf));
        assert!(!findings[0].is_blocking());
        assert!(findings[0].message.contains("hidden"));
    }

    #[test]
    fn test_join_part_kinds_and_self_join() {
        let mut b = GraphBuilder::new();
        let a = b.primitive(Some("a"), board());
        let g = b.group(Some("g"), vec![a]);
        let bad = b.join(Some("bad"), JoinData::butt(a, Face::Top, g, Face::Top));
        let same = b.join(Some("same"), JoinData::butt(a, Face::Top, a, Face::Bottom));
        let root = b.group(Some("root"), vec![g, bad, same]);
        b.add_root(root);
        let findings = check(&b.finish());

        assert_eq!(count(&findings, FindingKind::JoinPartNotPrimitive), 1);
        assert_eq!(count(&findings, FindingKind::SelfJoin), 1);
    }

    #[test]
    fn test_drill_and_fastener_references() {
        let mut b = GraphBuilder::new();
        let a = b.primitive(Some("a"), board());
        let c = b.primitive(Some("c"), board());
        let j_id = NodeId::from_path("j");
        let screw = FastenerData::screw(4.0, 30.0).owned_by(j_id);
        let listed = b.fastener(Some("listed"), screw.clone());
        let stray = b.fastener(Some("stray"), screw);
        let g = b.group(Some("g"), vec![a, c, stray]);
        b.join(
            Some("j"),
            JoinData::butt(a, Face::Right, c, Face::Left).with_fasteners(vec![listed, g]),
        );
        let drill = b.drill(
            Some("d"),
            DrillData {
                target: g,
                face: Face::Top.into(),
                position: DVec3::ZERO,
                diameter: 5.0,
                depth: 10.0,
            },
        );
        let root = b.group(Some("root"), vec![g, j_id, drill]);
        b.add_root(root);
        let findings = check(&b.finish());

        assert_eq!(count(&findings, FindingKind::JoinFastenerNotFastener), 1);
        assert_eq!(count(&findings, FindingKind::DrillTargetNotPrimitive), 1);
        let owner: Vec<_> = findings
            .iter()
            .filter(|f| f.kind == FindingKind::FastenerOwnerMismatch)
            .collect();
        assert_eq!(owner.len(), 1);
        assert_eq!(owner[0].node, Some(stray));
    }
}
