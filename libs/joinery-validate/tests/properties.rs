use glam::DVec3;
use joinery_graph::{
    Axis, DesignGraph, DrillData, Face, FastenerData, GraphBuilder, JoinData, NodeId,
    PrimitiveData, TransformData,
};
use joinery_validate::geometric::JoinKey;
use joinery_validate::{validate, FindingKind, Severity};
use proptest::prelude::*;
use std::collections::HashSet;

fn board(x: f64, y: f64, z: f64, grain: Axis) -> PrimitiveData {
    PrimitiveData::board(DVec3::new(x, y, z), grain)
}

#[test]
fn three_node_cycle_blocks() {
    let mut builder = GraphBuilder::new();
    let (a, b, c) = (NodeId::from_path("a"), NodeId::from_path("b"), NodeId::from_path("c"));
    builder.group(Some("a"), vec![b]);
    builder.group(Some("b"), vec![c]);
    builder.group(Some("c"), vec![a]);
    builder.add_root(a);

    let report = validate(&builder.finish());
    assert_eq!(report.blocking.len(), 1);
    assert_eq!(report.blocking[0].kind, FindingKind::Cycle);
    assert_eq!(report.blocking[0].severity, Severity::Error);
}

#[test]
fn swapped_duplicate_join_flagged_once() {
    let mut builder = GraphBuilder::new();
    let left = builder.primitive(Some("left"), board(19.0, 300.0, 720.0, Axis::Z));
    let shelf = builder.primitive(Some("shelf"), board(560.0, 300.0, 19.0, Axis::X));
    let first = builder.join(
        Some("first"),
        JoinData::butt(left, Face::Right, shelf, Face::Bottom),
    );
    let second = builder.join(
        Some("second"),
        JoinData::butt(shelf, Face::Bottom, left, Face::Right),
    );
    let root = builder.group(Some("cabinet"), vec![left, shelf, first, second]);
    builder.add_root(root);

    let report = validate(&builder.finish());
    assert_eq!(report.count(FindingKind::DuplicateJoin), 1);
    assert_eq!(report.blocking.len(), 1);
}

fn end_grain_case(face_b: Face) -> DesignGraph {
    let mut builder = GraphBuilder::new();
    let a = builder.primitive(Some("rail-a"), board(600.0, 70.0, 22.0, Axis::X));
    let b = builder.primitive(Some("rail-b"), board(600.0, 70.0, 22.0, Axis::X));
    let join = builder.join(Some("splice"), JoinData::butt(a, Face::Left, b, face_b));
    builder.add_root(join);
    builder.finish()
}

#[test]
fn end_grain_to_end_grain_warns_once() {
    let report = validate(&end_grain_case(Face::Right));
    assert!(report.is_renderable());
    assert_eq!(report.advisory.len(), 1);
    assert_eq!(report.advisory[0].kind, FindingKind::EndGrainJoint);

    let report = validate(&end_grain_case(Face::Top));
    assert!(report.is_empty());
}

fn fastener_case(length: f64) -> DesignGraph {
    let mut builder = GraphBuilder::new();
    let a = builder.primitive(Some("apron"), board(400.0, 100.0, 19.0, Axis::Z));
    let b = builder.primitive(Some("top"), board(800.0, 500.0, 19.0, Axis::X));
    let screw = builder.fastener(Some("screw"), FastenerData::screw(4.0, length));
    let join = builder.join(
        Some("apron-top"),
        JoinData::butt(a, Face::Left, b, Face::Bottom).with_fasteners(vec![screw]),
    );
    builder.add_root(join);
    builder.finish()
}

#[test]
fn over_length_fastener_is_advisory() {
    let report = validate(&fastener_case(500.0));
    assert!(report.is_renderable());
    assert_eq!(report.advisory.len(), 1);
    let finding = &report.advisory[0];
    assert_eq!(finding.kind, FindingKind::FastenerTooLong);
    assert!(finding.message.contains("exceeds combined"));
    assert!(finding.message.contains("thickness"));
    assert!(finding.message.contains("419"));

    assert!(validate(&fastener_case(30.0)).is_empty());
}

#[test]
fn single_orphan_is_advisory() {
    let mut builder = GraphBuilder::new();
    let kept = builder.primitive(Some("kept"), board(100.0, 100.0, 19.0, Axis::X));
    builder.primitive(Some("offcut"), board(100.0, 100.0, 19.0, Axis::X));
    builder.add_root(kept);

    let report = validate(&builder.finish());
    assert!(report.blocking.is_empty());
    assert_eq!(report.advisory.len(), 1);
    assert_eq!(report.advisory[0].kind, FindingKind::Orphan);
}

#[test]
fn bad_drill_reports_face_and_size() {
    let mut builder = GraphBuilder::new();
    let side = builder.primitive(Some("side"), board(19.0, 300.0, 720.0, Axis::Z));
    let hole = builder.drill(
        Some("shelf-pin"),
        DrillData {
            target: side,
            face: "sideways".into(),
            position: DVec3::new(19.0, 40.0, 200.0),
            diameter: 0.0,
            depth: -1.0,
        },
    );
    let root = builder.group(Some("cabinet"), vec![side, hole]);
    builder.add_root(root);

    let report = validate(&builder.finish());
    let kinds: Vec<_> = report.blocking.iter().map(|f| f.kind).collect();
    assert_eq!(kinds, [FindingKind::InvalidFace, FindingKind::NonPositiveDrill]);
    assert!(report.blocking.iter().all(|f| f.node == Some(hole)));
    assert!(report.advisory.is_empty());
}

#[test]
fn face_names_must_be_exact() {
    let mut builder = GraphBuilder::new();
    let a = builder.primitive(Some("a"), board(400.0, 60.0, 20.0, Axis::X));
    let c = builder.primitive(Some("c"), board(60.0, 600.0, 20.0, Axis::Y));
    let join = builder.join(Some("corner"), JoinData::butt(a, " TOP ", c, "Left"));
    builder.add_root(join);

    let report = validate(&builder.finish());
    assert!(!report.is_renderable());
    assert_eq!(report.count(FindingKind::InvalidFace), 2);
}

#[test]
fn part_nested_under_a_board_is_advisory() {
    let mut builder = GraphBuilder::new();
    let top = builder.primitive(Some("top"), board(800.0, 400.0, 22.0, Axis::X));
    let cleat = builder.primitive(Some("cleat"), board(400.0, 40.0, 20.0, Axis::X));
    assert!(builder.add_child(top, cleat));
    builder.add_root(top);

    let report = validate(&builder.finish());
    assert!(report.is_renderable());
    assert_eq!(report.advisory.len(), 1);
    assert_eq!(report.advisory[0].kind, FindingKind::LeafWithChildren);
    assert_eq!(report.advisory[0].node, Some(top));
}

#[test]
fn empty_graph_is_clean() {
    assert!(validate(&DesignGraph::new()).is_empty());
}

// =============================================================================
// VALID GRAPHS
// =============================================================================

#[derive(Debug, Clone)]
struct Plan {
    boards: Vec<(f64, f64, f64, Axis)>,
    joins: Vec<(usize, Face, usize, Face, f64)>,
    lifts: Vec<f64>,
}

fn axis() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::X), Just(Axis::Y), Just(Axis::Z)]
}

fn face() -> impl Strategy<Value = Face> {
    proptest::sample::select(Face::ALL.to_vec())
}

fn plan() -> impl Strategy<Value = Plan> {
    let boards = proptest::collection::vec(
        (1.0f64..1000.0, 1.0f64..1000.0, 1.0f64..100.0, axis()),
        2..8,
    );
    boards.prop_flat_map(|boards| {
        let n = boards.len();
        let joins =
            proptest::collection::vec((0..n, face(), 0..n, face(), 1.0f64..3000.0), 0..8);
        let lifts = proptest::collection::vec(-500.0f64..500.0, n);
        (Just(boards), joins, lifts).prop_map(|(boards, joins, lifts)| Plan {
            boards,
            joins,
            lifts,
        })
    })
}

/// Builds an acyclic, fully referenced graph with unique names and joins.
fn build(plan: &Plan) -> DesignGraph {
    let mut builder = GraphBuilder::new();
    let mut members = Vec::new();
    let mut parts = Vec::new();
    for (i, (x, y, z, grain)) in plan.boards.iter().enumerate() {
        let path = format!("part/{i}");
        let part = builder.primitive(Some(path.as_str()), board(*x, *y, *z, *grain));
        builder.bind_name(part, format!("part-{i}"));
        let lift = TransformData::translate(DVec3::Z * plan.lifts[i]);
        let lifted = builder.transform(None, lift, vec![part]);
        parts.push(part);
        members.push(lifted);
    }

    let mut keys = HashSet::new();
    for (a, face_a, b, face_b, length) in &plan.joins {
        if a == b {
            continue;
        }
        let data = JoinData::butt(parts[*a], *face_a, parts[*b], *face_b);
        if !keys.insert(JoinKey::new(&data)) {
            continue;
        }
        let screw = builder.fastener(None, FastenerData::screw(4.0, *length));
        let join = builder.join(None, data.with_fasteners(vec![screw]));
        members.push(join);
    }

    let root = builder.group(Some("assembly"), members);
    builder.add_root(root);
    builder.finish()
}

proptest! {
    #[test]
    fn valid_graphs_have_no_blocking_findings(plan in plan()) {
        let graph = build(&plan);
        let report = validate(&graph);
        prop_assert!(report.is_renderable(), "unexpected blocking findings: {:?}", report.blocking);
        for finding in &report.advisory {
            prop_assert!(matches!(
                finding.kind,
                FindingKind::EndGrainJoint | FindingKind::FastenerTooLong
            ));
        }
    }
}
