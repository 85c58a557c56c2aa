use approx::assert_relative_eq;
use glam::DVec3;
use joinery_graph::{
    Axis, DesignGraph, DrillData, Face, FastenerData, GraphBuilder, JoinData, NodeId,
    PrimitiveData, TransformData,
};
use joinery_kernel::{Kernel, KernelError, Mesh, MeshKernel};
use joinery_tessellate::{tessellate, TessellateError};
use std::cell::RefCell;

/// Kernel whose solids are the list of operations applied to them.
#[derive(Default)]
struct RecordingKernel {
    meshed: RefCell<Vec<(String, Vec<String>)>>,
}

impl Kernel for RecordingKernel {
    type Solid = Vec<String>;

    fn cuboid(&self, size: DVec3) -> Result<Self::Solid, KernelError> {
        Ok(vec![format!("cuboid {} {} {}", size.x, size.y, size.z)])
    }

    fn cylinder(
        &self,
        height: f64,
        radius: f64,
        segments: u32,
    ) -> Result<Self::Solid, KernelError> {
        Ok(vec![format!("cylinder {} {} {}", height, radius, segments)])
    }

    fn union(&self, a: &Self::Solid, _b: &Self::Solid) -> Self::Solid {
        a.clone()
    }

    fn difference(&self, a: &Self::Solid, _b: &Self::Solid) -> Self::Solid {
        a.clone()
    }

    fn intersection(&self, a: &Self::Solid, _b: &Self::Solid) -> Self::Solid {
        a.clone()
    }

    fn translate(&self, solid: &Self::Solid, offset: DVec3) -> Self::Solid {
        let mut ops = solid.clone();
        ops.push(format!("translate {} {} {}", offset.x, offset.y, offset.z));
        ops
    }

    fn rotate(&self, solid: &Self::Solid, degrees: DVec3) -> Self::Solid {
        let mut ops = solid.clone();
        ops.push(format!("rotate {} {} {}", degrees.x, degrees.y, degrees.z));
        ops
    }

    fn to_mesh(&self, solid: &Self::Solid, part_name: &str) -> Result<Mesh, KernelError> {
        self.meshed.borrow_mut().push((part_name.to_string(), solid.clone()));
        Ok(Mesh::new(part_name))
    }
}

fn board() -> PrimitiveData {
    PrimitiveData::board(DVec3::new(100.0, 50.0, 20.0), Axis::X)
}

#[test]
fn empty_graph_yields_no_meshes() {
    let meshes = tessellate(&DesignGraph::new(), &MeshKernel::new()).unwrap();
    assert!(meshes.is_empty());
}

#[test]
fn nested_transforms_compose_additively_and_unwind() {
    let mut b = GraphBuilder::new();
    let inner_part = b.primitive(Some("inner"), board());
    b.bind_name(inner_part, "inner");
    let sibling = b.primitive(Some("sibling"), board());
    b.bind_name(sibling, "sibling");
    let inner = b.transform(
        None,
        TransformData {
            translation: Some(DVec3::new(0.0, 0.0, 5.0)),
            rotation: Some(DVec3::new(0.0, 0.0, 30.0)),
        },
        vec![inner_part],
    );
    let outer = b.transform(
        None,
        TransformData {
            translation: Some(DVec3::new(10.0, 0.0, 0.0)),
            rotation: Some(DVec3::new(0.0, 0.0, 60.0)),
        },
        vec![inner, sibling],
    );
    b.add_root(outer);

    let kernel = RecordingKernel::default();
    tessellate(&b.finish(), &kernel).unwrap();
    let meshed = kernel.meshed.into_inner();

    assert_eq!(meshed.len(), 2);
    assert_eq!(meshed[0].0, "inner");
    assert_eq!(
        meshed[0].1,
        vec!["cuboid 100 50 20", "rotate 0 0 90", "translate 10 0 5"]
    );
    assert_eq!(meshed[1].0, "sibling");
    assert_eq!(
        meshed[1].1,
        vec!["cuboid 100 50 20", "rotate 0 0 60", "translate 10 0 0"]
    );
}

#[test]
fn joins_drills_and_fasteners_emit_nothing() {
    let mut b = GraphBuilder::new();
    let a = b.primitive(Some("a"), board());
    let c = b.primitive(Some("c"), board());
    let screw = b.fastener(None, FastenerData::screw(4.0, 30.0));
    let join = b.join(
        None,
        JoinData::butt(a, Face::Right, c, Face::Left).with_fasteners(vec![screw]),
    );
    let drill = b.drill(
        None,
        DrillData {
            target: a,
            face: Face::Top.into(),
            position: DVec3::new(10.0, 10.0, 0.0),
            diameter: 5.0,
            depth: 10.0,
        },
    );
    let group = b.group(Some("frame"), vec![a, c, join, drill, screw]);
    b.add_root(group);

    let meshes = tessellate(&b.finish(), &MeshKernel::new()).unwrap();
    assert_eq!(meshes.len(), 2);
}

#[test]
fn children_of_a_board_are_not_walked() {
    let mut b = GraphBuilder::new();
    let top = b.primitive(Some("top"), board());
    b.bind_name(top, "top");
    let cleat = b.primitive(Some("cleat"), board());
    assert!(b.add_child(top, cleat));
    b.add_root(top);

    let meshes = tessellate(&b.finish(), &MeshKernel::new()).unwrap();
    let names: Vec<_> = meshes.iter().map(|m| m.part_name.as_str()).collect();
    assert_eq!(names, ["top"]);
}

#[test]
fn unnamed_parts_are_tagged_with_short_id() {
    let mut b = GraphBuilder::new();
    let part = b.primitive(Some("anon"), board());
    b.add_root(part);

    let meshes = tessellate(&b.finish(), &MeshKernel::new()).unwrap();
    assert_eq!(meshes[0].part_name, part.short());
}

#[test]
fn rods_fill_their_dimension_box() {
    let mut b = GraphBuilder::new();
    let rod = b.primitive(Some("dowel"), PrimitiveData::rod(10.0, 60.0, 16));
    b.add_root(rod);

    let meshes = tessellate(&b.finish(), &MeshKernel::new()).unwrap();
    let (min, max) = meshes[0].bounding_box().unwrap();
    assert_relative_eq!(min[0], 0.0, epsilon = 1e-4);
    assert_relative_eq!(max[0], 10.0, epsilon = 1e-4);
    assert_relative_eq!(max[2], 60.0, epsilon = 1e-4);
}

#[test]
fn translated_board_lands_in_place() {
    let mut b = GraphBuilder::new();
    let shelf = b.primitive(Some("shelf"), board());
    let lifted = b.transform(
        None,
        TransformData::translate(DVec3::new(5.0, 0.0, 300.0)),
        vec![shelf],
    );
    b.add_root(lifted);

    let meshes = tessellate(&b.finish(), &MeshKernel::new()).unwrap();
    let (min, max) = meshes[0].bounding_box().unwrap();
    assert_eq!(min, [5.0, 0.0, 300.0]);
    assert_eq!(max, [105.0, 50.0, 320.0]);
}

#[test]
fn shared_part_is_emitted_per_path() {
    let mut b = GraphBuilder::new();
    let leg = b.primitive(Some("leg"), board());
    let left = b.transform(None, TransformData::translate(DVec3::ZERO), vec![leg]);
    let right = b.transform(None, TransformData::translate(DVec3::X * 500.0), vec![leg]);
    let table = b.group(Some("table"), vec![left, right]);
    b.add_root(table);

    let meshes = tessellate(&b.finish(), &MeshKernel::new()).unwrap();
    assert_eq!(meshes.len(), 2);
}

#[test]
fn missing_root_is_an_error() {
    let mut graph = DesignGraph::new();
    let ghost = NodeId::from_path("ghost");
    graph.add_root(ghost);
    let err = tessellate(&graph, &MeshKernel::new()).unwrap_err();
    assert!(matches!(err, TessellateError::MissingNode(id) if id == ghost));
}

#[test]
fn cycle_hits_depth_limit() {
    let mut b = GraphBuilder::new();
    let loop_id = NodeId::from_path("loop");
    b.group(Some("loop"), vec![loop_id]);
    b.add_root(loop_id);
    let err = tessellate(&b.finish(), &MeshKernel::new()).unwrap_err();
    assert!(matches!(err, TessellateError::DepthExceeded { .. }));
}

#[test]
fn kernel_errors_propagate() {
    let mut b = GraphBuilder::new();
    let flat = b.primitive(
        Some("flat"),
        PrimitiveData::board(DVec3::new(100.0, 0.0, 19.0), Axis::X),
    );
    b.add_root(flat);
    let err = tessellate(&b.finish(), &MeshKernel::new()).unwrap_err();
    assert!(matches!(err, TessellateError::Kernel(KernelError::Degenerate { .. })));
}
