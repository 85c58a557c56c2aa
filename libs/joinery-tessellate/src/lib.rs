//! # Joinery Tessellate
//!
//! Turns a validated [`DesignGraph`] into one [`Mesh`] per placed part.
//!
//! ## Walk
//!
//! ```text
//! roots → Group     → children (placement unchanged)
//!       → Transform → children (placement + translation, + rotation)
//!       → Primitive → kernel solid → rotate → translate → mesh
//!       → Join / Drill / Fastener → nothing
//! ```
//!
//! Only groups and transforms descend into `children`. Children attached
//! to any other kind are skipped; the validator reports them as advisory.
//!
//! Placements compose additively: nested translations are summed, and so
//! are nested Euler rotations. Each level receives its own copy, so leaving
//! a transform restores the outer placement on every path, including early
//! returns on error.
//!
//! Callers are expected to tessellate only graphs without blocking
//! findings. A part reachable through several parents is emitted once per
//! path.

use config::constants::MAX_TESSELLATION_DEPTH;
use glam::DVec3;
use joinery_graph::{
    DesignGraph, Node, NodeData, NodeId, PrimitiveData, Profile, TransformData,
};
use joinery_kernel::{Kernel, KernelError, Mesh};
use thiserror::Error;
use tracing::debug;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum TessellateError {
    /// A root or child does not resolve.
    #[error("node {0:?} does not exist")]
    MissingNode(NodeId),

    /// Nesting deeper than the walk allows, usually a cycle.
    #[error("nesting deeper than {max} levels at node {node:?}")]
    DepthExceeded { node: NodeId, max: usize },

    #[error(transparent)]
    Kernel(#[from] KernelError),
}

// =============================================================================
// PLACEMENT
// =============================================================================

/// Accumulated translation and rotation (Euler degrees) of a subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    pub translation: DVec3,
    pub rotation: DVec3,
}

impl Placement {
    /// Placement of the children of `transform`.
    pub fn enter(self, transform: &TransformData) -> Self {
        Self {
            translation: self.translation + transform.translation.unwrap_or(DVec3::ZERO),
            rotation: self.rotation + transform.rotation.unwrap_or(DVec3::ZERO),
        }
    }
}

// =============================================================================
// WALK
// =============================================================================

/// Tessellates every part reachable from the roots, in root order and then
/// depth-first child order.
///
/// An empty graph yields an empty list.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use joinery_graph::{Axis, GraphBuilder, PrimitiveData, TransformData};
/// use joinery_kernel::MeshKernel;
/// use joinery_tessellate::tessellate;
///
/// let mut builder = GraphBuilder::new();
/// let shelf = builder.primitive(
///     Some("shelf"),
///     PrimitiveData::board(DVec3::new(600.0, 250.0, 19.0), Axis::X),
/// );
/// builder.bind_name(shelf, "shelf");
/// let raised = builder.transform(
///     None,
///     TransformData::translate(DVec3::new(0.0, 0.0, 300.0)),
///     vec![shelf],
/// );
/// builder.add_root(raised);
///
/// let meshes = tessellate(&builder.finish(), &MeshKernel::new()).unwrap();
/// assert_eq!(meshes.len(), 1);
/// assert_eq!(meshes[0].part_name, "shelf");
/// ```
pub fn tessellate<K: Kernel>(
    graph: &DesignGraph,
    kernel: &K,
) -> Result<Vec<Mesh>, TessellateError> {
    let mut walker = Walker {
        graph,
        kernel,
        meshes: Vec::new(),
    };
    for root in graph.roots() {
        walker.visit(*root, Placement::default(), 0)?;
    }
    debug!(
        roots = graph.roots().len(),
        meshes = walker.meshes.len(),
        "tessellated graph"
    );
    Ok(walker.meshes)
}

struct Walker<'a, K> {
    graph: &'a DesignGraph,
    kernel: &'a K,
    meshes: Vec<Mesh>,
}

impl<K: Kernel> Walker<'_, K> {
    fn visit(
        &mut self,
        id: NodeId,
        placement: Placement,
        depth: usize,
    ) -> Result<(), TessellateError> {
        if depth > MAX_TESSELLATION_DEPTH {
            return Err(TessellateError::DepthExceeded {
                node: id,
                max: MAX_TESSELLATION_DEPTH,
            });
        }
        let node = self.graph.get(&id).ok_or(TessellateError::MissingNode(id))?;

        match &node.data {
            NodeData::Primitive(primitive) => {
                let mesh = self.realize(node, primitive, placement)?;
                self.meshes.push(mesh);
            }
            NodeData::Transform(transform) => {
                let inner = placement.enter(transform);
                for child in &node.children {
                    self.visit(*child, inner, depth + 1)?;
                }
            }
            NodeData::Group => {
                for child in &node.children {
                    self.visit(*child, placement, depth + 1)?;
                }
            }
            // Metadata only.
            NodeData::Join(_) | NodeData::Drill(_) | NodeData::Fastener(_) => {}
        }
        Ok(())
    }

    /// Builds the part's solid, rotates it, then translates it.
    fn realize(
        &self,
        node: &Node,
        primitive: &PrimitiveData,
        placement: Placement,
    ) -> Result<Mesh, TessellateError> {
        let size = primitive.dimensions;
        let solid = match primitive.profile {
            Profile::Rectangular => self.kernel.cuboid(size)?,
            Profile::Round { segments } => {
                // Centred in the dimensions box, like a board would fill it.
                let radius = size.x.min(size.y) / 2.0;
                let rod = self.kernel.cylinder(size.z, radius, segments)?;
                self.kernel.translate(&rod, DVec3::new(size.x / 2.0, size.y / 2.0, 0.0))
            }
        };
        let solid = self.kernel.rotate(&solid, placement.rotation);
        let solid = self.kernel.translate(&solid, placement.translation);

        let name = node.label();
        let mesh = self.kernel.to_mesh(&solid, &name)?;
        debug!(part = %name, triangles = mesh.triangle_count(), "tessellated part");
        Ok(mesh)
    }
}

// =============================================================================
// TESTS
// =============================================================================
