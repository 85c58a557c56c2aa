//! # Graph Builder
//!
//! Bottom-up construction of a [`DesignGraph`] from front-end builder calls.
//!
//! ## Builder Calls
//!
//! ```text
//! create node (construction path, payload, children)
//! bind name
//! add child
//! set root
//! ```
//!
//! Each created node's id is derived from its construction path. Nodes
//! created without a path get `"<kind>#<n>"`, numbered by a counter owned by
//! the builder, so anonymous ids are stable per evaluation and independent
//! of any other evaluation running concurrently.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use joinery_graph::{Axis, GraphBuilder, PrimitiveData, TransformData};
//!
//! let mut builder = GraphBuilder::new();
//! let shelf = builder.primitive(
//!     Some("main/shelf"),
//!     PrimitiveData::board(DVec3::new(600.0, 250.0, 19.0), Axis::X),
//! );
//! builder.bind_name(shelf, "shelf");
//! let lifted = builder.transform(
//!     None,
//!     TransformData::translate(DVec3::new(0.0, 0.0, 300.0)),
//!     vec![shelf],
//! );
//! builder.add_root(lifted);
//!
//! let graph = builder.finish();
//! assert_eq!(graph.len(), 2);
//! assert!(graph.lookup("shelf").is_some());
//! ```

use crate::graph::{DesignGraph, GraphDefaults};
use crate::id::NodeId;
use crate::node::{Node, NodeData, NodeKind};
use crate::payload::{DrillData, FastenerData, JoinData, PrimitiveData, TransformData};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

// =============================================================================
// ERRORS
// =============================================================================

/// A builder call that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The call modifies a node that has not been created.
    #[error("builder call references node {0:?} before it was created")]
    UnknownNode(NodeId),
}

// =============================================================================
// BUILD OPERATIONS
// =============================================================================

/// One builder call, as emitted by a front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BuildOp {
    /// Create a node. `path: None` requests an anonymous path.
    Create {
        path: Option<String>,
        name: Option<String>,
        children: Vec<NodeId>,
        data: NodeData,
    },
    /// Bind a name to an existing node.
    BindName { node: NodeId, name: String },
    /// Append a child to an existing node.
    AddChild { parent: NodeId, child: NodeId },
    /// Register a root.
    SetRoot { node: NodeId },
}

/// Replays a builder-call stream into a fresh graph.
pub fn replay(ops: impl IntoIterator<Item = BuildOp>) -> Result<DesignGraph, BuildError> {
    let mut builder = GraphBuilder::new();
    for op in ops {
        builder.apply(op)?;
    }
    Ok(builder.finish())
}

// =============================================================================
// BUILDER
// =============================================================================

/// Owns a graph under construction plus the anonymous-path counter.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: DesignGraph,
    anonymous: u64,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::with_defaults(GraphDefaults::default())
    }

    pub fn with_defaults(defaults: GraphDefaults) -> Self {
        Self {
            graph: DesignGraph::with_defaults(defaults),
            anonymous: 0,
        }
    }

    /// Next anonymous construction path for a node kind.
    pub fn anonymous_path(&mut self, kind: NodeKind) -> String {
        let path = format!("{}#{}", kind, self.anonymous);
        self.anonymous += 1;
        path
    }

    /// Applies one builder call. Returns the id of the node it touched.
    pub fn apply(&mut self, op: BuildOp) -> Result<NodeId, BuildError> {
        match op {
            BuildOp::Create {
                path,
                name,
                children,
                data,
            } => {
                let id = self.create(path.as_deref(), children, data);
                if let Some(name) = name {
                    self.bind_name(id, name);
                }
                Ok(id)
            }
            BuildOp::BindName { node, name } => {
                if self.bind_name(node, name) {
                    Ok(node)
                } else {
                    Err(BuildError::UnknownNode(node))
                }
            }
            BuildOp::AddChild { parent, child } => {
                if self.add_child(parent, child) {
                    Ok(parent)
                } else {
                    Err(BuildError::UnknownNode(parent))
                }
            }
            BuildOp::SetRoot { node } => {
                self.add_root(node);
                Ok(node)
            }
        }
    }

    /// Creates a node of any kind.
    pub fn create(&mut self, path: Option<&str>, children: Vec<NodeId>, data: NodeData) -> NodeId {
        let id = match path {
            Some(path) => NodeId::from_path(path),
            None => {
                let path = self.anonymous_path(data.kind());
                NodeId::from_path(&path)
            }
        };
        let node = Node::new(id, data).with_children(children);
        if let Some(previous) = self.graph.add_node(node) {
            warn!(
                node = ?id,
                replaced = %previous.kind(),
                "construction path produced a duplicate node id; keeping the later node"
            );
        }
        id
    }

    pub fn primitive(&mut self, path: Option<&str>, data: PrimitiveData) -> NodeId {
        self.create(path, Vec::new(), NodeData::Primitive(data))
    }

    pub fn transform(
        &mut self,
        path: Option<&str>,
        data: TransformData,
        children: Vec<NodeId>,
    ) -> NodeId {
        self.create(path, children, NodeData::Transform(data))
    }

    pub fn group(&mut self, path: Option<&str>, members: Vec<NodeId>) -> NodeId {
        self.create(path, members, NodeData::Group)
    }

    pub fn join(&mut self, path: Option<&str>, data: JoinData) -> NodeId {
        self.create(path, Vec::new(), NodeData::Join(data))
    }

    pub fn drill(&mut self, path: Option<&str>, data: DrillData) -> NodeId {
        self.create(path, Vec::new(), NodeData::Drill(data))
    }

    pub fn fastener(&mut self, path: Option<&str>, data: FastenerData) -> NodeId {
        self.create(path, Vec::new(), NodeData::Fastener(data))
    }

    /// Binds `name` to an existing node. Returns false if the node is unknown.
    ///
    /// Rebinding a node leaves its previous name in the index; validation
    /// reports the stale entry.
    pub fn bind_name(&mut self, id: NodeId, name: impl Into<String>) -> bool {
        let Some(node) = self.graph.get(&id) else {
            return false;
        };
        let renamed = node.clone().named(name);
        self.graph.add_node(renamed);
        true
    }

    /// Appends `child` to an existing node. Returns false if the parent is unknown.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(node) = self.graph.get(&parent) else {
            return false;
        };
        let mut updated = node.clone();
        updated.children.push(child);
        self.graph.add_node(updated);
        true
    }

    pub fn add_root(&mut self, id: NodeId) {
        self.graph.add_root(id);
    }

    /// Read access to the graph built so far.
    pub fn graph(&self) -> &DesignGraph {
        &self.graph
    }

    /// Hands over the finished graph.
    pub fn finish(self) -> DesignGraph {
        self.graph
    }
}

// =============================================================================
// TESTS
// =============================================================================
