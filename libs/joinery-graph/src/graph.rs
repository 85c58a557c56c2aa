//! # Design Graph
//!
//! Container for the nodes produced by one evaluation.
//!
//! The graph performs no validation: it stores what it is given. Structural
//! guarantees (acyclicity, referential integrity, name uniqueness) are checked
//! afterwards by the validator.
//!
//! ## Example
//!
//! ```rust
//! use joinery_graph::{DesignGraph, Node, NodeData, NodeId};
//!
//! let mut graph = DesignGraph::new();
//! let id = NodeId::from_path("main/frame");
//! graph.add_node(Node::new(id, NodeData::Group).named("frame"));
//! graph.add_root(id);
//!
//! assert_eq!(graph.lookup("frame").map(|n| n.id), Some(id));
//! assert_eq!(graph.roots(), &[id]);
//! ```

use crate::id::NodeId;
use crate::node::Node;
use crate::payload::MaterialSpec;
use config::constants::{DEFAULT_CLEARANCE, DEFAULT_UNITS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// DEFAULTS
// =============================================================================

/// Values a graph is seeded with before any node is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDefaults {
    /// Clearance used by joins that do not specify one.
    pub clearance: f64,
    /// Material of parts that do not specify one.
    pub material: MaterialSpec,
    /// Length unit of every dimension in the graph.
    pub units: String,
}

impl Default for GraphDefaults {
    fn default() -> Self {
        Self {
            clearance: DEFAULT_CLEARANCE,
            material: MaterialSpec::default(),
            units: DEFAULT_UNITS.to_string(),
        }
    }
}

// =============================================================================
// GRAPH
// =============================================================================

/// The design graph of one evaluation.
///
/// Nodes are kept in id order so every traversal over "all nodes" is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignGraph {
    nodes: BTreeMap<NodeId, Node>,
    roots: Vec<NodeId>,
    name_index: BTreeMap<String, NodeId>,
    defaults: GraphDefaults,
    version: u64,
}

impl DesignGraph {
    /// Creates an empty graph with the default clearance, material and units.
    pub fn new() -> Self {
        Self::with_defaults(GraphDefaults::default())
    }

    pub fn with_defaults(defaults: GraphDefaults) -> Self {
        Self {
            nodes: BTreeMap::new(),
            roots: Vec::new(),
            name_index: BTreeMap::new(),
            defaults,
            version: 0,
        }
    }

    /// Inserts a node.
    ///
    /// A node with the same id is replaced (last write wins) and returned.
    /// A non-empty name is bound in the name index, overwriting any earlier
    /// binding of that name.
    pub fn add_node(&mut self, node: Node) -> Option<Node> {
        if let Some(name) = node.bound_name() {
            self.name_index.insert(name.to_string(), node.id);
        }
        self.version += 1;
        self.nodes.insert(node.id, node)
    }

    /// Appends a root. Duplicates are kept.
    pub fn add_root(&mut self, id: NodeId) {
        self.roots.push(id);
        self.version += 1;
    }

    /// The node currently bound to `name`.
    pub fn lookup(&self, name: &str) -> Option<&Node> {
        self.name_index.get(name).and_then(|id| self.nodes.get(id))
    }

    #[inline]
    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All node ids in id order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn name_index(&self) -> &BTreeMap<String, NodeId> {
        &self.name_index
    }

    pub fn defaults(&self) -> &GraphDefaults {
        &self.defaults
    }

    /// Number of mutations applied since creation.
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
