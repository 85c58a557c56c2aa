//! # Design Nodes
//!
//! A node is one element of the design graph. Its payload is a closed enum,
//! so every consumer matches all kinds exhaustively.

use crate::id::NodeId;
use crate::payload::{DrillData, FastenerData, JoinData, PrimitiveData, TransformData};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// NODE KIND
// =============================================================================

/// Discriminant of [`NodeData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Primitive,
    Transform,
    Join,
    Group,
    Drill,
    Fastener,
}

impl NodeKind {
    /// Lowercase name, also used as the stem of anonymous construction paths.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Primitive => "primitive",
            NodeKind::Transform => "transform",
            NodeKind::Join => "join",
            NodeKind::Group => "group",
            NodeKind::Drill => "drill",
            NodeKind::Fastener => "fastener",
        }
    }

    /// Whether the tessellator descends into this kind's `children`.
    pub fn renders_children(self) -> bool {
        matches!(self, NodeKind::Group | NodeKind::Transform)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// NODE DATA
// =============================================================================

/// Kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeData {
    /// Board-like part with real geometry.
    Primitive(PrimitiveData),
    /// Translation/rotation applied to the node's children.
    Transform(TransformData),
    /// Connection between two parts.
    Join(JoinData),
    /// Pure aggregation; members are the node's children.
    Group,
    /// Hole bored into a part.
    Drill(DrillData),
    /// Mechanical fastener.
    Fastener(FastenerData),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Primitive(_) => NodeKind::Primitive,
            NodeData::Transform(_) => NodeKind::Transform,
            NodeData::Join(_) => NodeKind::Join,
            NodeData::Group => NodeKind::Group,
            NodeData::Drill(_) => NodeKind::Drill,
            NodeData::Fastener(_) => NodeKind::Fastener,
        }
    }
}

// =============================================================================
// REFERENCES
// =============================================================================

/// The field a reference was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefField {
    Child,
    JoinPartA,
    JoinPartB,
    JoinFastener,
    DrillTarget,
    FastenerJoin,
}

impl RefField {
    pub fn as_str(self) -> &'static str {
        match self {
            RefField::Child => "child",
            RefField::JoinPartA => "join part A",
            RefField::JoinPartB => "join part B",
            RefField::JoinFastener => "join fastener",
            RefField::DrillTarget => "drill target",
            RefField::FastenerJoin => "fastener owner",
        }
    }
}

impl fmt::Display for RefField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outgoing reference of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub field: RefField,
    pub target: NodeId,
}

// =============================================================================
// NODE
// =============================================================================

/// One element of the design graph.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use joinery_graph::{Axis, Node, NodeData, NodeId, NodeKind, PrimitiveData};
///
/// let node = Node::new(
///     NodeId::from_path("main/leg"),
///     NodeData::Primitive(PrimitiveData::board(DVec3::new(45.0, 45.0, 720.0), Axis::Z)),
/// )
/// .named("leg");
/// assert_eq!(node.kind(), NodeKind::Primitive);
/// assert_eq!(node.label(), "leg");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: Option<String>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

impl Node {
    pub fn new(id: NodeId, data: NodeData) -> Self {
        Self {
            id,
            name: None,
            children: Vec::new(),
            data,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_children(mut self, children: Vec<NodeId>) -> Self {
        self.children = children;
        self
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    /// The node's name if it has a non-empty one.
    pub fn bound_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Human-readable label: the name, or the short id for unnamed nodes.
    pub fn label(&self) -> String {
        match self.bound_name() {
            Some(name) => name.to_string(),
            None => self.id.short(),
        }
    }

    /// Payload of a primitive node.
    pub fn as_primitive(&self) -> Option<&PrimitiveData> {
        match &self.data {
            NodeData::Primitive(data) => Some(data),
            _ => None,
        }
    }

    /// Payload of a join node.
    pub fn as_join(&self) -> Option<&JoinData> {
        match &self.data {
            NodeData::Join(data) => Some(data),
            _ => None,
        }
    }

    /// Payload of a fastener node.
    pub fn as_fastener(&self) -> Option<&FastenerData> {
        match &self.data {
            NodeData::Fastener(data) => Some(data),
            _ => None,
        }
    }

    /// Cross-references held in the payload (everything except `children`).
    pub fn cross_references(&self) -> Vec<Reference> {
        let reference = |field, target| Reference { field, target };
        match &self.data {
            NodeData::Join(join) => {
                let mut refs = vec![
                    reference(RefField::JoinPartA, join.part_a),
                    reference(RefField::JoinPartB, join.part_b),
                ];
                refs.extend(
                    join.fasteners
                        .iter()
                        .map(|id| reference(RefField::JoinFastener, *id)),
                );
                refs
            }
            NodeData::Drill(drill) => vec![reference(RefField::DrillTarget, drill.target)],
            NodeData::Fastener(fastener) => fastener
                .join
                .map(|join| reference(RefField::FastenerJoin, join))
                .into_iter()
                .collect(),
            NodeData::Primitive(_) | NodeData::Transform(_) | NodeData::Group => Vec::new(),
        }
    }

    /// Every outgoing reference: children first, then cross-references.
    pub fn references(&self) -> Vec<Reference> {
        let mut refs: Vec<Reference> = self
            .children
            .iter()
            .map(|id| Reference {
                field: RefField::Child,
                target: *id,
            })
            .collect();
        refs.extend(self.cross_references());
        refs
    }
}

// =============================================================================
// TESTS
// =============================================================================
