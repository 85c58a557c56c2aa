//! # Joinery Graph
//!
//! Immutable design-graph model for woodworking assemblies.
//!
//! ## Architecture
//!
//! ```text
//! front-end builder calls → joinery-graph (DesignGraph) → joinery-validate
//!                                                       → joinery-tessellate
//! ```
//!
//! A graph is built once per evaluation, bottom-up, and then only read.
//! Node identity is derived from construction paths (see [`NodeId`]), so two
//! evaluations of the same program produce the same ids node for node.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use joinery_graph::{Axis, Face, GraphBuilder, JoinData, PrimitiveData};
//!
//! let mut builder = GraphBuilder::new();
//! let side = builder.primitive(
//!     Some("cabinet/side"),
//!     PrimitiveData::board(DVec3::new(19.0, 300.0, 720.0), Axis::Z),
//! );
//! let shelf = builder.primitive(
//!     Some("cabinet/shelf"),
//!     PrimitiveData::board(DVec3::new(560.0, 300.0, 19.0), Axis::X),
//! );
//! let join = builder.join(
//!     Some("cabinet/shelf-join"),
//!     JoinData::butt(side, Face::Right, shelf, Face::Left),
//! );
//! let cabinet = builder.group(Some("cabinet"), vec![side, shelf, join]);
//! builder.add_root(cabinet);
//!
//! let graph = builder.finish();
//! assert_eq!(graph.len(), 4);
//! ```

pub mod builder;
pub mod graph;
pub mod id;
pub mod node;
pub mod payload;

pub use builder::{replay, BuildError, BuildOp, GraphBuilder};
pub use graph::{DesignGraph, GraphDefaults};
pub use id::NodeId;
pub use node::{Node, NodeData, NodeKind, RefField, Reference};
pub use payload::{
    Axis, DrillData, Face, FaceSelector, FastenerData, FastenerKind, JoinData, JoinKind,
    MaterialSpec, PrimitiveData, Profile, TransformData, UnknownFace,
};
