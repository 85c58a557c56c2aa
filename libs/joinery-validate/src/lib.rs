//! # Joinery Validate
//!
//! Three independent passes over a finished [`DesignGraph`]:
//!
//! ```text
//! structural → geometric → material
//! ```
//!
//! Each pass returns findings; [`validate`] runs all three and partitions
//! them into blocking and advisory. A graph with any blocking finding must
//! not be tessellated.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use joinery_graph::{Axis, Face, GraphBuilder, JoinData, PrimitiveData};
//! use joinery_validate::{validate, FindingKind};
//!
//! let mut builder = GraphBuilder::new();
//! let rail = PrimitiveData::board(DVec3::new(400.0, 60.0, 20.0), Axis::X);
//! let a = builder.primitive(Some("a"), rail.clone());
//! let b = builder.primitive(Some("b"), rail);
//! let join = builder.join(Some("j"), JoinData::butt(a, Face::Right, b, Face::Left));
//! builder.add_root(join);
//!
//! let report = validate(&builder.finish());
//! assert!(report.is_renderable());
//! assert_eq!(report.count(FindingKind::EndGrainJoint), 1);
//! ```

pub mod finding;
pub mod geometric;
pub mod material;
pub mod structural;

pub use finding::{Finding, FindingKind, Severity, ValidationReport};

use joinery_graph::DesignGraph;
use tracing::debug;

/// Runs every pass and partitions the findings by severity.
pub fn validate(graph: &DesignGraph) -> ValidationReport {
    let structural = structural::check(graph);
    debug!(findings = structural.len(), "structural pass");
    let geometric = geometric::check(graph);
    debug!(findings = geometric.len(), "geometric pass");
    let material = material::check(graph);
    debug!(findings = material.len(), "material pass");

    let report =
        ValidationReport::from_findings(structural.into_iter().chain(geometric).chain(material));
    debug!(
        nodes = graph.len(),
        blocking = report.blocking.len(),
        advisory = report.advisory.len(),
        "validated graph"
    );
    report
}
