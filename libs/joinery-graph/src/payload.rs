//! # Node Payloads
//!
//! Kind-specific data carried by design-graph nodes.
//!
//! All values are fully resolved: dimensions are concrete numbers in the
//! graph's units, references are [`NodeId`]s.

use crate::id::NodeId;
use config::constants::{
    DEFAULT_CLEARANCE, DEFAULT_CYLINDER_SEGMENTS, DEFAULT_GRADE, DEFAULT_SPECIES,
};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// AXES AND FACES
// =============================================================================

/// A principal axis of a part's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Picks this axis' component out of a vector.
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use joinery_graph::Axis;
    ///
    /// assert_eq!(Axis::Y.component(DVec3::new(1.0, 2.0, 3.0)), 2.0);
    /// ```
    #[inline]
    pub fn component(self, v: DVec3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the six semantic faces of a board.
///
/// ## Face Normals
///
/// ```text
/// top / bottom  →  Z
/// left / right  →  X
/// front / back  →  Y
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Face {
    Top,
    Bottom,
    Left,
    Right,
    Front,
    Back,
}

impl Face {
    /// All six canonical faces.
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::Left,
        Face::Right,
        Face::Front,
        Face::Back,
    ];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Face::Top => "top",
            Face::Bottom => "bottom",
            Face::Left => "left",
            Face::Right => "right",
            Face::Front => "front",
            Face::Back => "back",
        }
    }

    /// The axis this face is perpendicular to.
    pub fn normal_axis(self) -> Axis {
        match self {
            Face::Top | Face::Bottom => Axis::Z,
            Face::Left | Face::Right => Axis::X,
            Face::Front | Face::Back => Axis::Y,
        }
    }

    /// True when this face exposes end grain for a part with the given grain.
    ///
    /// A face is end grain when it is perpendicular to the grain direction.
    ///
    /// ```rust
    /// use joinery_graph::{Axis, Face};
    ///
    /// assert!(Face::Left.is_end_grain(Axis::X));
    /// assert!(!Face::Top.is_end_grain(Axis::X));
    /// ```
    #[inline]
    pub fn is_end_grain(self, grain: Axis) -> bool {
        self.normal_axis() == grain
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A face name that is not one of the six canonical faces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown face `{0}` (expected top, bottom, left, right, front or back)")]
pub struct UnknownFace(pub String);

impl FromStr for Face {
    type Err = UnknownFace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Face::ALL
            .into_iter()
            .find(|face| face.as_str() == s)
            .ok_or_else(|| UnknownFace(s.to_string()))
    }
}

/// A face selector exactly as the front-end supplied it.
///
/// Kept as text so an invalid selector survives into the graph and is
/// reported by validation instead of being rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceSelector(String);

impl FaceSelector {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves the selector to a canonical face.
    pub fn face(&self) -> Result<Face, UnknownFace> {
        self.0.parse()
    }
}

impl From<Face> for FaceSelector {
    fn from(face: Face) -> Self {
        Self(face.as_str().to_string())
    }
}

impl From<&str> for FaceSelector {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for FaceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// MATERIAL
// =============================================================================

/// Advisory material description. Never changes geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Wood species, e.g. "oak".
    pub species: String,
    /// Nominal stock thickness.
    pub thickness: Option<f64>,
    /// Lumber grade.
    pub grade: Option<String>,
}

impl MaterialSpec {
    pub fn species(species: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            thickness: None,
            grade: None,
        }
    }
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self {
            species: DEFAULT_SPECIES.to_string(),
            thickness: None,
            grade: Some(DEFAULT_GRADE.to_string()),
        }
    }
}

// =============================================================================
// PRIMITIVE
// =============================================================================

/// Cross-section of a primitive part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Profile {
    /// Rectangular board filling its dimensions box.
    Rectangular,
    /// Round stock along Z; diameter is the smaller of the X/Y dimensions.
    Round {
        /// Segments around the circumference.
        segments: u32,
    },
}

/// Board-like part payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveData {
    /// Extent along X, Y and Z.
    pub dimensions: DVec3,
    /// Cross-section.
    pub profile: Profile,
    /// Direction the grain runs.
    pub grain: Axis,
    /// Material; `None` means the graph defaults apply.
    pub material: Option<MaterialSpec>,
}

impl PrimitiveData {
    /// Rectangular board with the given dimensions and grain.
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use joinery_graph::{Axis, PrimitiveData};
    ///
    /// let shelf = PrimitiveData::board(DVec3::new(600.0, 250.0, 19.0), Axis::X);
    /// assert_eq!(shelf.thickness_through(joinery_graph::Face::Top), 19.0);
    /// ```
    pub fn board(dimensions: DVec3, grain: Axis) -> Self {
        Self {
            dimensions,
            profile: Profile::Rectangular,
            grain,
            material: None,
        }
    }

    /// Round stock (dowel, rod) along Z.
    pub fn rod(diameter: f64, length: f64, segments: u32) -> Self {
        Self {
            dimensions: DVec3::new(diameter, diameter, length),
            profile: Profile::Round { segments },
            grain: Axis::Z,
            material: None,
        }
    }

    /// Dowel with the default segment count.
    pub fn dowel(diameter: f64, length: f64) -> Self {
        Self::rod(diameter, length, DEFAULT_CYLINDER_SEGMENTS)
    }

    pub fn with_material(mut self, material: MaterialSpec) -> Self {
        self.material = Some(material);
        self
    }

    /// Thickness of the part measured perpendicular to a face.
    #[inline]
    pub fn thickness_through(&self, face: Face) -> f64 {
        face.normal_axis().component(self.dimensions)
    }
}

// =============================================================================
// TRANSFORM
// =============================================================================

/// Spatial transform applied to all children.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformData {
    /// Translation vector.
    pub translation: Option<DVec3>,
    /// Euler rotation in degrees (X, then Y, then Z).
    pub rotation: Option<DVec3>,
}

impl TransformData {
    pub fn translate(offset: DVec3) -> Self {
        Self {
            translation: Some(offset),
            rotation: None,
        }
    }

    pub fn rotate(degrees: DVec3) -> Self {
        Self {
            translation: None,
            rotation: Some(degrees),
        }
    }
}

// =============================================================================
// JOIN
// =============================================================================

/// Joint type with its kind-specific parameters.
///
/// Only butt joints carry validation semantics today; the others are
/// recorded for documentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JoinKind {
    Butt,
    Dado { depth: f64 },
    Rabbet { depth: f64, width: f64 },
}

impl JoinKind {
    #[inline]
    pub fn is_butt(&self) -> bool {
        matches!(self, JoinKind::Butt)
    }

    pub fn name(&self) -> &'static str {
        match self {
            JoinKind::Butt => "butt",
            JoinKind::Dado { .. } => "dado",
            JoinKind::Rabbet { .. } => "rabbet",
        }
    }
}

/// Metadata-only connection between two parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinData {
    pub kind: JoinKind,
    pub part_a: NodeId,
    pub face_a: FaceSelector,
    pub part_b: NodeId,
    pub face_b: FaceSelector,
    /// Gap between the mating faces.
    pub clearance: f64,
    /// Fastener nodes that belong to this join.
    pub fasteners: Vec<NodeId>,
}

impl JoinData {
    /// Butt joint with the default clearance and no fasteners.
    ///
    /// ```rust
    /// use joinery_graph::{Face, JoinData, NodeId};
    ///
    /// let join = JoinData::butt(
    ///     NodeId::from_path("side"), Face::Top,
    ///     NodeId::from_path("shelf"), Face::Left,
    /// );
    /// assert!(join.kind.is_butt());
    /// assert!(join.fasteners.is_empty());
    /// ```
    pub fn butt(
        part_a: NodeId,
        face_a: impl Into<FaceSelector>,
        part_b: NodeId,
        face_b: impl Into<FaceSelector>,
    ) -> Self {
        Self {
            kind: JoinKind::Butt,
            part_a,
            face_a: face_a.into(),
            part_b,
            face_b: face_b.into(),
            clearance: DEFAULT_CLEARANCE,
            fasteners: Vec::new(),
        }
    }

    pub fn with_fasteners(mut self, fasteners: Vec<NodeId>) -> Self {
        self.fasteners = fasteners;
        self
    }

    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = clearance;
        self
    }
}

// =============================================================================
// DRILL AND FASTENER
// =============================================================================

/// A hole bored into a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillData {
    /// Part being drilled.
    pub target: NodeId,
    /// Face the hole enters through.
    pub face: FaceSelector,
    /// Entry point in the target's local frame.
    pub position: DVec3,
    pub diameter: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FastenerKind {
    Screw,
    Nail,
    Dowel,
}

impl FastenerKind {
    pub fn name(self) -> &'static str {
        match self {
            FastenerKind::Screw => "screw",
            FastenerKind::Nail => "nail",
            FastenerKind::Dowel => "dowel",
        }
    }
}

/// A mechanical fastener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastenerData {
    pub kind: FastenerKind,
    pub diameter: f64,
    pub length: f64,
    /// Optional back-reference to the owning join.
    ///
    /// The join's fastener list is authoritative; when present this must
    /// name a join that lists the fastener.
    pub join: Option<NodeId>,
}

impl FastenerData {
    pub fn screw(diameter: f64, length: f64) -> Self {
        Self {
            kind: FastenerKind::Screw,
            diameter,
            length,
            join: None,
        }
    }

    pub fn owned_by(mut self, join: NodeId) -> Self {
        self.join = Some(join);
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================
