//! # Configuration Constants
//!
//! Centralized constants for the joinery pipeline.
//!
//! ## Categories
//!
//! - **Defaults**: Values every new design graph is seeded with
//! - **Evaluation**: Controller timing
//! - **Tessellation**: Segment counts and recursion limits
//! - **Precision**: Floating-point comparison tolerances

use std::time::Duration;

// =============================================================================
// GRAPH DEFAULTS
// =============================================================================

/// Default clearance between mating faces of a joint, in millimetres.
///
/// Applied when a join does not specify its own clearance.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_CLEARANCE;
///
/// let requested: Option<f64> = None;
/// let clearance = requested.unwrap_or(DEFAULT_CLEARANCE);
/// assert_eq!(clearance, 0.2);
/// ```
pub const DEFAULT_CLEARANCE: f64 = 0.2;

/// Default length unit of a design.
pub const DEFAULT_UNITS: &str = "mm";

/// Default wood species recorded in a graph's material defaults.
///
/// Material is advisory: it never changes geometry, only the material pass.
pub const DEFAULT_SPECIES: &str = "pine";

/// Default lumber grade recorded in a graph's material defaults.
pub const DEFAULT_GRADE: &str = "select";

/// Domain prefix hashed in front of every construction path.
///
/// Keeps node identifiers from colliding with any other BLAKE3 digest of
/// the same string.
///
/// # Example
///
/// ```rust
/// use config::constants::NODE_ID_DOMAIN;
///
/// assert!(NODE_ID_DOMAIN.ends_with(b":"));
/// ```
pub const NODE_ID_DOMAIN: &[u8] = b"joinery-node:";

/// Number of hex characters in the short form of a node id.
///
/// Used to tag meshes produced from unnamed parts.
pub const SHORT_ID_HEX_LEN: usize = 8;

// =============================================================================
// EVALUATION CONSTANTS
// =============================================================================

/// Hard wall-clock limit for one evaluation, in milliseconds.
///
/// A worker still running when this elapses is abandoned, not stopped.
///
/// # Example
///
/// ```rust
/// use config::constants::evaluation_timeout;
///
/// assert_eq!(evaluation_timeout().as_secs(), 5);
/// ```
pub const EVALUATION_TIMEOUT_MS: u64 = 5_000;

/// [`EVALUATION_TIMEOUT_MS`] as a [`Duration`].
#[inline]
pub fn evaluation_timeout() -> Duration {
    Duration::from_millis(EVALUATION_TIMEOUT_MS)
}

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Default number of segments around a round (dowel-like) part.
pub const DEFAULT_CYLINDER_SEGMENTS: u32 = 32;

/// Minimum number of segments a round part may declare.
///
/// Fewer than three segments cannot enclose a volume.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_CYLINDER_SEGMENTS, MIN_CYLINDER_SEGMENTS};
///
/// assert!(DEFAULT_CYLINDER_SEGMENTS >= MIN_CYLINDER_SEGMENTS);
/// ```
pub const MIN_CYLINDER_SEGMENTS: u32 = 3;

/// Maximum nesting depth the tessellator will follow.
///
/// Validated graphs are acyclic, so hitting this means the graph was
/// tessellated without being validated first.
pub const MAX_TESSELLATION_DEPTH: usize = 1000;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Plane classification tolerance used by the reference mesh kernel.
///
/// Points closer than this to a splitting plane count as coplanar.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn on_plane(distance: f64) -> bool {
///     distance.abs() < EPSILON
/// }
///
/// assert!(on_plane(1e-7));
/// ```
pub const EPSILON: f64 = 1e-5;
