//! # Node Identity
//!
//! Node identifiers derived from construction paths.
//!
//! A node's id is the BLAKE3 digest of a domain prefix followed by the
//! *construction path* of the builder call that produced it: a string unique
//! to the syntactic position in the source program. Identity therefore
//! survives edits that change a node's content but not its position, and two
//! evaluations of the same program assign the same ids.

use config::constants::{NODE_ID_DOMAIN, SHORT_ID_HEX_LEN};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-width (256-bit) node identifier.
///
/// The all-zero value ([`NodeId::ABSENT`]) is reserved for "no reference".
///
/// # Example
///
/// ```rust
/// use joinery_graph::NodeId;
///
/// let a = NodeId::from_path("main/shelf");
/// let b = NodeId::from_path("main/shelf");
/// assert_eq!(a, b);
/// assert_ne!(a, NodeId::from_path("main/side"));
/// assert!(!a.is_absent());
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId([u8; 32]);

impl NodeId {
    /// The distinguished "absent reference" value.
    pub const ABSENT: NodeId = NodeId([0; 32]);

    /// Derives the id for a construction path.
    pub fn from_path(path: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(NODE_ID_DOMAIN);
        hasher.update(path.as_bytes());
        NodeId(hasher.finalize().into())
    }

    /// Returns the canonical byte representation of this id.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// True for [`NodeId::ABSENT`].
    #[inline]
    pub fn is_absent(&self) -> bool {
        self.0 == [0; 32]
    }

    /// Full lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex prefix, used to label unnamed parts.
    ///
    /// ```rust
    /// use joinery_graph::NodeId;
    ///
    /// let id = NodeId::from_path("anything");
    /// assert_eq!(id.short().len(), 8);
    /// assert!(id.to_hex().starts_with(&id.short()));
    /// ```
    pub fn short(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(SHORT_ID_HEX_LEN);
        hex
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::ABSENT
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.short())
    }
}

// =============================================================================
// TESTS
// =============================================================================
