//! # Joinery Kernel
//!
//! Geometry capability for the tessellator.
//!
//! ## Architecture
//!
//! ```text
//! Kernel trait ─┬─ cuboid / cylinder
//!               ├─ union / difference / intersection
//!               ├─ translate / rotate
//!               └─ to_mesh → Mesh { vertices, normals, indices, part_name }
//! ```
//!
//! [`MeshKernel`] is the in-tree implementation: solids are closed polygon
//! soups ([`Solid`]), booleans run on BSP trees ([`csg`]).

pub mod csg;
pub mod error;
pub mod kernel;
pub mod mesh;
pub mod primitives;
pub mod solid;

pub use error::KernelError;
pub use kernel::{Kernel, MeshKernel};
pub use mesh::Mesh;
pub use solid::Solid;
