//! # Kernel Capability
//!
//! The geometry operations a design needs from a backend. The tessellator
//! is written against this trait only.

use crate::csg;
use crate::error::KernelError;
use crate::mesh::Mesh;
use crate::primitives;
use crate::solid::Solid;
use glam::DVec3;

/// Abstract geometry backend.
///
/// Solids are values: every operation returns a new solid and leaves its
/// inputs untouched.
pub trait Kernel {
    type Solid: Clone;

    /// Box spanning `[0, size]`.
    fn cuboid(&self, size: DVec3) -> Result<Self::Solid, KernelError>;

    /// Cylinder along +Z with its base centred on the origin.
    fn cylinder(&self, height: f64, radius: f64, segments: u32) -> Result<Self::Solid, KernelError>;

    fn union(&self, a: &Self::Solid, b: &Self::Solid) -> Self::Solid;

    fn difference(&self, a: &Self::Solid, b: &Self::Solid) -> Self::Solid;

    fn intersection(&self, a: &Self::Solid, b: &Self::Solid) -> Self::Solid;

    fn translate(&self, solid: &Self::Solid, offset: DVec3) -> Self::Solid;

    /// Rotation about the origin by Euler angles in degrees, X then Y then Z.
    fn rotate(&self, solid: &Self::Solid, degrees: DVec3) -> Self::Solid;

    /// Extracts a render mesh tagged with `part_name`.
    fn to_mesh(&self, solid: &Self::Solid, part_name: &str) -> Result<Mesh, KernelError>;
}

// =============================================================================
// REFERENCE KERNEL
// =============================================================================

/// Polygon-soup kernel with BSP booleans.
///
/// Meshes are exported unwelded: every triangle owns its three vertices and
/// carries the flat normal of the polygon it came from.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use joinery_kernel::{Kernel, MeshKernel};
///
/// let kernel = MeshKernel::new();
/// let board = kernel.cuboid(DVec3::new(600.0, 250.0, 19.0)).unwrap();
/// let raised = kernel.translate(&board, DVec3::new(0.0, 0.0, 100.0));
/// let mesh = kernel.to_mesh(&raised, "shelf").unwrap();
///
/// assert_eq!(mesh.part_name, "shelf");
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshKernel;

impl MeshKernel {
    pub fn new() -> Self {
        Self
    }
}

impl Kernel for MeshKernel {
    type Solid = Solid;

    fn cuboid(&self, size: DVec3) -> Result<Solid, KernelError> {
        primitives::cuboid(size)
    }

    fn cylinder(&self, height: f64, radius: f64, segments: u32) -> Result<Solid, KernelError> {
        primitives::cylinder(height, radius, segments)
    }

    fn union(&self, a: &Solid, b: &Solid) -> Solid {
        csg::union(a, b)
    }

    fn difference(&self, a: &Solid, b: &Solid) -> Solid {
        csg::difference(a, b)
    }

    fn intersection(&self, a: &Solid, b: &Solid) -> Solid {
        csg::intersection(a, b)
    }

    fn translate(&self, solid: &Solid, offset: DVec3) -> Solid {
        solid.translated(offset)
    }

    fn rotate(&self, solid: &Solid, degrees: DVec3) -> Solid {
        solid.rotated(degrees)
    }

    fn to_mesh(&self, solid: &Solid, part_name: &str) -> Result<Mesh, KernelError> {
        // Fan triangulation of each convex polygon.
        let triangles: usize = solid.polygons().iter().map(|p| p.vertices().len() - 2).sum();
        let vertex_count = triangles * 3;
        if vertex_count > u32::MAX as usize {
            return Err(KernelError::TooManyVertices {
                count: vertex_count,
                max: u32::MAX as usize,
            });
        }

        let mut mesh = Mesh::new(part_name);
        mesh.vertices.reserve(vertex_count * 3);
        mesh.normals.reserve(vertex_count * 3);
        mesh.indices.reserve(vertex_count);

        for polygon in solid.polygons() {
            let normal = polygon.plane().normal.as_vec3().to_array();
            let points = polygon.vertices();
            let apex = points[0].as_vec3().to_array();
            for pair in points[1..].windows(2) {
                mesh.push_triangle(
                    [apex, pair[0].as_vec3().to_array(), pair[1].as_vec3().to_array()],
                    normal,
                );
            }
        }

        mesh.validate()?;
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cuboid_mesh() {
        let kernel = MeshKernel::new();
        let solid = kernel.cuboid(DVec3::new(10.0, 20.0, 30.0)).unwrap();
        let mesh = kernel.to_mesh(&solid, "block").unwrap();
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertex_count(), 36);
        assert_eq!(mesh.vertices.len(), mesh.normals.len());
        assert_eq!(mesh.indices.len() % 3, 0);

        let (min, max) = mesh.bounding_box().unwrap();
        assert_eq!(min, [0.0, 0.0, 0.0]);
        assert_eq!(max, [10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_cylinder_mesh_triangles() {
        let kernel = MeshKernel::new();
        let solid = kernel.cylinder(20.0, 4.0, 8).unwrap();
        let mesh = kernel.to_mesh(&solid, "dowel").unwrap();
        // Two caps of 6 triangles and 8 side quads.
        assert_eq!(mesh.triangle_count(), 2 * 6 + 8 * 2);
    }

    #[test]
    fn test_normals_are_unit_length() {
        let kernel = MeshKernel::new();
        let solid = kernel.rotate(
            &kernel.cuboid(DVec3::splat(5.0)).unwrap(),
            DVec3::new(30.0, 45.0, 60.0),
        );
        let mesh = kernel.to_mesh(&solid, "tilted").unwrap();
        for n in mesh.normals.chunks_exact(3) {
            let length = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert_relative_eq!(length, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_rotation_order_x_then_z() {
        let kernel = MeshKernel::new();
        // A rod along +Z tipped 90° about X points along -Y, then 90° about Z
        // points along +X.
        let rod = kernel.cuboid(DVec3::new(1.0, 1.0, 10.0)).unwrap();
        let turned = kernel.rotate(&rod, DVec3::new(90.0, 0.0, 90.0));
        let (min, max) = turned.bounding_box().unwrap();
        assert_relative_eq!(max.x - min.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(min.x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_solid_gives_empty_mesh() {
        let kernel = MeshKernel::new();
        let mesh = kernel.to_mesh(&Solid::default(), "nothing").unwrap();
        assert!(mesh.is_empty());
    }
}
