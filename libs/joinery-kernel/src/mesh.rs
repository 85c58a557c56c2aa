//! # Render Mesh
//!
//! Flat triangle buffers handed to the presentation layer, one per part.

use crate::error::KernelError;
use serde::{Deserialize, Serialize};

/// A triangle mesh in render-ready form.
///
/// Positions and normals are flattened `[x, y, z, x, y, z, ...]` arrays of
/// equal length; `indices` holds three entries per triangle.
///
/// # Example
///
/// ```rust
/// use joinery_kernel::Mesh;
///
/// let mut mesh = Mesh::new("shelf");
/// mesh.push_triangle(
///     [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
///     [0.0, 0.0, 1.0],
/// );
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
    /// Name of the part this mesh renders.
    pub part_name: String,
}

impl Mesh {
    pub fn new(part_name: impl Into<String>) -> Self {
        Self {
            part_name: part_name.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends one unshared triangle with a flat normal.
    pub fn push_triangle(&mut self, corners: [[f32; 3]; 3], normal: [f32; 3]) {
        let base = self.vertex_count() as u32;
        for corner in corners {
            self.vertices.extend_from_slice(&corner);
            self.normals.extend_from_slice(&normal);
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Checks the buffer invariants.
    ///
    /// - `vertices` holds whole positions and matches `normals` in length
    /// - `indices` holds whole triangles, each index in range
    pub fn validate(&self) -> Result<(), KernelError> {
        if self.vertices.len() % 3 != 0 {
            return Err(KernelError::invalid_mesh(
                &self.part_name,
                format!("vertex buffer length {} is not a multiple of 3", self.vertices.len()),
            ));
        }
        if self.normals.len() != self.vertices.len() {
            return Err(KernelError::invalid_mesh(
                &self.part_name,
                format!(
                    "normal buffer length {} differs from vertex buffer length {}",
                    self.normals.len(),
                    self.vertices.len()
                ),
            ));
        }
        if self.indices.len() % 3 != 0 {
            return Err(KernelError::invalid_mesh(
                &self.part_name,
                format!("index buffer length {} is not a multiple of 3", self.indices.len()),
            ));
        }
        let count = self.vertex_count();
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(KernelError::invalid_mesh(
                &self.part_name,
                format!("index {} out of range for {} vertices", bad, count),
            ));
        }
        Ok(())
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<([f32; 3], [f32; 3])> {
        let mut points = self.vertices.chunks_exact(3);
        let first = points.next()?;
        let mut min = [first[0], first[1], first[2]];
        let mut max = min;
        for p in points {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new("t");
        mesh.push_triangle([[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 3.0, -1.0]], [0.0, 0.0, 1.0]);
        mesh
    }

    #[test]
    fn test_new_mesh_is_empty() {
        let mesh = Mesh::new("empty");
        assert!(mesh.is_empty());
        assert_eq!(mesh.part_name, "empty");
        assert!(mesh.bounding_box().is_none());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_push_triangle_offsets_indices() {
        let mut mesh = triangle();
        mesh.push_triangle([[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], [0.0, 0.0, 1.0]);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.normals.len(), mesh.vertices.len());
    }

    #[test]
    fn test_bounding_box() {
        let (min, max) = triangle().bounding_box().unwrap();
        assert_eq!(min, [0.0, 0.0, -1.0]);
        assert_eq!(max, [2.0, 3.0, 0.0]);
    }

    #[test]
    fn test_validate_normal_length() {
        let mut mesh = triangle();
        mesh.normals.pop();
        assert!(matches!(mesh.validate(), Err(KernelError::InvalidMesh { .. })));
    }

    #[test]
    fn test_validate_index_range() {
        let mut mesh = triangle();
        mesh.indices[2] = 7;
        let err = mesh.validate().unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_validate_partial_triangle() {
        let mut mesh = triangle();
        mesh.indices.push(0);
        assert!(mesh.validate().is_err());
    }
}
