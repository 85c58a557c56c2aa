//! # Primitive Solids
//!
//! Boxes and cylinders in their canonical placement:
//! - cuboid: corner at the origin, extending to `size`
//! - cylinder: axis along +Z, base circle centred on the origin

use crate::error::KernelError;
use crate::solid::{Polygon, Solid};
use config::constants::MIN_CYLINDER_SEGMENTS;
use glam::DVec3;
use std::f64::consts::PI;

/// Creates a rectangular box spanning `[0, size]`.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use joinery_kernel::primitives::cuboid;
///
/// let board = cuboid(DVec3::new(600.0, 250.0, 19.0)).unwrap();
/// assert_eq!(board.polygons().len(), 6);
/// ```
pub fn cuboid(size: DVec3) -> Result<Solid, KernelError> {
    if !(size.x > 0.0 && size.y > 0.0 && size.z > 0.0) {
        return Err(KernelError::degenerate(format!("cuboid size must be positive: {:?}", size)));
    }
    let corner = |x: bool, y: bool, z: bool| {
        DVec3::new(
            if x { size.x } else { 0.0 },
            if y { size.y } else { 0.0 },
            if z { size.z } else { 0.0 },
        )
    };
    let v0 = corner(false, false, false);
    let v1 = corner(true, false, false);
    let v2 = corner(true, true, false);
    let v3 = corner(false, true, false);
    let v4 = corner(false, false, true);
    let v5 = corner(true, false, true);
    let v6 = corner(true, true, true);
    let v7 = corner(false, true, true);

    // Counter-clockwise seen from outside.
    let faces = [
        [v0, v3, v2, v1], // bottom
        [v4, v5, v6, v7], // top
        [v0, v1, v5, v4], // front
        [v2, v3, v7, v6], // back
        [v3, v0, v4, v7], // left
        [v1, v2, v6, v5], // right
    ];
    faces
        .into_iter()
        .map(|face| {
            Polygon::new(face.to_vec()).ok_or_else(|| {
                KernelError::degenerate(format!("cuboid face collapsed: {:?}", size))
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Solid::from_polygons)
}

/// Creates a cylinder of `height` along +Z with `segments` sides.
///
/// ```rust
/// use joinery_kernel::primitives::cylinder;
///
/// let dowel = cylinder(40.0, 4.0, 16).unwrap();
/// assert_eq!(dowel.polygons().len(), 16 + 2);
/// assert!(cylinder(40.0, 4.0, 2).is_err());
/// ```
pub fn cylinder(height: f64, radius: f64, segments: u32) -> Result<Solid, KernelError> {
    if !(height > 0.0) {
        return Err(KernelError::degenerate(format!(
            "cylinder height must be positive: {}",
            height
        )));
    }
    if !(radius > 0.0) {
        return Err(KernelError::degenerate(format!(
            "cylinder radius must be positive: {}",
            radius
        )));
    }
    if segments < MIN_CYLINDER_SEGMENTS {
        return Err(KernelError::degenerate(format!(
            "cylinder needs at least {} segments: {}",
            MIN_CYLINDER_SEGMENTS, segments
        )));
    }

    let ring: Vec<DVec3> = (0..segments)
        .map(|j| {
            let theta = 2.0 * PI * j as f64 / segments as f64;
            DVec3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
        })
        .collect();
    let lift = DVec3::new(0.0, 0.0, height);
    let n = ring.len();

    let mut faces: Vec<Vec<DVec3>> = Vec::with_capacity(n + 2);
    faces.push(ring.iter().rev().copied().collect());
    faces.push(ring.iter().map(|v| *v + lift).collect());
    for j in 0..n {
        let a = ring[j];
        let b = ring[(j + 1) % n];
        faces.push(vec![a, b, b + lift, a + lift]);
    }

    faces
        .into_iter()
        .map(|face| {
            Polygon::new(face).ok_or_else(|| {
                KernelError::degenerate(format!(
                    "cylinder r={} h={} has a collapsed face",
                    radius, height
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Solid::from_polygons)
}
