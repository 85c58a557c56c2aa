//! # Solids
//!
//! A solid is a closed soup of convex, planar polygons with outward-facing
//! counter-clockwise winding. This is the representation the BSP booleans
//! operate on directly, so no conversion happens between operations.

use config::constants::EPSILON;
use glam::{DMat3, DVec3};

// =============================================================================
// PLANE
// =============================================================================

/// Where a point or polygon lies relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Coplanar,
    Front,
    Back,
    Spanning,
}

/// Oriented plane `normal · p = w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: DVec3,
    pub w: f64,
}

impl Plane {
    /// Plane through three points, counter-clockwise seen from the front.
    ///
    /// `None` for collinear points.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let normal = (b - a).cross(c - a);
        if normal.length() < EPSILON {
            return None;
        }
        let normal = normal.normalize();
        Some(Self {
            normal,
            w: normal.dot(a),
        })
    }

    pub fn flip(&self) -> Self {
        Self {
            normal: -self.normal,
            w: -self.w,
        }
    }

    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    pub fn classify_point(&self, point: DVec3) -> Classification {
        let distance = self.signed_distance(point);
        if distance > EPSILON {
            Classification::Front
        } else if distance < -EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}

// =============================================================================
// POLYGON
// =============================================================================

/// Pieces of polygons after splitting by a plane.
#[derive(Debug, Default)]
pub struct Split {
    pub coplanar_front: Vec<Polygon>,
    pub coplanar_back: Vec<Polygon>,
    pub front: Vec<Polygon>,
    pub back: Vec<Polygon>,
}

/// A convex planar polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<DVec3>,
    plane: Plane,
}

impl Polygon {
    /// Polygon through `vertices`; the plane comes from the first three.
    pub fn new(vertices: Vec<DVec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        Some(Self { vertices, plane })
    }

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane = self.plane.flip();
    }

    pub fn classify(&self, plane: &Plane) -> Classification {
        let mut front = false;
        let mut back = false;
        for v in &self.vertices {
            match plane.classify_point(*v) {
                Classification::Front => front = true,
                Classification::Back => back = true,
                _ => {}
            }
        }
        match (front, back) {
            (true, true) => Classification::Spanning,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (false, false) => Classification::Coplanar,
        }
    }

    /// Sorts this polygon into `out`, cutting it in two if it spans `plane`.
    ///
    /// Pieces keep the plane of the polygon they were cut from.
    pub fn split(self, plane: &Plane, out: &mut Split) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal.dot(plane.normal) > 0.0 {
                    out.coplanar_front.push(self);
                } else {
                    out.coplanar_back.push(self);
                }
            }
            Classification::Front => out.front.push(self),
            Classification::Back => out.back.push(self),
            Classification::Spanning => {
                let n = self.vertices.len();
                let mut front = Vec::with_capacity(n + 1);
                let mut back = Vec::with_capacity(n + 1);
                for i in 0..n {
                    let vi = self.vertices[i];
                    let vj = self.vertices[(i + 1) % n];
                    let ti = plane.classify_point(vi);
                    let tj = plane.classify_point(vj);
                    if ti != Classification::Back {
                        front.push(vi);
                    }
                    if ti != Classification::Front {
                        back.push(vi);
                    }
                    let crosses = matches!(
                        (ti, tj),
                        (Classification::Front, Classification::Back)
                            | (Classification::Back, Classification::Front)
                    );
                    if crosses {
                        let t = -plane.signed_distance(vi) / plane.normal.dot(vj - vi);
                        let cut = vi.lerp(vj, t);
                        front.push(cut);
                        back.push(cut);
                    }
                }
                if front.len() >= 3 {
                    out.front.push(Polygon {
                        vertices: front,
                        plane: self.plane,
                    });
                }
                if back.len() >= 3 {
                    out.back.push(Polygon {
                        vertices: back,
                        plane: self.plane,
                    });
                }
            }
        }
    }

    /// Applies a rigid motion (rotation then translation).
    fn moved(&self, rotation: &DMat3, offset: DVec3) -> Self {
        let vertices: Vec<DVec3> = self.vertices.iter().map(|v| *rotation * *v + offset).collect();
        let normal = (*rotation * self.plane.normal).normalize();
        let w = normal.dot(vertices[0]);
        Self {
            vertices,
            plane: Plane { normal, w },
        }
    }
}

// =============================================================================
// SOLID
// =============================================================================

/// Closed polygon soup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    polygons: Vec<Polygon>,
}

impl Solid {
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` when empty.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let mut points = self.polygons.iter().flat_map(|p| p.vertices.iter().copied());
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    pub fn translated(&self, offset: DVec3) -> Self {
        self.moved(&DMat3::IDENTITY, offset)
    }

    /// Rotates about the origin by Euler angles in degrees, X first, then
    /// Y, then Z.
    pub fn rotated(&self, degrees: DVec3) -> Self {
        let r = degrees * (std::f64::consts::PI / 180.0);
        let rotation =
            DMat3::from_rotation_z(r.z) * DMat3::from_rotation_y(r.y) * DMat3::from_rotation_x(r.x);
        self.moved(&rotation, DVec3::ZERO)
    }

    fn moved(&self, rotation: &DMat3, offset: DVec3) -> Self {
        Self {
            polygons: self.polygons.iter().map(|p| p.moved(rotation, offset)).collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
