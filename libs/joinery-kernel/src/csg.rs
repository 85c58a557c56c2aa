//! # Boolean Operations (CSG)
//!
//! Constructive solid geometry on polygon soups using BSP trees, after the
//! csg.js algorithm by Evan Wallace:
//!
//! - Union: `a.clip_to(b); b.clip_to(a); b.invert(); b.clip_to(a); b.invert(); a.build(b)`
//! - Difference: `a.invert()`, then union with `b`, then `invert()` the result
//! - Intersection: `a.invert(); b.clip_to(a); b.invert(); a.clip_to(b);
//!   b.clip_to(a); a.build(b); a.invert()`
//!
//! Trees are built recursively; depth is bounded by the polygon count of
//! the inputs, which stays small for board-level parts.

use crate::solid::{Plane, Polygon, Solid, Split};

/// A node of a BSP tree.
#[derive(Debug, Clone, Default)]
struct BspNode {
    plane: Option<Plane>,
    polygons: Vec<Polygon>,
    front: Option<Box<BspNode>>,
    back: Option<Box<BspNode>>,
}

impl BspNode {
    fn new(polygons: Vec<Polygon>) -> Self {
        let mut node = Self::default();
        node.build(polygons);
        node
    }

    fn build(&mut self, polygons: Vec<Polygon>) {
        let Some(first) = polygons.first() else {
            return;
        };
        let plane = *self.plane.get_or_insert(*first.plane());

        let mut split = Split::default();
        for polygon in polygons {
            polygon.split(&plane, &mut split);
        }
        self.polygons.append(&mut split.coplanar_front);
        self.polygons.append(&mut split.coplanar_back);

        if !split.front.is_empty() {
            self.front.get_or_insert_with(Box::default).build(split.front);
        }
        if !split.back.is_empty() {
            self.back.get_or_insert_with(Box::default).build(split.back);
        }
    }

    /// Swaps solid and empty space.
    fn invert(&mut self) {
        for polygon in &mut self.polygons {
            polygon.flip();
        }
        self.plane = self.plane.map(|p| p.flip());
        if let Some(front) = &mut self.front {
            front.invert();
        }
        if let Some(back) = &mut self.back {
            back.invert();
        }
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Removes the parts of `polygons` inside this tree's solid.
    fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let Some(plane) = self.plane else {
            return polygons;
        };
        let mut split = Split::default();
        for polygon in polygons {
            polygon.split(&plane, &mut split);
        }
        let mut front = split.front;
        front.append(&mut split.coplanar_front);
        let mut back = split.back;
        back.append(&mut split.coplanar_back);

        let mut kept = match &self.front {
            Some(node) => node.clip_polygons(front),
            None => front,
        };
        if let Some(node) = &self.back {
            kept.extend(node.clip_polygons(back));
        }
        kept
    }

    /// Removes the parts of this tree's polygons inside `other`.
    fn clip_to(&mut self, other: &BspNode) {
        self.polygons = other.clip_polygons(std::mem::take(&mut self.polygons));
        if let Some(front) = &mut self.front {
            front.clip_to(other);
        }
        if let Some(back) = &mut self.back {
            back.clip_to(other);
        }
    }

    fn all_polygons(&self) -> Vec<Polygon> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect(&self, out: &mut Vec<Polygon>) {
        out.extend(self.polygons.iter().cloned());
        if let Some(front) = &self.front {
            front.collect(out);
        }
        if let Some(back) = &self.back {
            back.collect(out);
        }
    }
}

/// Everything inside `a` or `b`.
pub fn union(a: &Solid, b: &Solid) -> Solid {
    if a.is_empty() {
        return b.clone();
    }
    if b.is_empty() {
        return a.clone();
    }
    let mut a = BspNode::new(a.polygons().to_vec());
    let mut b = BspNode::new(b.polygons().to_vec());
    a.clip_to(&b);
    b.clip_to(&a);
    b.invert();
    b.clip_to(&a);
    b.invert();
    a.build(b.all_polygons());
    Solid::from_polygons(a.all_polygons())
}

/// Everything inside `a` but not inside `b`.
pub fn difference(a: &Solid, b: &Solid) -> Solid {
    if a.is_empty() || b.is_empty() {
        return a.clone();
    }
    let mut a = BspNode::new(a.polygons().to_vec());
    let mut b = BspNode::new(b.polygons().to_vec());
    a.invert();
    a.clip_to(&b);
    b.clip_to(&a);
    b.invert();
    b.clip_to(&a);
    b.invert();
    a.build(b.all_polygons());
    a.invert();
    Solid::from_polygons(a.all_polygons())
}

/// Everything inside both `a` and `b`.
pub fn intersection(a: &Solid, b: &Solid) -> Solid {
    if a.is_empty() || b.is_empty() {
        return Solid::default();
    }
    let mut a = BspNode::new(a.polygons().to_vec());
    let mut b = BspNode::new(b.polygons().to_vec());
    a.invert();
    b.clip_to(&a);
    b.invert();
    a.clip_to(&b);
    b.clip_to(&a);
    a.build(b.all_polygons());
    a.invert();
    Solid::from_polygons(a.all_polygons())
}

// =============================================================================
// TESTS
// =============================================================================
