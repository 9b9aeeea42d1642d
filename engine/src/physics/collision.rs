//! Planar collision primitives
//!
//! Footprints are squares projected onto the ground plane (x, z). Contact
//! between two footprints is decided by intersecting their boundary edges,
//! each stored as an origin plus a direction so that the edge covers
//! `origin + t * direction` for `t` in `[0, 1]`.
//!
//! # Segment Intersection
//!
//! The test solves the 2x2 system
//!
//! ```text
//! o1 + t * d1 = o2 + s * d2
//! ```
//!
//! by Gaussian elimination, without tolerances. Coincident origins short-circuit
//! to "intersecting", which is what makes two identical collinear edges count
//! as touching. Every other degenerate case (zero pivot, parallel edges) yields
//! a non-finite parameter and is rejected.
//!
//! # Example
//!
//! ```ignore
//! use takeoff_engine::physics::collision::{Segment2, segments_intersect};
//! use glam::Vec2;
//!
//! let a = Segment2::between(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
//! let b = Segment2::between(Vec2::new(0.0, -1.0), Vec2::new(0.0, 1.0));
//! assert!(segments_intersect(&a, &b));
//! ```

use glam::{Mat4, Vec2, Vec3};

use super::guarded::checked_div;

/// A planar segment covering `origin + t * direction` for `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    /// Start point on the ground plane (x, z)
    pub origin: Vec2,
    /// Offset from start to end point
    pub direction: Vec2,
}

impl Segment2 {
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self { origin, direction }
    }

    /// Segment running from `start` to `end`.
    pub fn between(start: Vec2, end: Vec2) -> Self {
        Self {
            origin: start,
            direction: end - start,
        }
    }

    pub fn end(&self) -> Vec2 {
        self.origin + self.direction
    }
}

/// Returns true when the two segments share a point.
///
/// Symmetric in its arguments for segments in general position.
pub fn segments_intersect(a: &Segment2, b: &Segment2) -> bool {
    if a.origin == b.origin {
        return true;
    }

    // Rows: [d1.x, -d2.x | o2.x - o1.x] and [d1.z, -d2.z | o2.z - o1.z]
    let rhs = b.origin - a.origin;
    let mut r1 = [a.direction.x, -b.direction.x, rhs.x];
    let mut r2 = [a.direction.y, -b.direction.y, rhs.y];

    if r1[0] == 0.0 && r2[0] == 0.0 {
        return false;
    }
    if r1[0] == 0.0 {
        std::mem::swap(&mut r1, &mut r2);
    }

    let factor = r2[0] / r1[0];
    let reduced_s = r2[1] - factor * r1[1];
    let reduced_rhs = r2[2] - factor * r1[2];

    let Some(s) = checked_div(reduced_rhs, reduced_s) else {
        return false;
    };
    let Some(t) = checked_div(r1[2] - r1[1] * s, r1[0]) else {
        return false;
    };

    in_unit_interval(t) && in_unit_interval(s)
}

#[inline]
fn in_unit_interval(v: f32) -> bool {
    (0.0..=1.0).contains(&v)
}

/// World-space ground-plane corners of a square of `half_extent` centered on a body.
///
/// The corners are taken in the body's local frame, pushed through `transform`
/// and flattened to (x, z). Order is counter-clockwise seen from below, which
/// keeps consecutive corners adjacent.
pub fn footprint_corners(transform: &Mat4, half_extent: f32) -> [Vec2; 4] {
    let local = [
        Vec3::new(-half_extent, 0.0, -half_extent),
        Vec3::new(half_extent, 0.0, -half_extent),
        Vec3::new(half_extent, 0.0, half_extent),
        Vec3::new(-half_extent, 0.0, half_extent),
    ];
    local.map(|corner| {
        let world = transform.transform_point3(corner);
        Vec2::new(world.x, world.z)
    })
}

/// The four boundary edges of a closed quad, each from one corner to the next.
pub fn footprint_edges(corners: &[Vec2; 4]) -> [Segment2; 4] {
    std::array::from_fn(|i| Segment2::between(corners[i], corners[(i + 1) % 4]))
}

/// Boundary edges of an axis-aligned square centered at `center` on the ground plane.
pub fn square_edges(center: Vec2, half_extent: f32) -> [Segment2; 4] {
    let corners = [
        center + Vec2::new(-half_extent, -half_extent),
        center + Vec2::new(half_extent, -half_extent),
        center + Vec2::new(half_extent, half_extent),
        center + Vec2::new(-half_extent, half_extent),
    ];
    footprint_edges(&corners)
}

/// True when any edge of `a` intersects any edge of `b`.
pub fn edges_intersect(a: &[Segment2], b: &[Segment2]) -> bool {
    a.iter()
        .any(|ea| b.iter().any(|eb| segments_intersect(eb, ea)))
}
