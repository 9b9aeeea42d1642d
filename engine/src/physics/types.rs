//! Physics type re-exports from glam
//!
//! Vectors, the yaw quaternion and the render transform all come from glam so
//! the simulation and any renderer agree on layout.

pub use glam::{Mat4, Quat, Vec2, Vec3};

/// Drops the vertical component, mapping world (x, y, z) onto the ground plane (x, z).
#[inline]
pub fn planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_drops_y() {
        assert_eq!(planar(Vec3::new(1.0, 50.0, -2.0)), Vec2::new(1.0, -2.0));
    }
}
