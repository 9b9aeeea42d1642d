//! Physics module for the takeoff engine
//!
//! Custom rigid-body and planar collision math, built without an external
//! physics library.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, seconds for time, kilograms for mass. Forces are in
//! newtons, but torque is applied as `torque / mass` rather than through an
//! inertia tensor, so yaw tuning constants are game units.
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types re-exported from glam
//! - [`integrator`] - Rigid-body state and the Euler step
//! - [`guarded`] - Division helpers that never leak NaN or infinity
//! - [`collision`] - Planar footprints and segment intersection

pub mod collision;
pub mod guarded;
pub mod integrator;
pub mod types;

use thiserror::Error;

// Re-export commonly used types at the physics module level
pub use collision::{Segment2, footprint_corners, footprint_edges, segments_intersect, square_edges};
pub use guarded::{checked_div, guarded_div};
pub use integrator::{ForceSource, RigidBody, Wrench, step};
pub use types::{Mat4, Quat, Vec2, Vec3};

/// Contract violations detected by the physics core.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PhysicsError {
    /// Mass must be finite and strictly positive
    #[error("mass must be finite and > 0, got {0}")]
    NonPositiveMass(f32),
}
