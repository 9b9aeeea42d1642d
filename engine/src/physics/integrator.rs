//! Rigid-body integration
//!
//! Generic translational/rotational state plus the per-step Euler update.
//! Vehicle behaviour is injected through [`ForceSource`] rather than by
//! specialising the body type.
//!
//! # Example
//!
//! ```ignore
//! use takeoff_engine::physics::{RigidBody, Wrench, Vec3};
//!
//! let mut body = RigidBody::new(5000.0, Vec3::new(0.0, 2.0, 0.0))?;
//! body.advance(Wrench::force(Vec3::new(0.0, 1e5, 0.0)), 1.0 / 60.0);
//! let model = body.transform();
//! ```

use glam::{Mat4, Quat, Vec3};

use super::PhysicsError;

/// Force and torque acting on a body for one step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Wrench {
    /// Net force in world space (newtons)
    pub force: Vec3,
    /// Net torque in world space
    pub torque: Vec3,
}

impl Wrench {
    pub const ZERO: Self = Self {
        force: Vec3::ZERO,
        torque: Vec3::ZERO,
    };

    pub fn new(force: Vec3, torque: Vec3) -> Self {
        Self { force, torque }
    }

    /// A pure force with no torque.
    pub fn force(force: Vec3) -> Self {
        Self {
            force,
            torque: Vec3::ZERO,
        }
    }
}

/// Computes the wrench acting on a body for the coming step.
///
/// Implementors may keep their own state (fuel, controls) and mutate it here.
pub trait ForceSource {
    fn wrench(&mut self, body: &RigidBody, dt: f32) -> Wrench;
}

/// Mass, pose and velocities of a single rigid body.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    mass: f32,
    /// World-space position (meters)
    pub position: Vec3,
    /// World-space velocity (meters/second)
    pub velocity: Vec3,
    /// Orientation; always a unit quaternion
    pub orientation: Quat,
    /// Angular velocity (radians/second); axis is its direction
    pub angular_velocity: Vec3,
    /// Force applied during the last step
    pub force: Vec3,
    /// Torque applied during the last step
    pub torque: Vec3,
}

impl RigidBody {
    /// Creates a body at rest at `position` with identity orientation.
    ///
    /// Fails when `mass` is not finite and strictly positive.
    pub fn new(mass: f32, position: Vec3) -> Result<Self, PhysicsError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::NonPositiveMass(mass));
        }
        Ok(Self {
            mass,
            position,
            velocity: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            angular_velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
        })
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Integrates one step of length `dt` under `wrench`.
    ///
    /// Order of operations:
    /// - position += velocity * dt (velocity from the start of the step)
    /// - velocity += force / mass * dt
    /// - orientation rotates by |w| * dt about w, when w is non-zero
    /// - angular velocity += torque / mass * dt
    pub fn advance(&mut self, wrench: Wrench, dt: f32) {
        debug_assert!(dt.is_finite() && dt > 0.0, "dt must be > 0, got {dt}");

        self.force = wrench.force;
        self.torque = wrench.torque;

        self.position += self.velocity * dt;
        self.velocity += self.force * (dt / self.mass);

        let w_norm = self.angular_velocity.length();
        if w_norm > 0.0 {
            let axis = self.angular_velocity / w_norm;
            self.orientation =
                (self.orientation * Quat::from_axis_angle(axis, w_norm * dt)).normalize();
        }
        self.angular_velocity += self.torque * (dt / self.mass);
    }

    /// Translation composed with orientation, for rendering.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// Puts the body back at `position` with no motion and identity orientation.
    pub fn reset_to(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.orientation = Quat::IDENTITY;
        self.angular_velocity = Vec3::ZERO;
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }
}

/// Asks `source` for this step's wrench and advances `body` with it.
pub fn step<F: ForceSource>(body: &mut RigidBody, source: &mut F, dt: f32) -> Wrench {
    let wrench = source.wrench(body, dt);
    body.advance(wrench, dt);
    wrench
}
