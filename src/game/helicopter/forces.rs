//! Helicopter force model
//!
//! Turns the control state into a force and a yaw torque each step:
//!
//! - gravity `(0, -g * m, 0)`
//! - main rotor lift `clamp(P / max(|v_y|, floor), 0, lift_max)`, pointed along
//!   the body's up axis after thrust vectoring by the tilt angles
//! - quadratic drag `-c * |v| * v`
//! - tail rotor yaw drive `clamp(P_tail / max(|w_y|, floor), ±yaw_max)`
//! - quadratic yaw drag `-sign(w_y) * k * c * w_y²`
//!
//! Lift burns fuel above the ground-effect altitude; an empty tank cuts both
//! rotors before any force is computed.

use glam::{Quat, Vec3};

use crate::game::config::FlightConfig;
use crate::physics::{ForceSource, RigidBody, Wrench, guarded_div};

use super::controls::{ControlLimits, ControlState};

/// Force/torque model and fuel accounting for one helicopter.
#[derive(Debug, Clone)]
pub struct ForceModel {
    controls: ControlState,
    gravity: f32,
    air_resistance: f32,
    lift_max: f32,
    lift_velocity_floor: f32,
    yaw_torque_max: f32,
    yaw_rate_floor: f32,
    yaw_drag_factor: f32,
    ground_effect_altitude: f32,
    consumption_rate: f32,
    /// Lift magnitude computed in the last step
    last_lift: f32,
}

impl ForceModel {
    pub fn new(config: &FlightConfig) -> Self {
        Self {
            controls: ControlState::new(ControlLimits::from_config(config), config.fuel.initial),
            gravity: config.aero.gravity,
            air_resistance: config.aero.air_resistance,
            lift_max: config.rotor.lift_max,
            lift_velocity_floor: config.rotor.lift_velocity_floor,
            yaw_torque_max: config.rotor.yaw_torque_max,
            yaw_rate_floor: config.rotor.yaw_rate_floor,
            yaw_drag_factor: config.rotor.yaw_drag_factor,
            ground_effect_altitude: config.fuel.ground_effect_altitude,
            consumption_rate: config.fuel.consumption_rate,
            last_lift: 0.0,
        }
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ControlState {
        &mut self.controls
    }

    pub fn last_lift(&self) -> f32 {
        self.last_lift
    }

    /// Body-frame thrust rotation: forward/back about X, then left/right about Z.
    pub fn tilt_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.controls.tilt_forward_back().to_radians())
            * Quat::from_rotation_z(self.controls.tilt_left_right().to_radians())
    }

    pub fn gravity_force(&self, mass: f32) -> Vec3 {
        Vec3::new(0.0, -self.gravity * mass, 0.0)
    }

    /// Lift magnitude at the given vertical speed with the current main rotor power.
    pub fn lift_magnitude(&self, vertical_velocity: f32) -> f32 {
        let denominator = vertical_velocity.abs().max(self.lift_velocity_floor);
        guarded_div(self.controls.main_rotor_power(), denominator).clamp(0.0, self.lift_max)
    }

    /// Quadratic drag, always opposing `velocity`.
    pub fn drag_force(&self, velocity: Vec3) -> Vec3 {
        -self.air_resistance * velocity.length() * velocity
    }

    /// Tail rotor torque about the vertical axis at the given yaw rate.
    pub fn yaw_drive(&self, yaw_rate: f32) -> f32 {
        // Floored rather than a plain `|w_y|` divide: from rest the drive is the
        // clamped maximum instead of the zero a bare guarded divide gives at w_y = 0.
        // A floor of 0 restores the zero.
        let denominator = yaw_rate.abs().max(self.yaw_rate_floor);
        guarded_div(self.controls.tail_rotor_power(), denominator)
            .clamp(-self.yaw_torque_max, self.yaw_torque_max)
    }

    /// Aerodynamic torque resisting yaw.
    pub fn yaw_drag(&self, yaw_rate: f32) -> f32 {
        -yaw_rate.signum() * self.yaw_drag_factor * self.air_resistance * yaw_rate * yaw_rate
    }

    /// Fuel burnt over `dt` at `altitude` while producing `lift`.
    pub fn fuel_burn(&self, altitude: f32, lift: f32, dt: f32) -> f32 {
        if altitude > self.ground_effect_altitude && lift > 0.0 {
            self.consumption_rate * (altitude - self.ground_effect_altitude) * dt
        } else {
            0.0
        }
    }
}

impl ForceSource for ForceModel {
    fn wrench(&mut self, body: &RigidBody, dt: f32) -> Wrench {
        if self.controls.is_empty() {
            self.controls.cut_rotors();
        }

        let lift = self.lift_magnitude(body.velocity.y);
        let lift_force = body.orientation * self.tilt_rotation() * Vec3::new(0.0, lift, 0.0);
        let force = self.gravity_force(body.mass()) + lift_force + self.drag_force(body.velocity);

        let yaw_rate = body.angular_velocity.y;
        let torque = Vec3::new(0.0, self.yaw_drive(yaw_rate) + self.yaw_drag(yaw_rate), 0.0);

        self.controls.burn(self.fuel_burn(body.position.y, lift, dt));
        self.last_lift = lift;

        Wrench::new(force, torque)
    }
}
