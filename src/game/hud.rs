//! HUD and view helpers
//!
//! Pure functions from simulation state to what the renderer needs: gauge
//! needle angle, rotor spin, visual body tilt and the chase camera. Nothing
//! here feeds back into the physics.

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::Serialize;

use crate::game::helicopter::{EventSink, FUEL_FULL, HelicopterSim, LifecyclePhase};

/// Camera offset from the airframe, in the airframe's frame
pub const CHASE_OFFSET: Vec3 = Vec3::new(0.0, 15.0, 40.0);
/// Divisor turning main rotor power into rotor angular speed (rad/s)
pub const ROTOR_SPIN_DIVISOR: f32 = 6.0e3;

/// Fuel needle rotation about the gauge face normal: 0 when full, -π/2 when empty.
pub fn fuel_gauge_angle(fuel: f32) -> f32 {
    -FRAC_PI_2 * (1.0 - fuel.clamp(0.0, FUEL_FULL) / FUEL_FULL)
}

/// Main rotor blade angle at `seconds` of animation time.
pub fn rotor_spin_angle(main_rotor_power: f32, seconds: f32) -> f32 {
    main_rotor_power / ROTOR_SPIN_DIVISOR * seconds
}

/// Visual body lean for the given tilt angles (degrees), half the thrust tilt.
pub fn body_tilt(forward_back: f32, left_right: f32) -> Quat {
    Quat::from_rotation_x(forward_back.to_radians() / 2.0)
        * Quat::from_rotation_z(left_right.to_radians() / 2.0)
}

/// Camera shake while exploding, from animation time in milliseconds.
pub fn explosion_wobble(animation_time_ms: f32) -> f32 {
    (animation_time_ms / 20.0).sin()
}

/// Eye and look-at point of the chase camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChaseCamera {
    pub eye: Vec3,
    pub target: Vec3,
}

impl ChaseCamera {
    /// Right-handed view matrix with +Y up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }
}

/// Camera behind and above the airframe, looking at it (raised by `wobble`).
pub fn chase_camera(transform: &Mat4, wobble: f32) -> ChaseCamera {
    ChaseCamera {
        eye: transform.transform_point3(CHASE_OFFSET),
        target: transform.transform_point3(Vec3::new(0.0, wobble, 0.0)),
    }
}

/// One frame of gauge and pose readings.
#[derive(Debug, Clone, Serialize)]
pub struct HudSnapshot {
    /// Simulated seconds
    pub time: f32,
    pub phase: LifecyclePhase,
    /// Rendered position (frozen while exploding)
    pub position: Vec3,
    pub velocity: Vec3,
    /// Heading about +Y (radians)
    pub yaw: f32,
    pub fuel: f32,
    pub fuel_gauge_angle: f32,
    pub main_rotor_power: f32,
    pub tail_rotor_power: f32,
    pub tilt_forward_back: f32,
    pub tilt_left_right: f32,
    /// Chase camera for the rendered pose, shaking while exploding
    pub camera: ChaseCamera,
}

impl HudSnapshot {
    pub fn capture<S: EventSink>(sim: &HelicopterSim<S>) -> Self {
        let (_, rotation, position) = sim.transform().to_scale_rotation_translation();
        let (yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
        let (tilt_forward_back, tilt_left_right) = sim.tilt();
        let fuel = sim.fuel();
        let phase = sim.lifecycle_phase();
        let wobble = match phase {
            LifecyclePhase::Exploding => explosion_wobble(sim.elapsed() * 1000.0),
            LifecyclePhase::Flying => 0.0,
        };

        Self {
            time: sim.elapsed(),
            phase,
            position,
            velocity: if phase == LifecyclePhase::Flying {
                sim.body().velocity
            } else {
                Vec3::ZERO
            },
            yaw,
            fuel,
            fuel_gauge_angle: fuel_gauge_angle(fuel),
            main_rotor_power: sim.main_rotor_power(),
            tail_rotor_power: sim.tail_rotor_power(),
            tilt_forward_back,
            tilt_left_right,
            camera: chase_camera(&sim.transform(), wobble),
        }
    }
}
