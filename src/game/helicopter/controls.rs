//! Control state
//!
//! Rotor powers, tilt angles and the fuel tank. Every setter enforces its own
//! bound, so input code can pass raw values straight through.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::game::config::FlightConfig;

/// Fuel level of a full tank.
pub const FUEL_FULL: f32 = 100.0;

/// Discrete control inputs, as issued by an input handler or a script.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ControlCommand {
    EngineOn,
    EngineOff,
    YawLeft,
    YawRight,
    YawStop,
    /// Forward/back tilt in degrees; negative pitches the nose down
    TiltForwardBack(f32),
    /// Left/right tilt in degrees; positive banks left
    TiltLeftRight(f32),
}

/// Bounds on the control values, taken from [`FlightConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlLimits {
    pub main_max_power: f32,
    pub tail_max_power: f32,
    pub max_tilt_degrees: f32,
}

impl ControlLimits {
    pub fn from_config(config: &FlightConfig) -> Self {
        Self {
            main_max_power: config.rotor.main_max_power,
            tail_max_power: config.rotor.tail_max_power,
            max_tilt_degrees: config.rotor.max_tilt_degrees,
        }
    }
}

/// Pilot-controlled state of the helicopter.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    main_rotor_power: f32,
    tail_rotor_power: f32,
    tilt_forward_back: f32,
    tilt_left_right: f32,
    fuel: f32,
    limits: ControlLimits,
}

impl ControlState {
    /// Engine off, level, with `fuel` clamped into the tank.
    pub fn new(limits: ControlLimits, fuel: f32) -> Self {
        Self {
            main_rotor_power: 0.0,
            tail_rotor_power: 0.0,
            tilt_forward_back: 0.0,
            tilt_left_right: 0.0,
            fuel: fuel.clamp(0.0, FUEL_FULL),
            limits,
        }
    }

    pub fn limits(&self) -> &ControlLimits {
        &self.limits
    }

    pub fn main_rotor_power(&self) -> f32 {
        self.main_rotor_power
    }

    pub fn tail_rotor_power(&self) -> f32 {
        self.tail_rotor_power
    }

    pub fn tilt_forward_back(&self) -> f32 {
        self.tilt_forward_back
    }

    pub fn tilt_left_right(&self) -> f32 {
        self.tilt_left_right
    }

    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    /// Sets main rotor power, clamped to `[0, main_max_power]`.
    pub fn set_main_rotor_power(&mut self, power: f32) {
        self.main_rotor_power = sanitize(power).clamp(0.0, self.limits.main_max_power);
    }

    /// Sets tail rotor power, clamped to `±tail_max_power`.
    pub fn set_tail_rotor_power(&mut self, power: f32) {
        let max = self.limits.tail_max_power;
        self.tail_rotor_power = sanitize(power).clamp(-max, max);
    }

    /// Sets the forward/back tilt, clamped to `±max_tilt_degrees`.
    pub fn set_tilt_forward_back(&mut self, degrees: f32) {
        self.tilt_forward_back = self.clamp_tilt(degrees);
    }

    /// Sets the left/right tilt, clamped to `±max_tilt_degrees`.
    pub fn set_tilt_left_right(&mut self, degrees: f32) {
        self.tilt_left_right = self.clamp_tilt(degrees);
    }

    fn clamp_tilt(&self, degrees: f32) -> f32 {
        let max = self.limits.max_tilt_degrees;
        let clamped = sanitize(degrees).clamp(-max, max);
        if clamped != degrees && degrees.is_finite() {
            warn!(requested = degrees, applied = clamped, "tilt clamped");
        }
        clamped
    }

    /// Zeroes both rotors (flameout, crash).
    pub fn cut_rotors(&mut self) {
        self.main_rotor_power = 0.0;
        self.tail_rotor_power = 0.0;
    }

    /// Removes `amount` of fuel, never going below empty.
    pub fn burn(&mut self, amount: f32) {
        if amount > 0.0 {
            self.fuel = (self.fuel - amount).max(0.0);
        }
    }

    pub fn fill_tank(&mut self) {
        self.fuel = FUEL_FULL;
    }

    pub fn is_empty(&self) -> bool {
        self.fuel <= 0.0
    }
}

/// Non-finite input becomes 0 so that `clamp` never sees NaN.
#[inline]
fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> ControlState {
        ControlState::new(ControlLimits::from_config(&FlightConfig::default()), FUEL_FULL)
    }

    #[test]
    fn test_new_is_idle() {
        let c = controls();
        assert_eq!(c.main_rotor_power(), 0.0);
        assert_eq!(c.tail_rotor_power(), 0.0);
        assert_eq!(c.fuel(), FUEL_FULL);
    }

    #[test]
    fn test_tilt_is_clamped() {
        let mut c = controls();
        c.set_tilt_forward_back(-20.0);
        assert_eq!(c.tilt_forward_back(), -20.0);

        c.set_tilt_forward_back(90.0);
        assert_eq!(c.tilt_forward_back(), 30.0);

        c.set_tilt_left_right(-45.0);
        assert_eq!(c.tilt_left_right(), -30.0);

        c.set_tilt_left_right(f32::NAN);
        assert_eq!(c.tilt_left_right(), 0.0);
    }

    #[test]
    fn test_rotor_power_is_clamped() {
        let mut c = controls();
        c.set_main_rotor_power(1e9);
        assert_eq!(c.main_rotor_power(), c.limits().main_max_power);
        c.set_main_rotor_power(-5.0);
        assert_eq!(c.main_rotor_power(), 0.0);

        c.set_tail_rotor_power(-1e9);
        assert_eq!(c.tail_rotor_power(), -c.limits().tail_max_power);
    }

    #[test]
    fn test_burn_floors_at_zero() {
        let mut c = controls();
        c.burn(30.0);
        assert_eq!(c.fuel(), 70.0);
        c.burn(500.0);
        assert_eq!(c.fuel(), 0.0);
        assert!(c.is_empty());

        c.fill_tank();
        assert_eq!(c.fuel(), FUEL_FULL);
    }

    #[test]
    fn test_initial_fuel_clamped() {
        let c = ControlState::new(ControlLimits::from_config(&FlightConfig::default()), 250.0);
        assert_eq!(c.fuel(), FUEL_FULL);
    }
}
