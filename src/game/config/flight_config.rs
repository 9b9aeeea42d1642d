//! Flight Configuration
//!
//! Every tunable constant of the helicopter model in one serde-backed struct.
//! `Default` carries the tuned values; a JSON file can override any subset of
//! them since every section is `#[serde(default)]`.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Mass and spawn point of the airframe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Airframe mass (kilograms)
    pub mass: f32,
    /// Where the helicopter spawns and respawns, at rest
    pub spawn: Vec3,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            mass: 5.0e3,
            spawn: Vec3::new(0.0, 2.0, 0.0),
        }
    }
}

/// Main and tail rotor limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotorConfig {
    /// Main rotor power with the engine on (watts)
    pub main_max_power: f32,
    /// Upper bound on the lift force (newtons)
    pub lift_max: f32,
    /// Vertical speed floor used as the lift denominator (m/s)
    pub lift_velocity_floor: f32,
    /// Largest tail rotor power magnitude
    pub tail_max_power: f32,
    /// Share of `tail_max_power` applied by the yaw keys
    pub yaw_power_fraction: f32,
    /// Bound on the yaw drive torque magnitude
    pub yaw_torque_max: f32,
    /// Yaw rate floor used as the yaw drive denominator (rad/s)
    pub yaw_rate_floor: f32,
    /// Empirical multiplier on the quadratic yaw drag
    pub yaw_drag_factor: f32,
    /// Bound on either tilt angle (degrees)
    pub max_tilt_degrees: f32,
}

impl Default for RotorConfig {
    fn default() -> Self {
        Self {
            main_max_power: 2.4e6,
            lift_max: 1.0e5,
            lift_velocity_floor: 1.0,
            tail_max_power: 2.0e3,
            yaw_power_fraction: 0.5,
            yaw_torque_max: 2.5e3,
            yaw_rate_floor: 1.0e-3,
            yaw_drag_factor: 1.0e3,
            max_tilt_degrees: 30.0,
        }
    }
}

/// Gravity and air resistance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AeroConfig {
    /// Gravitational acceleration magnitude (m/s²)
    pub gravity: f32,
    /// Quadratic drag coefficient: drag = -c * |v| * v
    pub air_resistance: f32,
}

impl Default for AeroConfig {
    fn default() -> Self {
        Self {
            gravity: 10.0,
            air_resistance: 5.0,
        }
    }
}

/// Tank size and burn rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelConfig {
    /// Fuel at spawn (0-100)
    pub initial: f32,
    /// Altitude below which lift burns no fuel
    pub ground_effect_altitude: f32,
    /// Fuel per second per meter above `ground_effect_altitude`
    pub consumption_rate: f32,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            initial: 100.0,
            ground_effect_altitude: 5.0,
            consumption_rate: 0.01,
        }
    }
}

/// How obstacle candidates are gathered around the vehicle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadPhase {
    /// Only the spatial-hash cell containing the vehicle
    #[default]
    SingleCell,
    /// The 3x3 block of cells around the vehicle
    Neighborhood,
}

/// Ground, landing and collision geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Lowest altitude the airframe can reach
    pub ground_level: f32,
    /// Velocity multiplier applied on ground or roof contact
    pub restitution: f32,
    /// Half side length of the airframe's square footprint
    pub footprint_half_extent: f32,
    /// Altitude above a roof where the landing zone starts
    pub landing_band: f32,
    /// Altitude above a roof where the airframe rests after landing
    pub roof_clearance: f32,
    /// Candidate gathering strategy
    pub broad_phase: BroadPhase,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            ground_level: 2.0,
            restitution: 0.25,
            footprint_half_extent: 3.0,
            landing_band: 1.0,
            roof_clearance: 2.0,
            broad_phase: BroadPhase::SingleCell,
        }
    }
}

/// Crash and respawn timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Real seconds spent exploding before respawn
    pub explode_duration_secs: f32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            explode_duration_secs: 0.6,
        }
    }
}

/// Central configuration for the helicopter simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub body: BodyConfig,
    pub rotor: RotorConfig,
    pub aero: AeroConfig,
    pub fuel: FuelConfig,
    pub contact: ContactConfig,
    pub lifecycle: LifecycleConfig,
}

impl FlightConfig {
    /// Parses a (possibly partial) JSON config and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every value the simulation relies on being in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("body.mass", self.body.mass)?;
        if !self.body.spawn.is_finite() {
            return Err(ConfigError::invalid("body.spawn", f32::NAN, "a finite point"));
        }

        non_negative("rotor.main_max_power", self.rotor.main_max_power)?;
        non_negative("rotor.lift_max", self.rotor.lift_max)?;
        non_negative("rotor.lift_velocity_floor", self.rotor.lift_velocity_floor)?;
        non_negative("rotor.tail_max_power", self.rotor.tail_max_power)?;
        unit_interval("rotor.yaw_power_fraction", self.rotor.yaw_power_fraction)?;
        non_negative("rotor.yaw_torque_max", self.rotor.yaw_torque_max)?;
        non_negative("rotor.yaw_rate_floor", self.rotor.yaw_rate_floor)?;
        non_negative("rotor.yaw_drag_factor", self.rotor.yaw_drag_factor)?;
        non_negative("rotor.max_tilt_degrees", self.rotor.max_tilt_degrees)?;

        non_negative("aero.gravity", self.aero.gravity)?;
        non_negative("aero.air_resistance", self.aero.air_resistance)?;

        if !(0.0..=100.0).contains(&self.fuel.initial) {
            return Err(ConfigError::invalid("fuel.initial", self.fuel.initial, "within 0..=100"));
        }
        finite("fuel.ground_effect_altitude", self.fuel.ground_effect_altitude)?;
        non_negative("fuel.consumption_rate", self.fuel.consumption_rate)?;

        finite("contact.ground_level", self.contact.ground_level)?;
        unit_interval("contact.restitution", self.contact.restitution)?;
        positive("contact.footprint_half_extent", self.contact.footprint_half_extent)?;
        non_negative("contact.landing_band", self.contact.landing_band)?;
        if !(self.contact.roof_clearance.is_finite()
            && self.contact.roof_clearance >= self.contact.landing_band)
        {
            return Err(ConfigError::invalid(
                "contact.roof_clearance",
                self.contact.roof_clearance,
                ">= contact.landing_band",
            ));
        }

        non_negative("lifecycle.explode_duration_secs", self.lifecycle.explode_duration_secs)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, value, "finite"))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, value, "> 0"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, value, ">= 0"))
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, value, "within 0..=1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = FlightConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.body.spawn, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(config.aero.gravity, 10.0);
        assert_eq!(config.contact.restitution, 0.25);
        assert_eq!(config.contact.broad_phase, BroadPhase::SingleCell);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = FlightConfig::from_json_str(
            r#"{ "body": { "mass": 2500.0 }, "contact": { "broad_phase": "neighborhood" } }"#,
        )
        .unwrap();

        assert_eq!(config.body.mass, 2500.0);
        assert_eq!(config.body.spawn, BodyConfig::default().spawn);
        assert_eq!(config.rotor, RotorConfig::default());
        assert_eq!(config.contact.broad_phase, BroadPhase::Neighborhood);
    }

    #[test]
    fn test_json_round_trip() {
        let config = FlightConfig::default();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(FlightConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_non_positive_mass() {
        let err = FlightConfig::from_json_str(r#"{ "body": { "mass": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "body.mass", .. }));
    }

    #[test]
    fn test_rejects_restitution_out_of_range() {
        let mut config = FlightConfig::default();
        config.contact.restitution = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "contact.restitution", .. })
        ));
    }

    #[test]
    fn test_rejects_clearance_below_band() {
        let mut config = FlightConfig::default();
        config.contact.roof_clearance = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = FlightConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
