//! Config Module
//!
//! Centralized configuration for the flight model and the city layout.

pub mod city_config;
pub mod flight_config;

use thiserror::Error;

pub use city_config::CityConfig;
pub use flight_config::{
    AeroConfig, BodyConfig, BroadPhase, ContactConfig, FlightConfig, FuelConfig, LifecycleConfig,
    RotorConfig,
};

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value is outside the range the simulation supports
    #[error("invalid config value {field} = {value}: expected {expected}")]
    InvalidValue {
        /// Dotted path of the offending field
        field: &'static str,
        /// The rejected value
        value: f32,
        /// Human-readable constraint
        expected: &'static str,
    },

    /// Config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn invalid(field: &'static str, value: f32, expected: &'static str) -> Self {
        Self::InvalidValue {
            field,
            value,
            expected,
        }
    }
}
