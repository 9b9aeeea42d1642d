//! Simulation error type.

use thiserror::Error;

use crate::game::config::ConfigError;
use crate::physics::PhysicsError;

/// Errors surfaced by [`crate::game::HelicopterSim`].
#[derive(Error, Debug)]
pub enum SimError {
    /// `update` was called with a zero, negative or non-finite step
    #[error("update requires a finite dt > 0, got {0}")]
    InvalidTimestep(f32),

    #[error(transparent)]
    Physics(#[from] PhysicsError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
