//! Game Module
//!
//! Helicopter-specific systems built on top of the engine's physics, world and
//! input layers.

pub mod city;
pub mod config;
pub mod error;
pub mod helicopter;
pub mod hud;
pub mod input;

pub use city::CityLayout;
pub use config::{BroadPhase, CityConfig, ConfigError, FlightConfig};
pub use error::SimError;
pub use helicopter::{
    CollisionResolver, Contact, ContactKind, ControlCommand, ControlState, EventLog, EventSink,
    ForceModel, FrameReport, HelicopterSim, LifecycleController, LifecyclePhase, NullSink,
    SimEvent,
};
pub use hud::{ChaseCamera, HudSnapshot, chase_camera, fuel_gauge_angle};
pub use input::FlightInput;
