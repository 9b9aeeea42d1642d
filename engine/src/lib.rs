//! Takeoff Engine Library
//!
//! Rigid-body flight and block-collision core for the helicopter takeoff game.
//! Everything that draws, plays sounds or reads a real keyboard lives outside
//! this crate; it only exposes the pose, gauges and events those layers need.
//!
//! # Modules
//!
//! - [`physics`] - Integrator, guarded division and planar collision primitives
//! - [`world`] - Static obstacle field and its spatial hash
//! - [`input`] - Platform-agnostic key codes and key-to-action bindings
//! - [`game`] - Helicopter force model, contact resolution, lifecycle and config
//!
//! # Example
//!
//! ```ignore
//! use takeoff_engine::game::{CityConfig, CityLayout, EventLog, FlightConfig, HelicopterSim};
//!
//! let layout = CityLayout::generate(&CityConfig::default());
//! let mut sim = HelicopterSim::new(
//!     FlightConfig::default(),
//!     layout.obstacles,
//!     layout.refuel,
//!     EventLog::default(),
//! )?;
//!
//! sim.engine_on();
//! for _ in 0..60 {
//!     sim.update(1.0 / 60.0)?;
//! }
//! let pose = sim.transform();
//! ```

pub mod input;
pub mod physics;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used types at crate level
pub use input::{InputAction, KeyBindings, KeyCode};
pub use physics::{PhysicsError, RigidBody, Wrench};
pub use world::{Obstacle, ObstacleId, ObstacleIndex, RefuelSet};
