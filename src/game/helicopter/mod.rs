//! Helicopter Module
//!
//! The flight model and its per-frame driver.
//!
//! - [`controls`] - Rotor powers, tilt and fuel with their bounds
//! - [`forces`] - Gravity, lift, drag and yaw torque as a force source
//! - [`contact`] - Ground clamp plus landing/crash resolution
//! - [`lifecycle`] - Flying / Exploding state machine
//! - [`events`] - Notifications for audio and UI
//! - [`simulation`] - [`HelicopterSim`], tying the above together

pub mod contact;
pub mod controls;
pub mod events;
pub mod forces;
pub mod lifecycle;
pub mod simulation;

pub use contact::{CollisionResolver, Contact, ContactKind};
pub use controls::{ControlCommand, ControlLimits, ControlState, FUEL_FULL};
pub use events::{EventLog, EventSink, NullSink, SimEvent};
pub use forces::ForceModel;
pub use lifecycle::{LifecycleController, LifecyclePhase, LifecycleState};
pub use simulation::{FrameReport, HelicopterSim};
