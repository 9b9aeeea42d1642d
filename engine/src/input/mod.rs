//! Input Module
//!
//! Platform-agnostic key codes and key-to-action bindings for the flight
//! controls. Turning held actions into control commands is game logic and
//! lives in `game::input`.
//!
//! # Example
//!
//! ```rust,ignore
//! use takeoff_engine::input::{InputAction, KeyBindings, KeyCode};
//!
//! let mut bindings = KeyBindings::new();
//! bindings.bind(KeyCode::ArrowUp, InputAction::PitchForward);
//! assert_eq!(bindings.get_action(KeyCode::ArrowUp), Some(InputAction::PitchForward));
//! ```

pub mod bindings;
pub mod keyboard;

pub use bindings::{InputAction, KeyBindings};
pub use keyboard::KeyCode;
