//! Flight Input
//!
//! Turns raw key press/release events into [`ControlCommand`]s. Keys are held
//! actions: a press starts the effect, a release undoes it. Auto-repeated
//! presses of a key that is already down are ignored.

use std::collections::HashSet;

use crate::game::helicopter::ControlCommand;
use crate::input::{InputAction, KeyBindings, KeyCode};

/// Tilt applied while a pitch or roll key is held (degrees)
pub const DEFAULT_TILT_STEP: f32 = 20.0;

/// Key-state tracker for the flight controls.
#[derive(Debug, Clone)]
pub struct FlightInput {
    bindings: KeyBindings,
    held: HashSet<InputAction>,
    tilt_step: f32,
}

impl Default for FlightInput {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

impl FlightInput {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
            tilt_step: DEFAULT_TILT_STEP,
        }
    }

    pub fn with_tilt_step(mut self, degrees: f32) -> Self {
        self.tilt_step = degrees;
        self
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Handles one key event. Returns the command to apply, if any.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> Option<ControlCommand> {
        let action = self.bindings.get_action(key)?;

        let changed = if pressed {
            self.held.insert(action)
        } else {
            self.held.remove(&action)
        };
        if !changed {
            return None;
        }

        Some(self.command_for(action, pressed))
    }

    fn command_for(&self, action: InputAction, pressed: bool) -> ControlCommand {
        let step = if pressed { self.tilt_step } else { 0.0 };
        match (action, pressed) {
            (InputAction::Throttle, true) => ControlCommand::EngineOn,
            (InputAction::Throttle, false) => ControlCommand::EngineOff,
            (InputAction::YawLeft, true) => ControlCommand::YawLeft,
            (InputAction::YawRight, true) => ControlCommand::YawRight,
            (InputAction::YawLeft | InputAction::YawRight, false) => ControlCommand::YawStop,
            (InputAction::PitchForward, _) => ControlCommand::TiltForwardBack(-step),
            (InputAction::PitchBack, _) => ControlCommand::TiltForwardBack(step),
            (InputAction::RollLeft, _) => ControlCommand::TiltLeftRight(step),
            (InputAction::RollRight, _) => ControlCommand::TiltLeftRight(-step),
        }
    }

    /// Forgets every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) -> Vec<ControlCommand> {
        let held: Vec<InputAction> = self.held.drain().collect();
        held.into_iter()
            .map(|action| self.command_for(action, false))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_hold() {
        let mut input = FlightInput::default();
        assert_eq!(input.handle_key(KeyCode::K, true), Some(ControlCommand::EngineOn));
        // Auto-repeat
        assert_eq!(input.handle_key(KeyCode::K, true), None);
        assert_eq!(input.handle_key(KeyCode::K, false), Some(ControlCommand::EngineOff));
        assert_eq!(input.handle_key(KeyCode::K, false), None);
    }

    #[test]
    fn test_tilt_keys() {
        let mut input = FlightInput::default();
        assert_eq!(
            input.handle_key(KeyCode::W, true),
            Some(ControlCommand::TiltForwardBack(-20.0))
        );
        assert_eq!(
            input.handle_key(KeyCode::W, false),
            Some(ControlCommand::TiltForwardBack(0.0))
        );
        assert_eq!(
            input.handle_key(KeyCode::S, true),
            Some(ControlCommand::TiltForwardBack(20.0))
        );
        assert_eq!(
            input.handle_key(KeyCode::A, true),
            Some(ControlCommand::TiltLeftRight(20.0))
        );
        assert_eq!(
            input.handle_key(KeyCode::D, true),
            Some(ControlCommand::TiltLeftRight(-20.0))
        );
    }

    #[test]
    fn test_custom_tilt_step() {
        let mut input = FlightInput::default().with_tilt_step(12.5);
        assert_eq!(
            input.handle_key(KeyCode::S, true),
            Some(ControlCommand::TiltForwardBack(12.5))
        );
        assert_eq!(
            input.handle_key(KeyCode::S, false),
            Some(ControlCommand::TiltForwardBack(0.0))
        );
    }

    #[test]
    fn test_yaw_release_stops() {
        let mut input = FlightInput::default();
        assert_eq!(input.handle_key(KeyCode::J, true), Some(ControlCommand::YawLeft));
        assert_eq!(input.handle_key(KeyCode::J, false), Some(ControlCommand::YawStop));
        assert_eq!(input.handle_key(KeyCode::L, true), Some(ControlCommand::YawRight));
        assert_eq!(input.handle_key(KeyCode::L, false), Some(ControlCommand::YawStop));
    }

    #[test]
    fn test_unbound_key() {
        let mut input = FlightInput::default();
        assert_eq!(input.handle_key(KeyCode::Space, true), None);
    }

    #[test]
    fn test_release_all() {
        let mut input = FlightInput::default();
        input.handle_key(KeyCode::K, true);
        input.handle_key(KeyCode::J, true);

        let mut released = input.release_all();
        released.sort_by_key(|c| format!("{c:?}"));
        assert_eq!(released, vec![ControlCommand::EngineOff, ControlCommand::YawStop]);
        assert!(!input.is_held(InputAction::Throttle));
    }
}
