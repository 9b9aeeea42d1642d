//! Flight key bindings
//!
//! Which physical key drives which flight action. Each action has at most one
//! key and each key at most one action; rebinding steals from the previous
//! owner on both sides.

use std::collections::HashMap;

use super::KeyCode;

/// Flight actions a key can be bound to.
///
/// Every action is held: the effect lasts from press to release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Main rotor at full power (K)
    Throttle,
    /// Tail rotor counter-clockwise (J)
    YawLeft,
    /// Tail rotor clockwise (L)
    YawRight,
    /// Nose down (W)
    PitchForward,
    /// Nose up (S)
    PitchBack,
    /// Bank left (A)
    RollLeft,
    /// Bank right (D)
    RollRight,
}

impl InputAction {
    pub const ALL: [InputAction; 7] = [
        InputAction::Throttle,
        InputAction::YawLeft,
        InputAction::YawRight,
        InputAction::PitchForward,
        InputAction::PitchBack,
        InputAction::RollLeft,
        InputAction::RollRight,
    ];

    fn default_key(self) -> KeyCode {
        match self {
            InputAction::Throttle => KeyCode::K,
            InputAction::YawLeft => KeyCode::J,
            InputAction::YawRight => KeyCode::L,
            InputAction::PitchForward => KeyCode::W,
            InputAction::PitchBack => KeyCode::S,
            InputAction::RollLeft => KeyCode::A,
            InputAction::RollRight => KeyCode::D,
        }
    }
}

/// One-to-one key/action table.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    by_key: HashMap<KeyCode, InputAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// The K / J L / W S / A D layout.
    pub fn new() -> Self {
        Self {
            by_key: InputAction::ALL
                .into_iter()
                .map(|action| (action.default_key(), action))
                .collect(),
        }
    }

    /// No keys bound.
    pub fn empty() -> Self {
        Self {
            by_key: HashMap::new(),
        }
    }

    /// Binds `key` to `action`, dropping whatever either was bound to before.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.by_key.retain(|_, bound| *bound != action);
        self.by_key.insert(key, action);
    }

    pub fn unbind_key(&mut self, key: KeyCode) {
        self.by_key.remove(&key);
    }

    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.by_key.get(&key).copied()
    }

    pub fn get_key(&self, action: InputAction) -> Option<KeyCode> {
        self.by_key
            .iter()
            .find_map(|(&key, &bound)| (bound == action).then_some(key))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Every (key, action) pair, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (KeyCode, InputAction)> + '_ {
        self.by_key.iter().map(|(&key, &action)| (key, action))
    }
}
