//! Keyboard Input Module
//!
//! Generic key codes for the flight controls, decoupled from any windowing
//! system. A platform layer translates its own key events into these.

/// Generic key codes, independent of the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Attitude keys
    W,
    A,
    S,
    D,

    // Rotor keys
    J,
    K,
    L,

    // Arrow keys (available for rebinding)
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Control keys
    Space,
    ShiftLeft,
    ShiftRight,
    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Maps a single-key name ("k", "ArrowUp", "space") to a key code.
    ///
    /// Letter names are case-insensitive; unknown names map to [`KeyCode::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "w" => KeyCode::W,
            "a" => KeyCode::A,
            "s" => KeyCode::S,
            "d" => KeyCode::D,
            "j" => KeyCode::J,
            "k" => KeyCode::K,
            "l" => KeyCode::L,
            "arrowup" => KeyCode::ArrowUp,
            "arrowdown" => KeyCode::ArrowDown,
            "arrowleft" => KeyCode::ArrowLeft,
            "arrowright" => KeyCode::ArrowRight,
            "space" | " " => KeyCode::Space,
            "shift" | "shiftleft" => KeyCode::ShiftLeft,
            "shiftright" => KeyCode::ShiftRight,
            "escape" | "esc" => KeyCode::Escape,
            _ => KeyCode::Unknown,
        }
    }
}
