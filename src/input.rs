//! Keyboard mapping
//!
//! Hosts forward DOM-style `KeyboardEvent.code` strings (or the produced
//! character for symbol keys) and get back a command to fold into the next
//! frame's [`TickInput`].

use crate::sim::{Move, TickInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Hop(Move),
    Pause,
    Reset,
    Blast,
    ToggleBlast,
}

impl KeyCommand {
    /// Map a key code (or the `!` character) to a command
    pub fn from_code(code: &str) -> Option<Self> {
        let command = match code {
            "KeyW" | "ArrowUp" => KeyCommand::Hop(Move::Forward),
            "KeyA" | "ArrowLeft" => KeyCommand::Hop(Move::Left),
            "KeyS" | "ArrowDown" => KeyCommand::Hop(Move::Down),
            "KeyD" | "ArrowRight" => KeyCommand::Hop(Move::Right),
            "Escape" => KeyCommand::Pause,
            "KeyR" => KeyCommand::Reset,
            "Space" => KeyCommand::Blast,
            "!" => KeyCommand::ToggleBlast,
            _ => return None,
        };
        Some(command)
    }

    /// Resolve a key event, preferring the physical code. Shift+1 reports
    /// code `Digit1`, so the toggle is matched on the produced character.
    pub fn from_event(code: &str, key: &str) -> Option<Self> {
        Self::from_code(code).or_else(|| Self::from_code(key))
    }

    pub fn apply(self, input: &mut TickInput) {
        match self {
            KeyCommand::Hop(mv) => input.moves.push(mv),
            KeyCommand::Pause => input.pause = true,
            KeyCommand::Reset => input.reset = true,
            KeyCommand::Blast => input.blast = true,
            KeyCommand::ToggleBlast => input.toggle_blast = true,
        }
    }
}
