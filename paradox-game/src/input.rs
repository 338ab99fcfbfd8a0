//! Discrete input symbols and the fixed key bindings of the adventure.
use serde::{Deserialize, Serialize};
use std::fmt;

/// One key event as seen by the core.
///
/// Letters are normalized to lowercase. Anything that is neither a letter nor
/// the space bar collapses to [`Key::Other`] and is ignored by every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    Letter(char),
    Other,
}

impl Key {
    /// Every key the adventure binds to something, in a stable order.
    pub const BOUND: [Self; 27] = [
        Self::Space,
        Self::Letter('a'),
        Self::Letter('b'),
        Self::Letter('c'),
        Self::Letter('d'),
        Self::Letter('e'),
        Self::Letter('f'),
        Self::Letter('g'),
        Self::Letter('h'),
        Self::Letter('i'),
        Self::Letter('j'),
        Self::Letter('k'),
        Self::Letter('l'),
        Self::Letter('m'),
        Self::Letter('n'),
        Self::Letter('o'),
        Self::Letter('p'),
        Self::Letter('q'),
        Self::Letter('r'),
        Self::Letter('s'),
        Self::Letter('t'),
        Self::Letter('u'),
        Self::Letter('v'),
        Self::Letter('w'),
        Self::Letter('x'),
        Self::Letter('y'),
        Self::Letter('z'),
    ];

    #[must_use]
    pub fn from_char(c: char) -> Self {
        if c == ' ' {
            Self::Space
        } else if c.is_ascii_alphabetic() {
            Self::Letter(c.to_ascii_lowercase())
        } else {
            Self::Other
        }
    }

    /// Parses a `KeyboardEvent.code` such as `"Space"` or `"KeyQ"`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        if code == "Space" {
            return Self::Space;
        }
        match code.strip_prefix("Key").map(str::as_bytes) {
            Some([b]) if b.is_ascii_alphabetic() => {
                Self::Letter(char::from(*b).to_ascii_lowercase())
            }
            _ => Self::Other,
        }
    }

    /// Whether the key is a single printable symbol (letter or space).
    #[must_use]
    pub const fn is_symbol(self) -> bool {
        matches!(self, Self::Space | Self::Letter(_))
    }

    #[must_use]
    pub const fn is_letter(self, c: char) -> bool {
        matches!(self, Self::Letter(l) if l == c)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Self::from_char(c)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space => f.write_str("SPACE"),
            Self::Letter(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Self::Other => f.write_str("?"),
        }
    }
}

// Key bindings -------------------------------------------------------------
pub const KEY_CANCEL: char = 'n';
pub const KEY_TUTORIAL: char = 't';
pub const KEY_GATE: char = 'd';
pub const KEY_CAPACITOR: char = 'h';
pub const KEY_RESET: char = 'r';
pub const KEY_ROOM_1A: char = 'z';
pub const KEY_ROOM_1B: char = 'c';
pub const KEY_ROOM_2A: char = 'q';
pub const KEY_ROOM_2B: char = 'w';
pub const KEY_ROOM_3A: char = 'e';
pub const KEY_ROOM_3B: char = 'r';
pub const KEY_FINAL: char = 'x';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_normalize() {
        assert_eq!(Key::from_char(' '), Key::Space);
        assert_eq!(Key::from_char('Q'), Key::Letter('q'));
        assert_eq!(Key::from('z'), Key::Letter('z'));
        assert_eq!(Key::from_char('7'), Key::Other);
        assert_eq!(Key::from_char('\n'), Key::Other);
    }

    #[test]
    fn codes_map() {
        assert_eq!(Key::from_code("Space"), Key::Space);
        assert_eq!(Key::from_code("KeyF"), Key::Letter('f'));
        assert_eq!(Key::from_code("Digit3"), Key::Other);
        assert_eq!(Key::from_code("KeyEnter"), Key::Other);
    }

    #[test]
    fn bound_keys_are_symbols() {
        assert!(Key::BOUND.iter().all(|key| key.is_symbol()));
        assert!(!Key::Other.is_symbol());
        assert_eq!(Key::Letter('p').to_string(), "P");
    }
}
