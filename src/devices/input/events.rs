//! # Key Event Types
//!
//! - [`KeyAction`]: one reassembled scancode sequence (press or release of a keycode)
//! - [`KeyEvent`]: a non-modifier action with its descriptor and the modifiers in effect
//!
//! ## Character Resolution
//!
//! | Modifiers        | Letter key          | Other key        |
//! |------------------|---------------------|------------------|
//! | none             | plain               | plain            |
//! | SHIFT            | shifted             | shifted          |
//! | CAPS_LOCK        | case-flipped plain  | plain            |
//! | SHIFT+CAPS_LOCK  | case-flipped shifted| shifted          |

use crate::devices::input::keymap::{self, KeyDescriptor};
use crate::devices::input::modifiers::Modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Press,
    Release,
}

/// A press or release of one keycode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyAction {
    pub kind: KeyKind,
    pub keycode: u8,
    /// Sequence carried the `0xE0` prefix
    pub extended: bool,
}

impl KeyAction {
    pub const fn press(keycode: u8) -> Self {
        Self {
            kind: KeyKind::Press,
            keycode,
            extended: false,
        }
    }

    pub const fn release(keycode: u8) -> Self {
        Self {
            kind: KeyKind::Release,
            keycode,
            extended: false,
        }
    }

    pub const fn extended(self) -> Self {
        Self {
            extended: true,
            ..self
        }
    }

    #[inline]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyKind::Press)
    }

    #[inline]
    pub const fn is_release(&self) -> bool {
        matches!(self.kind, KeyKind::Release)
    }

    pub fn descriptor(&self) -> &'static KeyDescriptor {
        keymap::lookup(self.keycode)
    }
}

/// A non-modifier key action together with the modifiers in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub key: KeyDescriptor,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[inline]
    pub const fn is_press(&self) -> bool {
        self.action.is_press()
    }

    #[inline]
    pub const fn is_release(&self) -> bool {
        self.action.is_release()
    }

    /// Character this key produces under the captured modifiers.
    pub fn resolve(&self) -> u8 {
        resolve_char(&self.key, self.modifiers)
    }
}

#[inline]
fn flip_case(ch: u8) -> u8 {
    if ch.is_ascii_alphabetic() {
        ch ^ 0x20
    } else {
        ch
    }
}

pub fn resolve_char(key: &KeyDescriptor, modifiers: Modifiers) -> u8 {
    if modifiers.shift() {
        if modifiers.caps_lock() {
            flip_case(key.shifted)
        } else {
            key.shifted
        }
    } else if modifiers.caps_lock() {
        flip_case(key.ch)
    } else {
        key.ch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::input::keymap::lookup;

    #[test]
    fn letter_under_each_modifier_combination() {
        let a = lookup(0x1C);
        assert_eq!(resolve_char(a, Modifiers::empty()), b'a');
        assert_eq!(resolve_char(a, Modifiers::SHIFT), b'A');
        assert_eq!(resolve_char(a, Modifiers::CAPS_LOCK), b'A');
        assert_eq!(resolve_char(a, Modifiers::SHIFT | Modifiers::CAPS_LOCK), b'a');
    }

    #[test]
    fn caps_lock_leaves_digits_and_punctuation() {
        let one = lookup(0x16);
        assert_eq!(resolve_char(one, Modifiers::CAPS_LOCK), b'1');
        assert_eq!(resolve_char(one, Modifiers::SHIFT | Modifiers::CAPS_LOCK), b'!');
        let semi = lookup(0x4C);
        assert_eq!(resolve_char(semi, Modifiers::CAPS_LOCK), b';');
    }

    #[test]
    fn ctrl_and_alt_do_not_change_the_character() {
        let a = lookup(0x1C);
        assert_eq!(resolve_char(a, Modifiers::CTRL | Modifiers::ALT), b'a');
    }

    #[test]
    fn special_keys_are_not_case_flipped() {
        let up = lookup(0x75);
        assert_eq!(resolve_char(up, Modifiers::CAPS_LOCK), keymap::special::ARROW_UP);
    }

    #[test]
    fn action_constructors() {
        let a = KeyAction::press(0x75).extended();
        assert!(a.is_press() && a.extended);
        assert_eq!(a.keycode, 0x75);
        assert!(KeyAction::release(0x75).is_release());
        assert_ne!(KeyAction::press(0x75), KeyAction::press(0x75).extended());
    }
}
