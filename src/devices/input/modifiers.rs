use bitflags::bitflags;

use crate::devices::input::keymap::KeyRole;

bitflags! {
    /// Modifier keys currently in effect.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT     = 1 << 0;
        const ALT       = 1 << 1;
        const CTRL      = 1 << 2;
        const CAPS_LOCK = 1 << 3;
    }
}

impl Modifiers {
    /// Flag for a modifier role; empty for ordinary keys.
    pub const fn for_role(role: KeyRole) -> Modifiers {
        match role {
            KeyRole::Shift => Modifiers::SHIFT,
            KeyRole::Ctrl => Modifiers::CTRL,
            KeyRole::Alt => Modifiers::ALT,
            KeyRole::CapsLock => Modifiers::CAPS_LOCK,
            KeyRole::Ordinary => Modifiers::empty(),
        }
    }

    #[inline]
    pub fn shift(self) -> bool {
        self.contains(Modifiers::SHIFT)
    }

    #[inline]
    pub fn ctrl(self) -> bool {
        self.contains(Modifiers::CTRL)
    }

    #[inline]
    pub fn alt(self) -> bool {
        self.contains(Modifiers::ALT)
    }

    #[inline]
    pub fn caps_lock(self) -> bool {
        self.contains(Modifiers::CAPS_LOCK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clear() {
        let m = Modifiers::default();
        assert!(m.is_empty());
        assert!(!m.shift() && !m.ctrl() && !m.alt() && !m.caps_lock());
    }

    #[test]
    fn roles_map_to_flags() {
        assert_eq!(Modifiers::for_role(KeyRole::Shift), Modifiers::SHIFT);
        assert_eq!(Modifiers::for_role(KeyRole::CapsLock), Modifiers::CAPS_LOCK);
        assert!(Modifiers::for_role(KeyRole::Ordinary).is_empty());
    }
}
