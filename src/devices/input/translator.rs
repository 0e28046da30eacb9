//! # Key Translator
//!
//! Foreground half of the keyboard pipeline. Pulls raw scancodes from a
//! [`ScancodeSource`], reassembles sequences, keeps the modifier state and
//! resolves key presses to characters.
//!
//! ## Read Layers
//!
//! | Blocking        | Non-blocking        | Yields                               |
//! |-----------------|---------------------|--------------------------------------|
//! | `read_scancode` | `try_read_scancode` | one raw byte                         |
//! | `read_sequence` | `try_read_sequence` | one [`KeyAction`]                    |
//! | `read_event`    | `try_read_event`    | one non-modifier [`KeyEvent`]        |
//! | `read_next`     | `try_read_next`     | one character from a non-modifier press |
//!
//! The non-blocking variants keep any partial sequence in the translator, so
//! mixing them with the blocking ones never loses bytes.

use alloc::sync::Arc;

use log::debug;

use crate::devices::drivers::ps2::{InputQueue, Ps2Device};
use crate::devices::input::events::{KeyAction, KeyEvent, KeyKind};
use crate::devices::input::keymap::KeyRole;
use crate::devices::input::modifiers::Modifiers;
use crate::devices::input::sequence::SequenceParser;

/// Anything that hands out raw scancodes in arrival order.
pub trait ScancodeSource {
    /// Next scancode, waiting as long as necessary.
    fn read_scancode(&mut self) -> u8;

    /// Next scancode if one is already available.
    fn try_read_scancode(&mut self) -> Option<u8>;
}

impl ScancodeSource for &InputQueue {
    fn read_scancode(&mut self) -> u8 {
        self.dequeue()
    }

    fn try_read_scancode(&mut self) -> Option<u8> {
        self.try_dequeue()
    }
}

impl ScancodeSource for &Ps2Device {
    fn read_scancode(&mut self) -> u8 {
        self.read()
    }

    fn try_read_scancode(&mut self) -> Option<u8> {
        self.try_read()
    }
}

impl ScancodeSource for Arc<Ps2Device> {
    fn read_scancode(&mut self) -> u8 {
        self.read()
    }

    fn try_read_scancode(&mut self) -> Option<u8> {
        self.try_read()
    }
}

pub struct KeyTranslator<S> {
    source: S,
    parser: SequenceParser,
    modifiers: Modifiers,
}

impl<S: ScancodeSource> KeyTranslator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            parser: SequenceParser::new(),
            modifiers: Modifiers::empty(),
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Clear modifiers and any half-read sequence.
    pub fn reset(&mut self) {
        self.parser.reset();
        self.modifiers = Modifiers::empty();
    }

    pub fn read_scancode(&mut self) -> u8 {
        self.source.read_scancode()
    }

    pub fn try_read_scancode(&mut self) -> Option<u8> {
        self.source.try_read_scancode()
    }

    pub fn read_sequence(&mut self) -> KeyAction {
        loop {
            let byte = self.source.read_scancode();
            if let Some(action) = self.parser.feed(byte) {
                return action;
            }
        }
    }

    pub fn try_read_sequence(&mut self) -> Option<KeyAction> {
        while let Some(byte) = self.source.try_read_scancode() {
            if let Some(action) = self.parser.feed(byte) {
                return Some(action);
            }
        }
        None
    }

    /// Apply `action` to the modifier state.
    ///
    /// Modifier keys are absorbed and yield `None`; any other key yields an
    /// event carrying a snapshot of the modifiers.
    pub fn process_action(&mut self, action: KeyAction) -> Option<KeyEvent> {
        let key = *action.descriptor();
        let flag = Modifiers::for_role(key.role);
        match (key.role, action.kind) {
            (KeyRole::Ordinary, _) => Some(KeyEvent {
                action,
                key,
                modifiers: self.modifiers,
            }),
            (KeyRole::CapsLock, KeyKind::Press) => {
                self.modifiers.toggle(flag);
                debug!("keyboard: caps lock {}", if self.modifiers.caps_lock() { "on" } else { "off" });
                None
            }
            (KeyRole::CapsLock, KeyKind::Release) => None,
            (_, KeyKind::Press) => {
                self.modifiers.insert(flag);
                None
            }
            (_, KeyKind::Release) => {
                self.modifiers.remove(flag);
                None
            }
        }
    }

    pub fn read_event(&mut self) -> KeyEvent {
        loop {
            let action = self.read_sequence();
            if let Some(event) = self.process_action(action) {
                return event;
            }
        }
    }

    pub fn try_read_event(&mut self) -> Option<KeyEvent> {
        while let Some(action) = self.try_read_sequence() {
            if let Some(event) = self.process_action(action) {
                return Some(event);
            }
        }
        None
    }

    /// Next character typed; releases and modifier keys are skipped.
    pub fn read_next(&mut self) -> u8 {
        loop {
            let event = self.read_event();
            if event.is_press() {
                return event.resolve();
            }
        }
    }

    pub fn try_read_next(&mut self) -> Option<u8> {
        while let Some(event) = self.try_read_event() {
            if event.is_press() {
                return Some(event.resolve());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::input::keymap::special;

    const A: u8 = 0x1C;
    const ONE: u8 = 0x16;
    const LSHIFT: u8 = 0x12;
    const RSHIFT: u8 = 0x59;
    const CTRL: u8 = 0x14;
    const ALT: u8 = 0x11;
    const CAPS: u8 = 0x58;

    fn queue(bytes: &[u8]) -> InputQueue {
        let q = InputQueue::with_capacity(64).unwrap();
        for &b in bytes {
            assert!(q.enqueue(b));
        }
        q
    }

    #[test]
    fn plain_press_resolves_lowercase() {
        let q = queue(&[A]);
        let mut t = KeyTranslator::new(&q);
        assert_eq!(t.read_next(), b'a');
    }

    #[test]
    fn shift_held_resolves_uppercase() {
        let q = queue(&[LSHIFT, A, 0xF0, A, 0xF0, LSHIFT, A]);
        let mut t = KeyTranslator::new(&q);
        assert_eq!(t.read_next(), b'A');
        assert!(t.modifiers().shift());
        assert_eq!(t.read_next(), b'a');
        assert!(!t.modifiers().shift());
    }

    #[test]
    fn caps_lock_toggles_on_press_only() {
        let q = queue(&[CAPS, 0xF0, CAPS, A, ONE, CAPS, 0xF0, CAPS, A]);
        let mut t = KeyTranslator::new(&q);
        assert_eq!(t.read_next(), b'A');
        assert!(t.modifiers().caps_lock());
        assert_eq!(t.read_next(), b'1');
        assert_eq!(t.read_next(), b'a');
        assert!(!t.modifiers().caps_lock());
    }

    #[test]
    fn caps_without_release_still_applies() {
        let q = queue(&[CAPS, A]);
        let mut t = KeyTranslator::new(&q);
        assert_eq!(t.read_next(), b'A');
    }

    #[test]
    fn shift_and_caps_cancel_on_letters() {
        let q = queue(&[CAPS, RSHIFT, A, ONE]);
        let mut t = KeyTranslator::new(&q);
        assert_eq!(t.read_next(), b'a');
        assert_eq!(t.read_next(), b'!');
        assert_eq!(t.modifiers(), Modifiers::SHIFT | Modifiers::CAPS_LOCK);
    }

    #[test]
    fn read_next_skips_releases_and_modifiers() {
        // ctrl down, alt down, release of an earlier key, alt up, then 'a'
        let q = queue(&[CTRL, ALT, 0xF0, ONE, 0xF0, ALT, 0xE0, 0xF0, 0x75, A]);
        let mut t = KeyTranslator::new(&q);
        assert_eq!(t.read_next(), b'a');
        assert_eq!(t.modifiers(), Modifiers::CTRL);
        assert!(q.is_empty());
    }

    #[test]
    fn read_event_surfaces_releases_of_ordinary_keys() {
        let q = queue(&[LSHIFT, 0xF0, A]);
        let mut t = KeyTranslator::new(&q);
        let ev = t.read_event();
        assert_eq!(ev.action, KeyAction::release(A));
        assert_eq!(ev.key.ch, b'a');
        assert_eq!(ev.modifiers, Modifiers::SHIFT);
    }

    #[test]
    fn extended_right_ctrl_is_a_modifier() {
        let q = queue(&[0xE0, CTRL, A, 0xE0, 0xF0, CTRL, A]);
        let mut t = KeyTranslator::new(&q);
        let ev = t.read_event();
        assert!(ev.modifiers.ctrl());
        let ev = t.read_event();
        assert!(!ev.modifiers.ctrl());
    }

    #[test]
    fn extended_arrow_resolves_to_special() {
        let q = queue(&[0xE0, 0x6B]);
        let mut t = KeyTranslator::new(&q);
        assert_eq!(t.read_next(), special::ARROW_LEFT);
    }

    #[test]
    fn sequence_layer_classifies_prefixes() {
        let q = queue(&[0xE0, 0x75, 0xF0, 0x75, 0xE0, 0xF0, 0x75]);
        let mut t = KeyTranslator::new(&q);
        assert_eq!(t.read_sequence(), KeyAction::press(0x75).extended());
        assert_eq!(t.read_sequence(), KeyAction::release(0x75));
        assert_eq!(t.read_sequence(), KeyAction::release(0x75).extended());
    }

    #[test]
    fn try_read_resumes_a_split_sequence() {
        let q = InputQueue::with_capacity(8).unwrap();
        let mut t = KeyTranslator::new(&q);
        assert_eq!(t.try_read_next(), None);

        q.enqueue(LSHIFT);
        q.enqueue(0xE0);
        assert_eq!(t.try_read_next(), None);
        assert!(t.modifiers().shift());

        q.enqueue(0x74);
        assert_eq!(t.try_read_next(), Some(special::ARROW_RIGHT));
    }

    #[test]
    fn try_read_next_skips_to_first_press() {
        let q = queue(&[0xF0, ONE, CAPS, A]);
        let mut t = KeyTranslator::new(&q);
        assert_eq!(t.try_read_next(), Some(b'A'));
        assert_eq!(t.try_read_next(), None);
    }

    #[test]
    fn reset_clears_modifiers() {
        let q = queue(&[LSHIFT, CAPS, A]);
        let mut t = KeyTranslator::new(&q);
        t.read_next();
        t.reset();
        assert!(t.modifiers().is_empty());
    }

    #[test]
    fn translators_keep_independent_state() {
        let q1 = queue(&[LSHIFT, A]);
        let q2 = queue(&[A]);
        let mut t1 = KeyTranslator::new(&q1);
        let mut t2 = KeyTranslator::new(&q2);
        assert_eq!(t1.read_next(), b'A');
        assert_eq!(t2.read_next(), b'a');
    }

    #[test]
    fn raw_scancodes_pass_through() {
        let q = queue(&[0xAA]);
        let mut t = KeyTranslator::new(&q);
        assert_eq!(t.try_read_scancode(), Some(0xAA));
        assert_eq!(t.try_read_scancode(), None);
    }
}
