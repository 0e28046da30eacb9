//! Scancode sequence reassembly.
//!
//! ```text
//! PLAIN       := byte
//! RELEASE     := F0 byte
//! EXT_PRESS   := E0 byte          (byte != F0)
//! EXT_RELEASE := E0 F0 byte
//! ```
//!
//! The parser consumes one byte at a time and remembers a partial prefix
//! between calls, so a non-blocking reader can stop mid-sequence and pick up
//! where it left off.

use crate::devices::input::events::KeyAction;
use crate::devices::input::keymap::{EXTENDED_PREFIX, RELEASE_PREFIX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Start,
    Release,
    Extended,
    ExtendedRelease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequenceParser {
    state: State,
}

impl SequenceParser {
    pub const fn new() -> Self {
        Self {
            state: State::Start,
        }
    }

    /// True when no prefix byte is waiting for its keycode.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == State::Start
    }

    pub fn reset(&mut self) {
        self.state = State::Start;
    }

    /// Feed one scancode byte; returns an action once a sequence completes.
    pub fn feed(&mut self, byte: u8) -> Option<KeyAction> {
        let (next, action) = match (self.state, byte) {
            (State::Start, RELEASE_PREFIX) => (State::Release, None),
            (State::Start, EXTENDED_PREFIX) => (State::Extended, None),
            (State::Start, code) => (State::Start, Some(KeyAction::press(code))),
            (State::Release, code) => (State::Start, Some(KeyAction::release(code))),
            (State::Extended, RELEASE_PREFIX) => (State::ExtendedRelease, None),
            (State::Extended, code) => (State::Start, Some(KeyAction::press(code).extended())),
            (State::ExtendedRelease, code) => {
                (State::Start, Some(KeyAction::release(code).extended()))
            }
        };
        self.state = next;
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::input::events::KeyKind;

    fn parse(bytes: &[u8]) -> Vec<KeyAction> {
        let mut parser = SequenceParser::new();
        bytes.iter().filter_map(|&b| parser.feed(b)).collect()
    }

    #[test]
    fn plain_press() {
        assert_eq!(parse(&[0x1C]), vec![KeyAction::press(0x1C)]);
    }

    #[test]
    fn release_extended_press_and_extended_release_are_distinct() {
        let release = parse(&[0xF0, 0x75]);
        let ext_press = parse(&[0xE0, 0x75]);
        let ext_release = parse(&[0xE0, 0xF0, 0x75]);

        assert_eq!(release, vec![KeyAction::release(0x75)]);
        assert_eq!(ext_press, vec![KeyAction::press(0x75).extended()]);
        assert_eq!(ext_release, vec![KeyAction::release(0x75).extended()]);

        assert_eq!(ext_press[0].kind, KeyKind::Press);
        assert_eq!(ext_release[0].kind, KeyKind::Release);
        assert_eq!(ext_release[0].keycode, 0x75);
        assert_ne!(release, ext_release);
    }

    #[test]
    fn mixed_stream() {
        let actions = parse(&[0x12, 0x1C, 0xF0, 0x1C, 0xF0, 0x12, 0xE0, 0x6B]);
        assert_eq!(
            actions,
            vec![
                KeyAction::press(0x12),
                KeyAction::press(0x1C),
                KeyAction::release(0x1C),
                KeyAction::release(0x12),
                KeyAction::press(0x6B).extended(),
            ]
        );
    }

    #[test]
    fn partial_prefix_survives_between_feeds() {
        let mut parser = SequenceParser::new();
        assert_eq!(parser.feed(0xE0), None);
        assert!(!parser.is_idle());
        assert_eq!(parser.feed(0xF0), None);
        assert_eq!(parser.feed(0x74), Some(KeyAction::release(0x74).extended()));
        assert!(parser.is_idle());
    }
}
