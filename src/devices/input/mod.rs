//! # Keyboard Input
//!
//! Turns the raw scancode stream of a PS/2 device into characters.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌──────────────────┐    ┌──────────┐
//! │ InputQueue   │───▶│ SequenceParser   │───▶│ modifier absorb  │───▶│ keymap + │──▶ u8
//! │ (raw bytes)  │    │ F0 / E0 framing  │    │ SHIFT CTRL ALT   │    │ resolve  │
//! └──────────────┘    └──────────────────┘    │ CAPS (toggle)    │    └──────────┘
//!                                             └──────────────────┘
//! ```
//!
//! Modifier state belongs to each [`KeyTranslator`]; two translators over two
//! devices never see each other's shift or caps lock.

pub mod events;
pub mod keyboard;
pub mod keymap;
pub mod modifiers;
pub mod sequence;
pub mod translator;

pub use events::{resolve_char, KeyAction, KeyEvent, KeyKind};
pub use keyboard::Keyboard;
pub use keymap::{KeyDescriptor, KeyRole};
pub use modifiers::Modifiers;
pub use sequence::SequenceParser;
pub use translator::{KeyTranslator, ScancodeSource};
