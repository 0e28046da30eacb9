//! Device Subsystem
//!
//! - `drivers`: PS/2 line protocol, hand-off queue and device record
//! - `input`: scancode sequences, modifiers, keymap and the keyboard facade

pub mod drivers;
pub mod input;
