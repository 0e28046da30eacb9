//! # PS/2 Input Stack
//!
//! Bare-metal PS/2 keyboard pipeline for a single-board computer:
//!
//! ```text
//! ┌────────────┐ falling  ┌──────────────┐  byte   ┌────────────┐  byte   ┌───────────────┐
//! │ EdgeSource │─────────▶│ FrameDecoder │────────▶│ InputQueue │────────▶│ KeyTranslator │──▶ char
//! │  (GPIO)    │  edge    │ (interrupt)  │         │   (SPSC)   │         │ (foreground)  │
//! └────────────┘          └──────────────┘         └────────────┘         └───────────────┘
//! ```
//!
//! - `core`: GPIO collaborator contract, handler tables, logging, bring-up status
//! - `devices::drivers::ps2`: frame decoding, the hand-off queue, the device record
//! - `devices::input`: scancode sequences, modifiers, keymap, the `Keyboard` facade

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod core;
pub mod devices;

pub use crate::core::gpio::{EdgeHandler, EdgeSource, GpioError, Level, Pin, SimulatedGpio};
pub use crate::core::kernel::init_keyboard;
pub use crate::devices::drivers::ps2::{
    FrameDecoder, FrameStep, InputQueue, PolledReceiver, Ps2Config, Ps2Device, Ps2Error,
    Ps2Result, Ps2Stats, SimulatedKeyboard,
};
pub use crate::devices::input::{
    keymap, KeyAction, KeyDescriptor, KeyEvent, KeyKind, KeyRole, KeyTranslator, Keyboard,
    Modifiers, ScancodeSource, SequenceParser,
};
