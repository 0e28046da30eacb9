//! # PS/2 Device Driver
//!
//! Bit-level receive side of the PS/2 protocol on two GPIO lines.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐ falling edge ┌──────────────┐         ┌──────────────┐
//! │ Clock line  │─────────────▶│ FrameDecoder │────────▶│  InputQueue  │───▶ read()
//! │ Data line   │  sample bit  │  (11 slots)  │  byte   │ (SPSC ring)  │
//! └─────────────┘              └──────────────┘         └──────────────┘
//!        interrupt context ◀────────────────────────────┼──▶ foreground
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let dev = Ps2Device::new(&GPIO, Ps2Config::default())?;
//! loop {
//!     let scancode = dev.read();
//!     // ...
//! }
//! ```

pub mod config;
pub mod device;
pub mod error;
pub mod frame;
pub mod polled;
pub mod queue;
pub mod sim;

pub use config::{Ps2Config, DEFAULT_QUEUE_CAPACITY, KEYBOARD_CLOCK, KEYBOARD_DATA};
pub use device::{Ps2Device, Ps2Stats};
pub use error::{Ps2Error, Ps2Result};
pub use frame::{encode_frame, odd_parity_bit, FrameDecoder, FrameStep};
pub use polled::PolledReceiver;
pub use queue::InputQueue;
pub use sim::SimulatedKeyboard;
