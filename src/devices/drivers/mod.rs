//! Device Drivers
//!
//! - PS/2 (keyboard on GPIO clock/data lines)

pub mod ps2;

pub use ps2::{InputQueue, Ps2Config, Ps2Device, Ps2Error, Ps2Result, Ps2Stats};
