//! Keyboard side of a simulated PS/2 link.
//!
//! Lets a [`SimulatedGpio`] act as the device end of the cable: each byte is
//! clocked out as a full 11-bit frame, one bit per falling edge.

use crate::core::gpio::{Pin, SimulatedGpio};
use crate::devices::drivers::ps2::frame::encode_frame;

pub trait SimulatedKeyboard {
    /// Clock out a correctly framed byte (start, data LSB first, odd parity, stop).
    fn send_byte(&self, clock: Pin, data: Pin, byte: u8);

    fn send_bytes(&self, clock: Pin, data: Pin, bytes: &[u8]) {
        for &byte in bytes {
            self.send_byte(clock, data, byte);
        }
    }
}

impl SimulatedKeyboard for SimulatedGpio {
    fn send_byte(&self, clock: Pin, data: Pin, byte: u8) {
        self.clock_bits(clock, data, &encode_frame(byte));
    }
}
