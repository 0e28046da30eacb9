//! Interrupt-free receive path.
//!
//! Spins on the clock line instead of waiting for an edge interrupt: a falling
//! edge is "clock seen high, then seen low". Useful during board bring-up
//! before the GPIO interrupt controller is configured. Bits that arrive while
//! the caller is not spinning are lost, so a frame in flight when `read_byte`
//! is first called is usually dropped by the parity/stop checks.

use crate::core::gpio::{EdgeSource, Level, Pin};
use crate::devices::drivers::ps2::frame::{FrameDecoder, FrameStep};

pub struct PolledReceiver<'a> {
    gpio: &'a dyn EdgeSource,
    clock: Pin,
    data: Pin,
    decoder: FrameDecoder,
}

impl<'a> PolledReceiver<'a> {
    pub fn new(gpio: &'a dyn EdgeSource, clock: Pin, data: Pin) -> Self {
        Self {
            gpio,
            clock,
            data,
            decoder: FrameDecoder::new(),
        }
    }

    fn wait_for_falling_edge(&self) {
        while self.gpio.read_level(self.clock) == Level::Low {
            core::hint::spin_loop();
        }
        while self.gpio.read_level(self.clock) == Level::High {
            core::hint::spin_loop();
        }
    }

    fn read_bit(&mut self) -> FrameStep {
        self.wait_for_falling_edge();
        let bit = self.gpio.read_level(self.data).bit();
        self.decoder.push_bit(bit)
    }

    /// Block until a well-formed frame arrives; malformed frames are skipped.
    pub fn read_byte(&mut self) -> u8 {
        loop {
            if let FrameStep::Byte(byte) = self.read_bit() {
                return byte;
            }
        }
    }
}
