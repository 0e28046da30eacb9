use crate::core::gpio::Pin;
use crate::devices::drivers::ps2::error::{Ps2Error, Ps2Result};

/// Default keyboard clock line.
pub const KEYBOARD_CLOCK: Pin = Pin(3);
/// Default keyboard data line.
pub const KEYBOARD_DATA: Pin = Pin(4);
/// Default hand-off queue size in bytes.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Wiring and sizing for one PS/2 device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ps2Config {
    pub clock: Pin,
    pub data: Pin,
    pub queue_capacity: usize,
}

impl Ps2Config {
    pub const fn new(clock: Pin, data: Pin) -> Self {
        Self {
            clock,
            data,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    pub const fn with_pins(self, clock: Pin, data: Pin) -> Self {
        Self { clock, data, ..self }
    }

    pub const fn with_queue_capacity(self, queue_capacity: usize) -> Self {
        Self {
            queue_capacity,
            ..self
        }
    }

    pub fn validate(&self) -> Ps2Result<()> {
        if !self.clock.is_valid() {
            return Err(Ps2Error::InvalidPin(self.clock));
        }
        if !self.data.is_valid() {
            return Err(Ps2Error::InvalidPin(self.data));
        }
        if self.clock == self.data {
            return Err(Ps2Error::SamePin(self.clock));
        }
        if self.queue_capacity == 0 {
            return Err(Ps2Error::InvalidCapacity);
        }
        Ok(())
    }
}

impl Default for Ps2Config {
    fn default() -> Self {
        Self::new(KEYBOARD_CLOCK, KEYBOARD_DATA)
    }
}
