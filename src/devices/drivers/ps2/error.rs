use core::fmt;

use crate::core::gpio::{GpioError, Pin};

/// PS/2 driver errors.
///
/// Only device construction can fail. Line-level faults (noise, parity,
/// stop bit, queue saturation) are absorbed by the decoder and show up in
/// [`Ps2Stats`](super::Ps2Stats), never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ps2Error {
    /// Heap could not provide the queue storage
    OutOfMemory,
    /// Queue capacity of zero
    InvalidCapacity,
    /// Pin number outside the header
    InvalidPin(Pin),
    /// Clock and data configured on the same pin
    SamePin(Pin),
    /// The clock pin already has a handler bound
    HandlerAlreadyRegistered(Pin),
}

impl Ps2Error {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutOfMemory => "PS/2 queue allocation failed",
            Self::InvalidCapacity => "PS/2 queue capacity must be non-zero",
            Self::InvalidPin(_) => "PS/2 pin out of range",
            Self::SamePin(_) => "PS/2 clock and data share a pin",
            Self::HandlerAlreadyRegistered(_) => "PS/2 clock pin already has a handler",
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            Self::OutOfMemory => 1,
            Self::InvalidCapacity => 2,
            Self::InvalidPin(_) => 3,
            Self::SamePin(_) => 4,
            Self::HandlerAlreadyRegistered(_) => 5,
        }
    }
}

impl fmt::Display for Ps2Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPin(pin) | Self::SamePin(pin) | Self::HandlerAlreadyRegistered(pin) => {
                write!(f, "{} ({})", self.as_str(), pin)
            }
            _ => f.write_str(self.as_str()),
        }
    }
}

impl From<GpioError> for Ps2Error {
    fn from(e: GpioError) -> Self {
        match e {
            GpioError::InvalidPin(pin) => Ps2Error::InvalidPin(pin),
            GpioError::HandlerSlotTaken(pin) => Ps2Error::HandlerAlreadyRegistered(pin),
        }
    }
}

pub type Ps2Result<T> = Result<T, Ps2Error>;
