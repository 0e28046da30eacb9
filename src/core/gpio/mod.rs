//! # GPIO Collaborator Contract
//!
//! The PS/2 driver never touches GPIO registers itself. Everything it needs
//! from the board is expressed by [`EdgeSource`]:
//!
//! | Operation                 | Used by                              |
//! |---------------------------|--------------------------------------|
//! | `set_input_pullup`        | device construction (clock + data)   |
//! | `read_level`              | decoder (data line), polled receiver |
//! | `enable_falling_edge`     | device construction (clock)          |
//! | `register_handler`        | device construction (clock)          |
//! | `enable_interrupts`       | device construction                  |
//! | `clear_event`             | decoder, after every edge            |
//!
//! A board backend owns the registers and the interrupt dispatch; when a
//! falling edge is latched on a pin with a registered [`EdgeHandler`], the
//! backend calls [`EdgeHandler::on_falling_edge`] with itself as the source.

use alloc::sync::Arc;
use core::fmt;

mod sim;

pub use sim::SimulatedGpio;

/// Highest pin number on the board header (BCM numbering).
pub const GPIO_PIN_LAST: u32 = 53;

/// GPIO pin number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin(pub u32);

impl Pin {
    pub const fn new(n: u32) -> Self {
        Pin(n)
    }

    pub const fn number(self) -> u32 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 <= GPIO_PIN_LAST
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

/// Logic level of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }

    #[inline]
    pub const fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 {
            Level::Low
        } else {
            Level::High
        }
    }
}

/// Errors reported by a GPIO backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Pin number beyond [`GPIO_PIN_LAST`]
    InvalidPin(Pin),
    /// A handler is already bound to this pin
    HandlerSlotTaken(Pin),
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpioError::InvalidPin(pin) => write!(f, "invalid pin {}", pin),
            GpioError::HandlerSlotTaken(pin) => write!(f, "handler already registered on {}", pin),
        }
    }
}

/// Callback bound to one device, run from interrupt context on a falling edge.
///
/// Implementations must finish in bounded time, must not allocate and must
/// not block. They are responsible for acknowledging the event through
/// [`EdgeSource::clear_event`].
pub trait EdgeHandler: Send + Sync {
    fn on_falling_edge(&self, source: &dyn EdgeSource);
}

/// Board GPIO + edge interrupt controller.
pub trait EdgeSource: Sync {
    /// Configure `pin` as an input with the pull-up enabled.
    fn set_input_pullup(&self, pin: Pin) -> Result<(), GpioError>;

    /// Current logic level of `pin`.
    fn read_level(&self, pin: Pin) -> Level;

    /// Latch high→low transitions on `pin` as events.
    fn enable_falling_edge(&self, pin: Pin) -> Result<(), GpioError>;

    /// Bind `handler` to the events of `pin`.
    fn register_handler(&self, pin: Pin, handler: Arc<dyn EdgeHandler>) -> Result<(), GpioError>;

    /// Globally enable delivery of GPIO interrupts.
    fn enable_interrupts(&self);

    /// Acknowledge the pending event on `pin` so the next edge can be latched.
    fn clear_event(&self, pin: Pin);
}
