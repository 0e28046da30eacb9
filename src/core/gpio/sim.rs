//! Software GPIO bank.
//!
//! Models the parts of the board the PS/2 driver relies on: line levels,
//! pull-ups, falling-edge latches, a global interrupt enable and the handler
//! table. Driving a line low while its edge detection is enabled latches a
//! pending event; if interrupts are enabled and the event was not already
//! pending, the bound handler runs synchronously, just as the real vector
//! would preempt the foreground. An edge that arrives while the previous one
//! is still unacknowledged is merged into it and never dispatched.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use crate::core::gpio::{EdgeHandler, EdgeSource, GpioError, Level, Pin};
use crate::core::interrupts::HandlerTable;

pub struct SimulatedGpio {
    levels: AtomicU64,
    pullups: AtomicU64,
    edge_enabled: AtomicU64,
    pending: AtomicU64,
    interrupts_enabled: AtomicBool,
    handlers: HandlerTable,
    dispatched: AtomicUsize,
    acknowledged: AtomicUsize,
}

#[inline]
fn mask(pin: Pin) -> u64 {
    1u64 << pin.number()
}

fn check(pin: Pin) -> Result<(), GpioError> {
    if pin.is_valid() {
        Ok(())
    } else {
        Err(GpioError::InvalidPin(pin))
    }
}

impl SimulatedGpio {
    pub const fn new() -> Self {
        Self {
            levels: AtomicU64::new(0),
            pullups: AtomicU64::new(0),
            edge_enabled: AtomicU64::new(0),
            pending: AtomicU64::new(0),
            interrupts_enabled: AtomicBool::new(false),
            handlers: HandlerTable::new(),
            dispatched: AtomicUsize::new(0),
            acknowledged: AtomicUsize::new(0),
        }
    }

    /// Drive `pin` to `level`, latching and dispatching a falling edge if one occurs.
    pub fn set_level(&self, pin: Pin, level: Level) {
        if !pin.is_valid() {
            return;
        }
        let bit = mask(pin);
        let previous = match level {
            Level::High => self.levels.fetch_or(bit, Ordering::SeqCst),
            Level::Low => self.levels.fetch_and(!bit, Ordering::SeqCst),
        };
        let fell = previous & bit != 0 && level == Level::Low;
        if !fell || self.edge_enabled.load(Ordering::SeqCst) & bit == 0 {
            return;
        }
        let was_pending = self.pending.fetch_or(bit, Ordering::SeqCst) & bit != 0;
        if !was_pending && self.interrupts_enabled.load(Ordering::SeqCst) {
            self.dispatched.fetch_add(1, Ordering::SeqCst);
            self.handlers.dispatch(pin, self);
        }
    }

    /// One clock period: present `bit` on `data`, then pulse `clock` low and back high.
    pub fn clock_bit(&self, clock: Pin, data: Pin, bit: u8) {
        self.set_level(data, Level::from_bit(bit));
        self.set_level(clock, Level::Low);
        self.set_level(clock, Level::High);
    }

    /// Clock out an arbitrary bit sequence, one bit per falling edge.
    pub fn clock_bits(&self, clock: Pin, data: Pin, bits: &[u8]) {
        for &bit in bits {
            self.clock_bit(clock, data, bit);
        }
    }

    pub fn is_pending(&self, pin: Pin) -> bool {
        pin.is_valid() && self.pending.load(Ordering::SeqCst) & mask(pin) != 0
    }

    pub fn has_pullup(&self, pin: Pin) -> bool {
        pin.is_valid() && self.pullups.load(Ordering::SeqCst) & mask(pin) != 0
    }

    pub fn edge_detection_enabled(&self, pin: Pin) -> bool {
        pin.is_valid() && self.edge_enabled.load(Ordering::SeqCst) & mask(pin) != 0
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled.load(Ordering::SeqCst)
    }

    pub fn has_handler(&self, pin: Pin) -> bool {
        self.handlers.is_registered(pin)
    }

    /// Number of edges delivered to handlers.
    pub fn dispatched(&self) -> usize {
        self.dispatched.load(Ordering::SeqCst)
    }

    /// Number of `clear_event` calls.
    pub fn acknowledged(&self) -> usize {
        self.acknowledged.load(Ordering::SeqCst)
    }
}

impl Default for SimulatedGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeSource for SimulatedGpio {
    fn set_input_pullup(&self, pin: Pin) -> Result<(), GpioError> {
        check(pin)?;
        self.pullups.fetch_or(mask(pin), Ordering::SeqCst);
        // idle line floats high
        self.levels.fetch_or(mask(pin), Ordering::SeqCst);
        Ok(())
    }

    fn read_level(&self, pin: Pin) -> Level {
        if !pin.is_valid() {
            return Level::Low;
        }
        if self.levels.load(Ordering::SeqCst) & mask(pin) != 0 {
            Level::High
        } else {
            Level::Low
        }
    }

    fn enable_falling_edge(&self, pin: Pin) -> Result<(), GpioError> {
        check(pin)?;
        self.edge_enabled.fetch_or(mask(pin), Ordering::SeqCst);
        Ok(())
    }

    fn register_handler(&self, pin: Pin, handler: Arc<dyn EdgeHandler>) -> Result<(), GpioError> {
        self.handlers.register(pin, handler)
    }

    fn enable_interrupts(&self) {
        self.interrupts_enabled.store(true, Ordering::SeqCst);
    }

    fn clear_event(&self, pin: Pin) {
        if !pin.is_valid() {
            return;
        }
        self.acknowledged.fetch_add(1, Ordering::SeqCst);
        self.pending.fetch_and(!mask(pin), Ordering::SeqCst);
    }
}
