//! # GPIO Edge Handler Table
//!
//! One slot per header pin. A backend embeds a [`HandlerTable`], fills it from
//! [`EdgeSource::register_handler`](crate::core::gpio::EdgeSource::register_handler)
//! and calls [`HandlerTable::dispatch`] from its interrupt vector once it has
//! identified the pin with a pending event.
//!
//! ```text
//!   IRQ (GPIO bank) ──▶ backend finds pending pin ──▶ HandlerTable::dispatch(pin)
//!                                                          │
//!                                                          ▼
//!                                           EdgeHandler::on_falling_edge(source)
//! ```
//!
//! Each slot is set once and never cleared. `dispatch` only reads an
//! already-initialized slot, so an edge that interrupts a foreground
//! registration never waits on it.

use alloc::sync::Arc;

use spin::Once;

use crate::core::gpio::{EdgeHandler, EdgeSource, GpioError, Pin, GPIO_PIN_LAST};

const SLOTS: usize = GPIO_PIN_LAST as usize + 1;

pub struct HandlerTable {
    slots: [Once<Arc<dyn EdgeHandler>>; SLOTS],
}

impl HandlerTable {
    pub const fn new() -> Self {
        const EMPTY: Once<Arc<dyn EdgeHandler>> = Once::new();
        Self {
            slots: [EMPTY; SLOTS],
        }
    }

    pub fn register(&self, pin: Pin, handler: Arc<dyn EdgeHandler>) -> Result<(), GpioError> {
        if !pin.is_valid() {
            return Err(GpioError::InvalidPin(pin));
        }
        let mut bound = false;
        self.slots[pin.index()].call_once(|| {
            bound = true;
            handler
        });
        if bound {
            Ok(())
        } else {
            Err(GpioError::HandlerSlotTaken(pin))
        }
    }

    pub fn is_registered(&self, pin: Pin) -> bool {
        pin.is_valid() && self.slots[pin.index()].is_completed()
    }

    /// Run the handler bound to `pin`. Returns `false` when the pin has none.
    pub fn dispatch(&self, pin: Pin, source: &dyn EdgeSource) -> bool {
        if !pin.is_valid() {
            return false;
        }
        match self.slots[pin.index()].get() {
            Some(handler) => {
                handler.on_falling_edge(source);
                true
            }
            None => false,
        }
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::new()
    }
}
