//! Keyboard facade: one PS/2 device plus its translator.
//!
//! ```ignore
//! let mut keyboard = Keyboard::new(&GPIO, Ps2Config::default())?;
//! loop {
//!     let ch = keyboard.read_next();
//!     shell.feed(ch);
//! }
//! ```

use alloc::sync::Arc;

use crate::core::gpio::EdgeSource;
use crate::devices::drivers::ps2::{Ps2Config, Ps2Device, Ps2Result, Ps2Stats};
use crate::devices::input::events::{KeyAction, KeyEvent};
use crate::devices::input::modifiers::Modifiers;
use crate::devices::input::translator::KeyTranslator;

pub struct Keyboard {
    device: Arc<Ps2Device>,
    translator: KeyTranslator<Arc<Ps2Device>>,
}

impl Keyboard {
    /// Bring up a PS/2 device on `config`'s pins and attach a translator.
    pub fn new(gpio: &dyn EdgeSource, config: Ps2Config) -> Ps2Result<Self> {
        Ok(Self::from_device(Ps2Device::new(gpio, config)?))
    }

    pub fn from_device(device: Arc<Ps2Device>) -> Self {
        Self {
            translator: KeyTranslator::new(device.clone()),
            device,
        }
    }

    pub fn device(&self) -> &Arc<Ps2Device> {
        &self.device
    }

    pub fn stats(&self) -> Ps2Stats {
        self.device.stats()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.translator.modifiers()
    }

    /// Discard everything typed so far: queued bytes, a partial frame, a
    /// half-read prefix and the modifier state.
    pub fn flush(&mut self) {
        self.device.flush();
        self.translator.reset();
    }

    pub fn read_scancode(&mut self) -> u8 {
        self.translator.read_scancode()
    }

    pub fn try_read_scancode(&mut self) -> Option<u8> {
        self.translator.try_read_scancode()
    }

    pub fn read_sequence(&mut self) -> KeyAction {
        self.translator.read_sequence()
    }

    pub fn try_read_sequence(&mut self) -> Option<KeyAction> {
        self.translator.try_read_sequence()
    }

    pub fn read_event(&mut self) -> KeyEvent {
        self.translator.read_event()
    }

    pub fn try_read_event(&mut self) -> Option<KeyEvent> {
        self.translator.try_read_event()
    }

    /// Block until a non-modifier key is pressed and return its character.
    pub fn read_next(&mut self) -> u8 {
        self.translator.read_next()
    }

    pub fn try_read_next(&mut self) -> Option<u8> {
        self.translator.try_read_next()
    }
}
