use log::{debug, error, info};

use crate::core::gpio::EdgeSource;
use crate::core::kernel::status::{
    components_ready, get_all_statuses, register_component, update_component_status, InitStatus,
};
use crate::devices::drivers::ps2::{Ps2Config, Ps2Device, Ps2Error, Ps2Result};
use crate::devices::input::Keyboard;

pub const PS2_DEVICE: &str = "PS/2 Device";
pub const KEYBOARD: &str = "Keyboard";

/// Bring up the keyboard in tracked phases.
///
/// Any failure (bad wiring, no memory for the queue, clock pin already
/// claimed) aborts keyboard initialization and is returned to the caller.
pub fn init_keyboard(gpio: &dyn EdgeSource, config: Ps2Config) -> Ps2Result<Keyboard> {
    register_component(PS2_DEVICE);
    register_component(KEYBOARD);

    let device = init_phase(PS2_DEVICE, || Ps2Device::new(gpio, config))?;
    let keyboard = init_phase(KEYBOARD, || Ok(Keyboard::from_device(device)))?;

    for component in get_all_statuses() {
        debug!("  {}: {}", component.name, component.status);
    }
    if components_ready(&[PS2_DEVICE, KEYBOARD]) {
        info!("keyboard ready on {} / {}", config.clock, config.data);
    }
    Ok(keyboard)
}

/// Run one named bring-up step, recording its outcome.
pub fn init_phase<T, F>(name: &'static str, init_fn: F) -> Ps2Result<T>
where
    F: FnOnce() -> Ps2Result<T>,
{
    update_component_status(name, InitStatus::InProgress);
    info!("initializing {}...", name);

    match init_fn() {
        Ok(value) => {
            update_component_status(name, InitStatus::Completed);
            info!("{} initialized", name);
            Ok(value)
        }
        Err(e) => {
            update_component_status(name, e.into());
            error!("{} failed: {}", name, e);
            Err(e)
        }
    }
}

impl From<Ps2Error> for InitStatus {
    fn from(e: Ps2Error) -> Self {
        InitStatus::Failed(e.as_str())
    }
}
