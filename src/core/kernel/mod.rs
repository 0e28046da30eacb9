//! # Input Bring-up
//!
//! Runs keyboard initialization as named phases and records each phase's
//! status so a boot console can show what came up.
//!
//! ## Submodules
//!
//! - `init`: the keyboard bring-up sequence
//! - `status`: component status table
//!
//! ## Example
//!
//! ```ignore
//! let keyboard = init_keyboard(&GPIO, Ps2Config::default())?;
//! for c in get_all_statuses() {
//!     println!("{}: {}", c.name, c.status);
//! }
//! ```

pub mod init;
pub mod status;

pub use init::{init_keyboard, init_phase};
pub use status::{
    component_status, components_ready, get_all_statuses, register_component,
    update_component_status, ComponentStatus, InitStatus,
};
