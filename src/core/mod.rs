//! # Core Infrastructure
//!
//! ## Submodules
//!
//! - `gpio`: the GPIO/edge-interrupt collaborator contract and a software backend
//! - `interrupts`: per-pin handler table used by backends to dispatch edges
//! - `kernel`: input bring-up phases and component status tracking
//! - `console`: `log` facade backend and the `println!` console macro
//!
//! ## Initialization Order
//!
//! 1. Console sink + logger
//! 2. GPIO backend (board specific, external)
//! 3. PS/2 device: pins, queue allocation, handler registration, interrupt enable
//! 4. Keyboard translator

pub mod console;
pub mod gpio;
pub mod interrupts;
pub mod kernel;
