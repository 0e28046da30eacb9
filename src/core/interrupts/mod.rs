//! # Interrupt Plumbing
//!
//! The board's interrupt controller belongs to the GPIO backend. This module
//! only provides the per-pin handler table a backend dispatches through.
//!
//! ## Context Rules
//!
//! | Context     | May do                                           |
//! |-------------|--------------------------------------------------|
//! | Interrupt   | decode one bit, enqueue a byte, clear the event  |
//! | Foreground  | dequeue bytes, translate, log                    |
//!
//! Nothing run from interrupt context allocates or waits.

pub mod dispatch;

pub use dispatch::HandlerTable;
