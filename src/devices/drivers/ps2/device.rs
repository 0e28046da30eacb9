//! # PS/2 Device
//!
//! One record per physical peripheral. The record is shared between the
//! clock-pin interrupt handler, which owns the frame accumulator, and the
//! foreground, which only drains the queue.
//!
//! ## Edge Handling
//!
//! 1. Backend latches a falling edge on the clock pin and calls
//!    [`EdgeHandler::on_falling_edge`]
//! 2. The handler samples the data pin and feeds the bit to the decoder
//! 3. A completed frame is pushed onto the [`InputQueue`]
//! 4. The edge is acknowledged so the next one can be latched
//!
//! The frame accumulator is written only by the handler. The foreground never
//! takes a lock the handler needs: [`Ps2Device::flush`] raises a reset
//! request that the handler honours on its next edge, and
//! [`Ps2Device::frame_position`] is a plain atomic load.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use log::{debug, info, trace};
use crate::core::gpio::{EdgeHandler, EdgeSource, Pin};
use crate::devices::drivers::ps2::config::Ps2Config;
use crate::devices::drivers::ps2::error::Ps2Result;
use crate::devices::drivers::ps2::frame::{FrameDecoder, FrameStep};
use crate::devices::drivers::ps2::queue::InputQueue;

/// Line statistics for one device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ps2Stats {
    /// Edges handled
    pub edges: u32,
    /// Frames decoded successfully
    pub frames: u32,
    /// Frames discarded on parity
    pub parity_errors: u32,
    /// Frames discarded on a 0 stop bit
    pub stop_bit_errors: u32,
    /// Good frames lost to a full queue
    pub queue_overflows: u32,
}

#[derive(Default)]
struct Counters {
    edges: AtomicU32,
    frames: AtomicU32,
    parity_errors: AtomicU32,
    stop_bit_errors: AtomicU32,
}

pub struct Ps2Device {
    clock: Pin,
    data: Pin,
    /// Packed [`FrameDecoder`], handler-owned
    decoder: AtomicU32,
    reset_requested: AtomicBool,
    queue: InputQueue,
    counters: Counters,
}

impl Ps2Device {
    /// Allocate the device, configure both lines and bind the clock-edge handler.
    pub fn new(gpio: &dyn EdgeSource, config: Ps2Config) -> Ps2Result<Arc<Self>> {
        let device = Arc::new(Self::detached(config)?);

        gpio.set_input_pullup(config.clock)?;
        gpio.set_input_pullup(config.data)?;
        gpio.enable_falling_edge(config.clock)?;
        gpio.register_handler(config.clock, device.clone())?;
        gpio.enable_interrupts();

        info!(
            "ps2: device on clock {} / data {}, {}-byte queue",
            config.clock, config.data, config.queue_capacity
        );
        Ok(device)
    }

    /// Allocate the device without touching any GPIO backend.
    pub fn detached(config: Ps2Config) -> Ps2Result<Self> {
        config.validate()?;
        Ok(Self {
            clock: config.clock,
            data: config.data,
            decoder: AtomicU32::new(FrameDecoder::new().to_bits()),
            reset_requested: AtomicBool::new(false),
            queue: InputQueue::with_capacity(config.queue_capacity)?,
            counters: Counters::default(),
        })
    }

    pub fn clock(&self) -> Pin {
        self.clock
    }

    pub fn data(&self) -> Pin {
        self.data
    }

    pub fn queue(&self) -> &InputQueue {
        &self.queue
    }

    /// Feed one data-line sample, as taken on a falling clock edge.
    pub fn handle_bit(&self, bit: u8) -> FrameStep {
        self.counters.edges.fetch_add(1, Ordering::Relaxed);
        let mut decoder = if self.reset_requested.swap(false, Ordering::Acquire) {
            FrameDecoder::new()
        } else {
            FrameDecoder::from_bits(self.decoder.load(Ordering::Relaxed))
        };
        let step = decoder.push_bit(bit);
        self.decoder.store(decoder.to_bits(), Ordering::Relaxed);
        match step {
            FrameStep::Byte(byte) => {
                self.counters.frames.fetch_add(1, Ordering::Relaxed);
                if self.queue.enqueue(byte) {
                    trace!("ps2: byte {:#04x}", byte);
                } else {
                    trace!("ps2: queue full, dropped {:#04x}", byte);
                }
            }
            FrameStep::ParityError => {
                self.counters.parity_errors.fetch_add(1, Ordering::Relaxed);
                trace!("ps2: parity error, frame dropped");
            }
            FrameStep::StopBitError => {
                self.counters.stop_bit_errors.fetch_add(1, Ordering::Relaxed);
                trace!("ps2: bad stop bit, frame dropped");
            }
            FrameStep::Idle | FrameStep::Absorbed => {}
        }
        step
    }

    /// Slot the decoder expects next (0 = waiting for a start bit).
    pub fn frame_position(&self) -> u8 {
        if self.reset_requested.load(Ordering::Acquire) {
            return FrameDecoder::START_SLOT;
        }
        FrameDecoder::from_bits(self.decoder.load(Ordering::Relaxed)).position()
    }

    /// Next scancode; spins while none is available.
    pub fn read(&self) -> u8 {
        self.queue.dequeue()
    }

    pub fn try_read(&self) -> Option<u8> {
        self.queue.try_dequeue()
    }

    /// Scancodes waiting in the queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn stats(&self) -> Ps2Stats {
        Ps2Stats {
            edges: self.counters.edges.load(Ordering::Relaxed),
            frames: self.counters.frames.load(Ordering::Relaxed),
            parity_errors: self.counters.parity_errors.load(Ordering::Relaxed),
            stop_bit_errors: self.counters.stop_bit_errors.load(Ordering::Relaxed),
            queue_overflows: self.queue.dropped(),
        }
    }

    /// Drop queued bytes and have the handler abandon any partial frame.
    pub fn flush(&self) {
        self.reset_requested.store(true, Ordering::Release);
        let mut discarded = 0usize;
        while self.queue.try_dequeue().is_some() {
            discarded += 1;
        }
        debug!("ps2: flushed {} queued bytes", discarded);
    }
}

impl EdgeHandler for Ps2Device {
    fn on_falling_edge(&self, source: &dyn EdgeSource) {
        let bit = source.read_level(self.data).bit();
        self.handle_bit(bit);
        source.clear_event(self.clock);
    }
}

impl core::fmt::Debug for Ps2Device {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ps2Device")
            .field("clock", &self.clock)
            .field("data", &self.data)
            .field("queue", &self.queue)
            .finish()
    }
}
