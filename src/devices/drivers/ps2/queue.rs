//! # Scancode Hand-off Queue
//!
//! Lock-free single-producer / single-consumer ring between the edge
//! interrupt (producer) and the foreground reader (consumer).
//!
//! ```text
//!            producer (IRQ)                    consumer (foreground)
//!                 │ writes slot, then            │ reads slot, then
//!                 │ publishes `tail`             │ publishes `head`
//!                 ▼                              ▼
//!   ┌────┬────┬────┬────┬────┬────┬────┬────┐
//!   │    │ 5  │ 9  │ 1c │    │    │    │    │   count = tail - head (mod 2N)
//!   └────┴────┴────┴────┴────┴────┴────┴────┘
//!          head            tail
//! ```
//!
//! `head` and `tail` run over `0..2N` for a capacity of `N` and are reduced
//! modulo `N` to pick a slot. The doubled range tells a full ring from an
//! empty one, so every slot is usable, and the indices never overflow
//! whatever `N` is. Only the producer stores `tail` and only the consumer
//! stores `head`. When the ring is full the producer drops the new byte and
//! bumps `dropped`; an interrupt handler cannot wait for space.
//!
//! Storage is allocated once, up front; no operation allocates afterwards.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU32, AtomicU8, AtomicUsize, Ordering};

use crate::devices::drivers::ps2::error::{Ps2Error, Ps2Result};

pub struct InputQueue {
    buf: Box<[AtomicU8]>,
    head: AtomicUsize,
    tail: AtomicUsize,
    dropped: AtomicU32,
}

impl InputQueue {
    /// Allocate a queue holding up to `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Ps2Result<Self> {
        if capacity == 0 || capacity > usize::MAX / 2 {
            return Err(Ps2Error::InvalidCapacity);
        }
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| Ps2Error::OutOfMemory)?;
        buf.extend((0..capacity).map(|_| AtomicU8::new(0)));

        Ok(Self {
            buf: buf.into_boxed_slice(),
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            dropped: AtomicU32::new(0),
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    fn span(&self) -> usize {
        2 * self.buf.len()
    }

    #[inline]
    fn distance(&self, head: usize, tail: usize) -> usize {
        if tail >= head {
            tail - head
        } else {
            tail + self.span() - head
        }
    }

    #[inline]
    fn advance(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.span() {
            0
        } else {
            next
        }
    }

    #[inline]
    fn slot(&self, index: usize) -> &AtomicU8 {
        &self.buf[index % self.buf.len()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        // head first: the tail seen afterwards can only be further along
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        self.distance(head, tail)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Bytes thrown away because the ring was full.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Producer side. Returns `false` (and counts the loss) when full.
    #[inline]
    pub fn enqueue(&self, byte: u8) -> bool {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        if self.distance(head, tail) >= self.buf.len() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        self.slot(tail).store(byte, Ordering::Relaxed);
        self.tail.store(self.advance(tail), Ordering::Release);
        true
    }

    /// Consumer side, non-blocking.
    pub fn try_dequeue(&self) -> Option<u8> {
        loop {
            let head = self.head.load(Ordering::Relaxed);
            let tail = self.tail.load(Ordering::Acquire);
            if head == tail {
                return None;
            }
            let byte = self.slot(head).load(Ordering::Relaxed);
            // a second reader racing us loses the CAS and retries
            if self
                .head
                .compare_exchange(head, self.advance(head), Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
            {
                return Some(byte);
            }
        }
    }

    /// Consumer side, spins until a byte is available.
    pub fn dequeue(&self) -> u8 {
        loop {
            if let Some(byte) = self.try_dequeue() {
                return byte;
            }
            core::hint::spin_loop();
        }
    }
}

impl core::fmt::Debug for InputQueue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InputQueue")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("dropped", &self.dropped())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn preserves_fifo_order() {
        let q = InputQueue::with_capacity(8).unwrap();
        assert!(q.enqueue(5));
        assert!(q.enqueue(9));
        assert_eq!(q.dequeue(), 5);
        assert_eq!(q.dequeue(), 9);
        assert!(q.is_empty());
    }

    #[test]
    fn odd_capacity_stays_ordered_across_many_laps() {
        let q = InputQueue::with_capacity(3).unwrap();
        let mut next_in = 0u8;
        let mut next_out = 0u8;
        for round in 0..1000usize {
            let burst = round % 3 + 1;
            for _ in 0..burst {
                assert!(q.enqueue(next_in));
                next_in = next_in.wrapping_add(1);
            }
            assert_eq!(q.len(), burst);
            assert_eq!(q.is_full(), burst == 3);
            for _ in 0..burst {
                assert_eq!(q.try_dequeue(), Some(next_out));
                next_out = next_out.wrapping_add(1);
            }
            assert!(q.is_empty());
        }
        assert_eq!(q.dropped(), 0);
    }

    #[test]
    fn empty_queue_yields_nothing() {
        let q = InputQueue::with_capacity(4).unwrap();
        assert_eq!(q.try_dequeue(), None);
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn full_queue_drops_newest_and_counts() {
        let q = InputQueue::with_capacity(3).unwrap();
        assert!(q.enqueue(1));
        assert!(q.enqueue(2));
        assert!(q.enqueue(3));
        assert!(q.is_full());
        assert!(!q.enqueue(4));
        assert!(!q.enqueue(5));
        assert_eq!(q.dropped(), 2);
        assert_eq!(q.len(), 3);

        assert_eq!(q.try_dequeue(), Some(1));
        assert!(q.enqueue(6));
        assert_eq!(q.try_dequeue(), Some(2));
        assert_eq!(q.try_dequeue(), Some(3));
        assert_eq!(q.try_dequeue(), Some(6));
        assert_eq!(q.try_dequeue(), None);
    }

    #[test]
    fn indices_wrap_around_capacity() {
        let q = InputQueue::with_capacity(4).unwrap();
        for round in 0..50u8 {
            assert!(q.enqueue(round));
            assert!(q.enqueue(round.wrapping_add(100)));
            assert_eq!(q.try_dequeue(), Some(round));
            assert_eq!(q.try_dequeue(), Some(round.wrapping_add(100)));
        }
        assert_eq!(q.dropped(), 0);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(InputQueue::with_capacity(0).err(), Some(Ps2Error::InvalidCapacity));
    }

    #[test]
    fn blocking_dequeue_waits_for_producer() {
        let q = Arc::new(InputQueue::with_capacity(16).unwrap());
        let producer = {
            let q = q.clone();
            thread::spawn(move || {
                for b in 0..200u8 {
                    while !q.enqueue(b) {
                        thread::yield_now();
                    }
                }
            })
        };
        for expected in 0..200u8 {
            assert_eq!(q.dequeue(), expected);
        }
        producer.join().unwrap();
    }
}
