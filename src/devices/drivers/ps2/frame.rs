//! # PS/2 Frame Decoder
//!
//! One device-to-host transmission is an 11-bit frame, one bit per falling
//! clock edge:
//!
//! ```text
//!  slot:   0      1  2  3  4  5  6  7  8     9        10
//!        ┌─────┬──────────────────────────┬────────┬──────┐
//!        │start│ d0 d1 d2 d3 d4 d5 d6 d7  │ parity │ stop │
//!        │  0  │   LSB first              │  odd   │  1   │
//!        └─────┴──────────────────────────┴────────┴──────┘
//! ```
//!
//! Parity is odd: the ones across d0..d7 plus the parity bit must total an
//! odd number. A frame that fails parity is dropped on the spot; a frame with
//! a bad stop bit is dropped at slot 10. Either way the decoder is back at
//! slot 0 waiting for a start bit, so a corrupted keystroke costs exactly one
//! byte.

/// Outcome of feeding one bit to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// Waiting for a start bit; a 1 here is line noise
    Idle,
    /// Bit accepted, frame in progress
    Absorbed,
    /// Frame complete and valid
    Byte(u8),
    /// Parity check failed, frame discarded
    ParityError,
    /// Stop bit was 0, frame discarded
    StopBitError,
}

/// Accumulator for one frame under construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameDecoder {
    code: u8,
    position: u8,
    ones: u8,
}

impl FrameDecoder {
    pub const START_SLOT: u8 = 0;
    pub const PARITY_SLOT: u8 = 9;
    pub const STOP_SLOT: u8 = 10;

    pub const fn new() -> Self {
        Self {
            code: 0,
            position: 0,
            ones: 0,
        }
    }

    /// Slot the next bit will fill (0..=10).
    #[inline]
    pub const fn position(&self) -> u8 {
        self.position
    }

    /// Data bits gathered so far in the current frame.
    #[inline]
    pub const fn partial(&self) -> u8 {
        self.code
    }

    #[inline]
    pub const fn is_idle(&self) -> bool {
        self.position == Self::START_SLOT
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Pack the accumulator into one word so it can live in an atomic.
    #[inline]
    pub const fn to_bits(self) -> u32 {
        self.code as u32 | (self.position as u32) << 8 | (self.ones as u32) << 16
    }

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            code: bits as u8,
            position: (bits >> 8) as u8,
            ones: (bits >> 16) as u8,
        }
    }

    /// Absorb the data-line sample taken on one falling clock edge.
    pub fn push_bit(&mut self, bit: u8) -> FrameStep {
        let bit = bit & 1;
        match self.position {
            Self::START_SLOT => {
                if bit == 0 {
                    self.position = 1;
                    FrameStep::Absorbed
                } else {
                    FrameStep::Idle
                }
            }
            1..=8 => {
                self.code |= bit << (self.position - 1);
                self.ones += bit;
                self.position += 1;
                FrameStep::Absorbed
            }
            Self::PARITY_SLOT => {
                if (self.ones + bit) % 2 == 0 {
                    self.reset();
                    FrameStep::ParityError
                } else {
                    self.position = Self::STOP_SLOT;
                    FrameStep::Absorbed
                }
            }
            _ => {
                let code = self.code;
                self.reset();
                if bit == 1 {
                    FrameStep::Byte(code)
                } else {
                    FrameStep::StopBitError
                }
            }
        }
    }
}

/// Parity bit that makes `byte` plus parity carry an odd number of ones.
#[inline]
pub const fn odd_parity_bit(byte: u8) -> u8 {
    if byte.count_ones() % 2 == 0 {
        1
    } else {
        0
    }
}

/// The 11 line samples a device sends for `byte`.
pub const fn encode_frame(byte: u8) -> [u8; 11] {
    let mut bits = [0u8; 11];
    let mut i = 0;
    while i < 8 {
        bits[1 + i] = (byte >> i) & 1;
        i += 1;
    }
    bits[9] = odd_parity_bit(byte);
    bits[10] = 1;
    bits
}
