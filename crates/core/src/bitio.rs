//! Bit-level I/O for the container body.
//!
//! The body is a sequence of 16-bit big-endian groups filled most significant
//! bit first. `BitWriter` packs bits into those groups and `BitReader` walks
//! them back one bit at a time.
//!
//! # Padding Rules
//! - BitWriter: left-justifies the final partial group and zero-fills the
//!   low-order bits, so the output is always a whole number of groups
//! - BitReader: cannot tell padding from data (caller must know how many
//!   symbols to decode)
//!
//! # Example
//! ```
//! use huffpix_core::bitio::{BitWriter, BitReader};
//!
//! let mut writer = BitWriter::new();
//! writer.write_slice(&[true, false, true]);
//! writer.write_slice(&[true, true]);
//! // Total: 10111 -> padded to 1011_1000_0000_0000
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1011_1000, 0b0000_0000]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert!(reader.read_bit().unwrap());
//! assert!(!reader.read_bit().unwrap());
//! assert_eq!(reader.bits_remaining(), 14);
//! ```

use crate::error::{BitIoError, Result};

/// Width of one packing group in bits.
pub const GROUP_BITS: usize = 16;

/// Writes bits MSB-first into 16-bit big-endian groups.
///
/// # Invariants
/// - `group_fill` is always < 16
/// - `bytes.len()` is always even
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed groups, already split into big-endian byte pairs
    bytes: Vec<u8>,
    /// Accumulator for the current group, filled from the low end
    group: u16,
    /// Number of bits in `group` (0-15)
    group_fill: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            group: 0,
            group_fill: 0,
        }
    }

    /// Writer with room for `bits` bits before reallocating.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(padded_len(bits) / 8),
            group: 0,
            group_fill: 0,
        }
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        self.group = (self.group << 1) | u16::from(bit);
        self.group_fill += 1;

        if self.group_fill == GROUP_BITS {
            self.bytes.extend_from_slice(&self.group.to_be_bytes());
            self.group = 0;
            self.group_fill = 0;
        }
    }

    /// Append every bit of a slice in order.
    pub fn write_slice(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.write_bit(bit);
        }
    }

    /// Finish writing and return the packed groups.
    ///
    /// A partial final group is shifted to the top of the group and its low
    /// bits are left as zeros.
    pub fn finish(mut self) -> Vec<u8> {
        if self.group_fill > 0 {
            let group = self.group << (GROUP_BITS - self.group_fill);
            self.bytes.extend_from_slice(&group.to_be_bytes());
        }
        self.bytes
    }

    /// Total number of data bits written (excluding padding).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.group_fill
    }

    /// Number of zero bits `finish` will append.
    pub fn padding_bits(&self) -> usize {
        padded_len(self.bit_len()) - self.bit_len()
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Round a bit count up to a whole number of groups.
pub fn padded_len(bits: usize) -> usize {
    bits.div_ceil(GROUP_BITS) * GROUP_BITS
}

/// Reads bits MSB-first from a packed body.
///
/// Reading byte by byte is equivalent to reading 16-bit big-endian groups, so
/// an odd trailing byte is still readable.
///
/// # Invariants
/// - `bit_position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` once every bit has been consumed.
    pub fn read_bit(&mut self) -> Result<bool> {
        let byte = self
            .data
            .get(self.bit_position / 8)
            .ok_or(BitIoError::UnexpectedEof)?;
        let bit = (byte >> (7 - self.bit_position % 8)) & 1 == 1;
        self.bit_position += 1;
        Ok(bit)
    }

    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_position
    }

    pub fn position(&self) -> usize {
        self.bit_position
    }

    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.data.len() * 8
    }
}
