//! BitString: an owned, packed sequence of bits.
//!
//! Bits are stored most significant bit first, eight to a byte. Unused bits in the last byte are
//! always zero, so two BitStrings holding the same bits compare and hash the same. BitStrings
//! carry the huffman codes, the decoder's accumulator and the encoded payload.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::HuffError;

const BIT_MASK: u8 = 0x80;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bytes: Vec<u8>,
    len: usize,
}

impl BitString {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            len: 0,
        }
    }

    /// Create an empty BitString with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity((bits + 7) / 8),
            len: 0,
        }
    }

    /// Wrap packed bytes holding `len` meaningful bits. Returns None unless `bytes` is exactly
    /// long enough for `len` bits and every padding bit in the last byte is zero.
    pub fn from_bytes(bytes: Vec<u8>, len: usize) -> Option<Self> {
        if bytes.len() != (len + 7) / 8 {
            return None;
        }
        let used = len % 8;
        if used > 0 {
            let last = bytes[bytes.len() - 1];
            if last & (0xff >> used) != 0 {
                return None;
            }
        }
        Some(Self { bytes, len })
    }

    /// Number of bits held.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The packed bytes, including the zeroed padding in the last byte.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Count of padding bits (0-7) needed to fill the last byte.
    pub fn padding(&self) -> u8 {
        ((8 - self.len % 8) % 8) as u8
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        let bit_offset = self.len % 8;
        if bit_offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= BIT_MASK >> bit_offset;
        }
        self.len += 1;
    }

    /// Remove and return the last bit, or None if empty.
    pub fn pop(&mut self) -> Option<bool> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let byte_index = self.len / 8;
        let mask = BIT_MASK >> (self.len % 8);
        let bit = self.bytes[byte_index] & mask != 0;
        // Keep the padding clear
        self.bytes[byte_index] &= !mask;
        if self.len % 8 == 0 {
            self.bytes.pop();
        }
        Some(bit)
    }

    /// Append all bits of another BitString.
    pub fn extend_from(&mut self, other: &BitString) {
        for bit in other.iter() {
            self.push(bit);
        }
    }

    /// Return the bit at `index`, or None if out of range.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (BIT_MASK >> (index % 8)) != 0)
    }

    /// Iterate over the bits, first bit first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bytes[i / 8] & (BIT_MASK >> (i % 8)) != 0)
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.len = 0;
    }

    /// True if every bit of self matches the start of `other` (a string is a prefix of itself).
    pub fn is_prefix_of(&self, other: &BitString) -> bool {
        self.len <= other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl Ord for BitString {
    /// Lexicographic by bit, so a prefix sorts directly before its extensions.
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl PartialOrd for BitString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = BitString::new();
        for bit in iter {
            bits.push(bit);
        }
        bits
    }
}

impl Display for BitString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = HuffError;

    /// Parse a string of '0' and '1' characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(HuffError::InvalidCodeTable(format!(
                    "'{}' is not a bit in \"{}\"",
                    other, s
                ))),
            })
            .collect()
    }
}
