use serde::{Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a bit index falls outside `0..len`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("bit index {index} out of range for bit array of {len} bits")]
pub struct BitIndexError {
    pub index: usize,
    pub len: usize,
}

/// Fixed-size sequence of bits packed into bytes.
///
/// Bit `i` lives in byte `i / 8` at offset `i % 8`, offset 0 being the least
/// significant bit. The logical length is fixed at construction.
///
/// Writes take `&mut self`; sharing one array between threads that write to it
/// needs external synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitArray {
    data: Vec<u8>,
    len: usize,
}

impl BitArray {
    /// Wraps an existing buffer; every bit of every byte is addressable.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let len = data.len() * 8;
        Self { data, len }
    }

    /// Zero-filled array of `len` bits backed by `ceil(len / 8)` bytes.
    pub fn with_len(len: usize) -> Self {
        Self {
            data: vec![0u8; len.div_ceil(8)],
            len,
        }
    }

    /// One bit per byte of `s`: `b'1'` sets the bit, any other byte clears it.
    ///
    /// A multi-byte UTF-8 character therefore contributes one cleared bit per byte.
    pub fn from_bit_str(s: &str) -> Self {
        let mut bits = Self::with_len(s.len());
        for (i, c) in s.bytes().enumerate() {
            bits.write(i, c == b'1');
        }
        bits
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn get(&self, index: usize) -> Result<bool, BitIndexError> {
        self.check(index)?;
        Ok(self.read(index))
    }

    /// Sets or clears bit `index`, leaving the other bits of its byte untouched.
    pub fn set(&mut self, index: usize, value: bool) -> Result<(), BitIndexError> {
        self.check(index)?;
        self.write(index, value);
        Ok(())
    }

    /// Value of bit `index` XORed with `value`; storage is not modified.
    pub fn xor(&self, index: usize, value: bool) -> Result<bool, BitIndexError> {
        Ok(self.get(index)? ^ value)
    }

    pub fn count_ones(&self) -> usize {
        self.iter().filter(|&b| b).count()
    }

    pub fn iter(&self) -> Bits<'_> {
        Bits {
            data: &self.data,
            pos: BitCursor::default(),
            end: BitCursor::at(self.len),
        }
    }

    fn check(&self, index: usize) -> Result<(), BitIndexError> {
        if index >= self.len {
            return Err(BitIndexError {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    #[inline]
    fn read(&self, index: usize) -> bool {
        let mask = 1u8 << (index % 8);
        self.data[index / 8] & mask != 0
    }

    #[inline]
    fn write(&mut self, index: usize, value: bool) {
        let mask = 1u8 << (index % 8);
        let byte = &mut self.data[index / 8];
        if value {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }
}

impl FromStr for BitArray {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_bit_str(s))
    }
}

impl From<&str> for BitArray {
    fn from(s: &str) -> Self {
        Self::from_bit_str(s)
    }
}

impl From<Vec<u8>> for BitArray {
    fn from(data: Vec<u8>) -> Self {
        Self::from_bytes(data)
    }
}

impl fmt::Display for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Serialize for BitArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Byte and intra-byte offset of a bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct BitCursor {
    byte: usize,
    offset: u8,
}

impl BitCursor {
    fn at(index: usize) -> Self {
        Self {
            byte: index / 8,
            offset: (index % 8) as u8,
        }
    }

    fn index(self) -> usize {
        self.byte * 8 + self.offset as usize
    }

    fn advance(&mut self) {
        self.offset += 1;
        if self.offset == 8 {
            self.offset = 0;
            self.byte += 1;
        }
    }
}

/// Forward iterator over the bits of a [`BitArray`], in index order.
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    data: &'a [u8],
    pos: BitCursor,
    end: BitCursor,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.pos == self.end {
            return None;
        }
        let bit = self.data[self.pos.byte] & (1u8 << self.pos.offset) != 0;
        self.pos.advance();
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.index() - self.pos.index();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits<'_> {}

impl FusedIterator for Bits<'_> {}

impl<'a> IntoIterator for &'a BitArray {
    type Item = bool;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
