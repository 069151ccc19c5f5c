//! GF(2^8) arithmetic and bit-addressable storage for erasure coding.
//!
//! [`Gf256`] implements the field with the reduction polynomial
//! x^8 + x^4 + x^3 + x + 1 behind the [`Field`] trait, [`BitArray`] packs
//! symbols at single-bit granularity, and [`codec::matrix`] holds the matrix
//! arithmetic a Reed-Solomon style code runs on top of the field.

pub mod algorithm;
pub mod bits;
pub mod codec;

pub use algorithm::{field::Field, gf256::Gf256};
pub use bits::bit_array::{BitArray, BitIndexError, Bits};
