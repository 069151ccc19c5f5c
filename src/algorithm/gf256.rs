use anyhow::{Result, anyhow};
use tracing::debug;

use crate::algorithm::field::Field;

/// Low byte of the reduction polynomial x^8 + x^4 + x^3 + x + 1 (0x11B).
pub const REDUCTION: u8 = 0x1b;

/// Carry-less product of `a` and `b` reduced modulo 0x11B.
#[inline]
const fn poly_mul(mut a: u8, mut b: u8) -> u8 {
    let mut p = 0u8;
    let mut i = 0;
    while i < 8 {
        if b & 1 != 0 {
            p ^= a;
        }
        b >>= 1;
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            a ^= REDUCTION;
        }
        i += 1;
    }
    p
}

/// GF(2^8) with a per-instance table of multiplicative inverses.
///
/// The table is filled once in [`Gf256::new`] and never mutated afterwards, so
/// a single instance can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Gf256 {
    inv: [u8; 256],
}

impl Gf256 {
    pub fn new() -> Self {
        // inv[0] stays 0: zero has no inverse and `div` never looks it up.
        let mut inv = [0u8; 256];
        let mut filled = 0usize;

        for a in 1..=255u8 {
            if inv[a as usize] != 0 {
                continue;
            }
            for b in 1..=255u8 {
                if poly_mul(a, b) == 1 {
                    inv[a as usize] = b;
                    inv[b as usize] = a;
                    filled += if a == b { 1 } else { 2 };
                    break;
                }
            }
        }

        debug!(filled, "GF(2^8) inverse table built");
        Gf256 { inv }
    }

    #[inline]
    pub fn add(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }

    #[inline]
    pub fn sub(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }

    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        poly_mul(a, b)
    }

    /// Field division with the convention that anything involving zero is zero.
    ///
    /// `div(a, 0)` returns `0` for every `a`, which is not a true field
    /// quotient. Callers that must detect division by zero should use
    /// [`Gf256::inv`] instead.
    #[inline]
    pub fn div(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            0
        } else if a == 1 {
            self.inv[b as usize]
        } else {
            poly_mul(a, self.inv[b as usize])
        }
    }

    #[inline]
    pub fn inv(&self, a: u8) -> Result<u8> {
        if a == 0 {
            return Err(anyhow!("inverse of zero is undefined"));
        }
        Ok(self.inv[a as usize])
    }

    pub fn inverse_table(&self) -> &[u8; 256] {
        &self.inv
    }

    pub fn mul_table(&self, factor: u8) -> [u8; 256] {
        let mut table = [0u8; 256];
        if factor == 0 {
            return table;
        }
        for (x, slot) in table.iter_mut().enumerate() {
            *slot = poly_mul(factor, x as u8);
        }
        table
    }
}

impl Default for Gf256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for Gf256 {
    type Elem = u8;

    fn zero(&self) -> u8 {
        0
    }

    fn one(&self) -> u8 {
        1
    }

    fn add(&self, a: u8, b: u8) -> u8 {
        Gf256::add(self, a, b)
    }

    fn sub(&self, a: u8, b: u8) -> u8 {
        Gf256::sub(self, a, b)
    }

    fn mul(&self, a: u8, b: u8) -> u8 {
        Gf256::mul(self, a, b)
    }

    fn div(&self, a: u8, b: u8) -> u8 {
        Gf256::div(self, a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_equals_sub() {
        let gf = Gf256::new();
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!(gf.add(a, b), gf.sub(a, b));
            }
        }
    }

    #[test]
    fn test_additive_identity_and_self_inverse() {
        let gf = Gf256::new();
        for a in 0..=255u8 {
            assert_eq!(gf.add(a, 0), a);
            assert_eq!(gf.add(a, a), 0);
        }
    }

    #[test]
    fn test_mul_identity_and_zero() {
        let gf = Gf256::new();
        for a in 0..=255u8 {
            assert_eq!(gf.mul(a, 1), a);
            assert_eq!(gf.mul(1, a), a);
            assert_eq!(gf.mul(a, 0), 0);
        }
    }

    #[test]
    fn test_known_products() {
        let gf = Gf256::new();
        assert_eq!(gf.mul(0x53, 0xca), 0x01);
        assert_eq!(gf.mul(0x57, 0x83), 0xc1);
        assert_eq!(gf.mul(0x57, 0x13), 0xfe);
        assert_eq!(gf.mul(0x02, 0x80), REDUCTION);
    }

    #[test]
    fn test_symmetric_inverse_pair() -> Result<()> {
        let gf = Gf256::new();
        assert_eq!(gf.inv(0x53)?, 0xca);
        assert_eq!(gf.inv(0xca)?, 0x53);
        Ok(())
    }

    #[test]
    fn test_inverse_table_complete() {
        let gf = Gf256::new();
        let table = gf.inverse_table();
        assert_eq!(table[0], 0);
        for a in 1..=255u8 {
            let b = table[a as usize];
            assert_eq!(gf.mul(a, b), 1, "inverse of {:#04x} is wrong", a);
            assert_eq!(table[b as usize], a);
        }
    }

    #[test]
    fn test_inv_zero_is_error() {
        let gf = Gf256::new();
        assert!(gf.inv(0).is_err());
    }

    #[test]
    fn test_div_conventions() {
        let gf = Gf256::new();
        for a in 0..=255u8 {
            assert_eq!(gf.div(a, 0), 0);
            assert_eq!(gf.div(0, a), 0);
        }
        for a in 1..=255u8 {
            for b in 1..=255u8 {
                let q = gf.div(a, b);
                assert_eq!(q, gf.mul(a, gf.inverse_table()[b as usize]));
                assert_eq!(gf.mul(q, b), a);
            }
        }
    }

    #[test]
    fn test_div_one_shortcut_matches_mul() {
        let gf = Gf256::new();
        for b in 1..=255u8 {
            assert_eq!(gf.div(1, b), gf.mul(1, gf.inverse_table()[b as usize]));
        }
    }

    #[test]
    fn test_mul_commutative_and_associative() {
        let gf = Gf256::new();
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!(gf.mul(a, b), gf.mul(b, a));
            }
        }
        for a in (0..=255u8).step_by(7) {
            for b in (1..=255u8).step_by(11) {
                for c in (3..=255u8).step_by(13) {
                    assert_eq!(gf.mul(gf.mul(a, b), c), gf.mul(a, gf.mul(b, c)));
                }
            }
        }
    }

    #[test]
    fn test_mul_table_matches_mul() {
        let gf = Gf256::new();
        for factor in [0u8, 1, 2, 0x53, 0xff] {
            let table = gf.mul_table(factor);
            for x in 0..=255u8 {
                assert_eq!(table[x as usize], gf.mul(factor, x));
            }
        }
    }

    #[test]
    fn test_trait_dispatch_matches_inherent() {
        fn quotient<F: Field>(f: &F, a: F::Elem, b: F::Elem) -> F::Elem {
            f.div(f.mul(a, b), b)
        }
        let gf = Gf256::new();
        assert_eq!(Field::zero(&gf), 0);
        assert_eq!(Field::one(&gf), 1);
        assert_eq!(quotient(&gf, 0x57, 0x83), 0x57);
        assert_eq!(Field::add(&gf, 0x57, 0x83), 0x57 ^ 0x83);
    }
}
