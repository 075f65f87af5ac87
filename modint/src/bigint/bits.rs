//! Shifts and bitwise operations.
//!
//! Bitwise operators follow two's complement semantics on an infinite sign
//! extension, matching primitive signed integers. Bit queries look at the
//! magnitude.

use super::BigInt;
use crate::limb::{self, LIMB_BITS, Limb};
use alloc::{vec, vec::Vec};
use core::ops::{BitAnd, BitOr, BitXor, Not, Shl, ShlAssign, Shr, ShrAssign};

impl BigInt {
    /// Number of significant bits in the magnitude. Zero has no bits.
    pub fn bits(&self) -> usize {
        limb::bits(&self.limbs)
    }

    /// Returns bit `i` of the magnitude.
    pub fn bit(&self, i: usize) -> bool {
        let (w, b) = (i / LIMB_BITS as usize, i % LIMB_BITS as usize);
        self.limbs.get(w).is_some_and(|x| (x >> b) & 1 == 1)
    }

    /// Sets or clears bit `i` of the magnitude.
    pub fn set_bit(&mut self, i: usize, value: bool) {
        let (w, b) = (i / LIMB_BITS as usize, i % LIMB_BITS as usize);

        if self.limbs.len() <= w {
            if !value {
                return;
            }

            self.limbs.resize(w + 1, 0);
        }

        if value {
            self.limbs[w] |= 1 << b;
        } else {
            self.limbs[w] &= !(1 << b);
        }

        limb::trim(&mut self.limbs);
        self.neg &= !self.limbs.is_empty();
    }

    /// Number of trailing zero bits of the magnitude, or `0` for zero.
    pub fn trailing_zeros(&self) -> usize {
        self.limbs
            .iter()
            .position(|&w| w != 0)
            .map_or(0, |i| i * LIMB_BITS as usize + self.limbs[i].trailing_zeros() as usize)
    }

    /// Keeps the low `bits` bits of the magnitude, preserving the sign.
    pub fn mask(&self, bits: usize) -> Self {
        Self::from_parts(self.neg, limb::mask(&self.limbs, bits))
    }

    /// Shifts left in place.
    pub fn shl_assign_bits(&mut self, shift: usize) {
        self.limbs = limb::shl(&self.limbs, shift);
    }

    /// Arithmetic right shift in place.
    pub fn shr_assign_bits(&mut self, shift: usize) {
        *self = &*self >> shift;
    }

    /// Two's complement limbs, sign extended to `width` limbs.
    fn to_twos(&self, width: usize) -> Vec<Limb> {
        let mut out = vec![0; width];
        out[..self.limbs.len()].copy_from_slice(&self.limbs);

        if self.neg {
            let mut carry = 1;

            for w in out.iter_mut() {
                let (v, c) = (!*w).overflowing_add(carry);
                *w = v;
                carry = c as Limb;
            }
        }

        out
    }

    fn from_twos(mut words: Vec<Limb>) -> Self {
        let neg = words.last().is_some_and(|w| w >> (LIMB_BITS - 1) == 1);

        if neg {
            let mut carry = 1;

            for w in words.iter_mut() {
                let (v, c) = (!*w).overflowing_add(carry);
                *w = v;
                carry = c as Limb;
            }
        }

        Self::from_parts(neg, words)
    }

    fn bitwise(&self, rhs: &Self, op: impl Fn(Limb, Limb) -> Limb) -> Self {
        let width = self.limbs.len().max(rhs.limbs.len()) + 1;
        let (a, b) = (self.to_twos(width), rhs.to_twos(width));
        Self::from_twos(a.iter().zip(&b).map(|(&x, &y)| op(x, y)).collect())
    }
}

impl Shl<usize> for &BigInt {
    type Output = BigInt;

    fn shl(self, shift: usize) -> BigInt {
        BigInt::from_parts(self.neg, limb::shl(&self.limbs, shift))
    }
}

impl Shl<usize> for BigInt {
    type Output = BigInt;

    fn shl(self, shift: usize) -> BigInt {
        &self << shift
    }
}

impl Shr<usize> for &BigInt {
    type Output = BigInt;

    /// Rounds toward negative infinity, like primitive signed integers.
    fn shr(self, shift: usize) -> BigInt {
        if !self.neg {
            return BigInt::from_parts(false, limb::shr(&self.limbs, shift));
        }

        // -((|a| - 1) >> s) - 1
        let m = limb::sub(&self.limbs, &[1]);
        let shifted = limb::shr(&m, shift);
        BigInt::from_parts(true, limb::add(&shifted, &[1]))
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;

    fn shr(self, shift: usize) -> BigInt {
        &self >> shift
    }
}

impl ShlAssign<usize> for BigInt {
    fn shl_assign(&mut self, shift: usize) {
        self.shl_assign_bits(shift);
    }
}

impl ShrAssign<usize> for BigInt {
    fn shr_assign(&mut self, shift: usize) {
        self.shr_assign_bits(shift);
    }
}

impl BitAnd<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitand(self, rhs: &BigInt) -> BigInt {
        self.bitwise(rhs, |a, b| a & b)
    }
}

impl BitOr<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitor(self, rhs: &BigInt) -> BigInt {
        self.bitwise(rhs, |a, b| a | b)
    }
}

impl BitXor<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitxor(self, rhs: &BigInt) -> BigInt {
        self.bitwise(rhs, |a, b| a ^ b)
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    /// `!a == -a - 1`
    fn not(self) -> BigInt {
        -self - BigInt::one()
    }
}

impl Not for BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        !&self
    }
}

define_binop_variants!(impl BitAnd, bitand for LHS = BigInt, RHS = BigInt, Output = BigInt);
define_binop_variants!(impl BitOr, bitor for LHS = BigInt, RHS = BigInt, Output = BigInt);
define_binop_variants!(impl BitXor, bitxor for LHS = BigInt, RHS = BigInt, Output = BigInt);
