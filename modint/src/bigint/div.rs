//! Division: truncated, floored, Euclidean and rounded quotients.
//!
//! The magnitude division is Knuth's Algorithm D (TAOCP vol. 2, 4.3.1).

use super::BigInt;
use crate::{
    Error, Result,
    limb::{self, LIMB_BITS, Limb, WideLimb, adc, sbb},
};
use alloc::{vec, vec::Vec};
use core::{
    cmp::Ordering,
    ops::{Div, Rem},
};

/// Divides magnitude `u` by non-zero magnitude `v`.
pub(crate) fn div_rem_mag(u: &[Limb], v: &[Limb]) -> (Vec<Limb>, Vec<Limb>) {
    let (u, v) = (&u[..limb::len(u)], &v[..limb::len(v)]);
    assert!(!v.is_empty(), "division by zero");

    if limb::cmp(u, v) == Ordering::Less {
        return (Vec::new(), u.to_vec());
    }

    if v.len() == 1 {
        let (q, r) = limb::div_rem_small(u, v[0]);
        let mut r = vec![r];
        limb::trim(&mut r);
        return (q, r);
    }

    // D1: normalize so the top limb of the divisor has its high bit set
    let shift = v[v.len() - 1].leading_zeros() as usize;
    let mut vn = limb::shl_wide(v, shift);
    vn.truncate(v.len());
    let mut un = limb::shl_wide(u, shift);
    un.truncate(u.len() + 1);

    let n = vn.len();
    let m = un.len() - n - 1;
    let mut q = vec![0; m + 1];
    let v_top = vn[n - 1] as WideLimb;
    let v_next = vn[n - 2] as WideLimb;
    let base: WideLimb = 1 << LIMB_BITS;

    for j in (0..=m).rev() {
        // D3: estimate the quotient digit
        let num = ((un[j + n] as WideLimb) << LIMB_BITS) | un[j + n - 1] as WideLimb;
        let mut qhat = num / v_top;
        let mut rhat = num % v_top;

        while qhat >= base || qhat * v_next > ((rhat << LIMB_BITS) | un[j + n - 2] as WideLimb) {
            qhat -= 1;
            rhat += v_top;

            if rhat >= base {
                break;
            }
        }

        // D4: multiply and subtract
        let mut carry: WideLimb = 0;
        let mut borrow: Limb = 0;

        for i in 0..n {
            let p = qhat * vn[i] as WideLimb + carry;
            carry = p >> LIMB_BITS;
            let (w, b) = sbb(un[i + j], p as Limb, borrow);
            un[i + j] = w;
            borrow = b;
        }

        let (w, b) = sbb(un[j + n], carry as Limb, borrow);
        un[j + n] = w;

        // D6: add back if the estimate was one too large
        if b != 0 {
            qhat -= 1;
            let mut c = 0;

            for i in 0..n {
                let (w, cc) = adc(un[i + j], vn[i], c);
                un[i + j] = w;
                c = cc;
            }

            un[j + n] = un[j + n].wrapping_add(c);
        }

        q[j] = qhat as Limb;
    }

    limb::trim(&mut q);
    let r = limb::shr(&un[..n], shift);
    (q, r)
}

impl BigInt {
    /// Truncated division, returning the quotient rounded toward zero and a
    /// remainder with the sign of the dividend.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero. See [`BigInt::checked_div_rem`].
    pub fn div_rem(&self, rhs: &Self) -> (Self, Self) {
        let (q, r) = div_rem_mag(&self.limbs, &rhs.limbs);
        (
            Self::from_parts(self.neg != rhs.neg, q),
            Self::from_parts(self.neg, r),
        )
    }

    /// Truncated division returning [`Error::DivisionByZero`] on a zero divisor.
    pub fn checked_div_rem(&self, rhs: &Self) -> Result<(Self, Self)> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }

        Ok(self.div_rem(rhs))
    }

    /// Truncated quotient returning [`Error::DivisionByZero`] on a zero divisor.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        self.checked_div_rem(rhs).map(|(q, _)| q)
    }

    /// Truncated remainder returning [`Error::DivisionByZero`] on a zero divisor.
    pub fn checked_rem(&self, rhs: &Self) -> Result<Self> {
        self.checked_div_rem(rhs).map(|(_, r)| r)
    }

    /// Euclidean division: the remainder is always in `[0, |rhs|)`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    pub fn div_rem_euclid(&self, rhs: &Self) -> (Self, Self) {
        let (q, r) = self.div_rem(rhs);

        if r.is_negative() {
            if rhs.is_negative() {
                (q + Self::one(), r - rhs)
            } else {
                (q - Self::one(), r + rhs)
            }
        } else {
            (q, r)
        }
    }

    /// Euclidean quotient.
    pub fn div_euclid(&self, rhs: &Self) -> Self {
        self.div_rem_euclid(rhs).0
    }

    /// Euclidean remainder, never negative.
    pub fn rem_euclid(&self, rhs: &Self) -> Self {
        self.div_rem_euclid(rhs).1
    }

    /// Euclidean remainder returning [`Error::DivisionByZero`] on a zero divisor.
    pub fn checked_rem_euclid(&self, rhs: &Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }

        Ok(self.rem_euclid(rhs))
    }

    /// Floored division: the quotient is rounded toward negative infinity and
    /// the remainder takes the sign of the divisor.
    pub fn div_rem_floor(&self, rhs: &Self) -> (Self, Self) {
        let (q, r) = self.div_rem(rhs);

        if !r.is_zero() && r.is_negative() != rhs.is_negative() {
            (q - Self::one(), r + rhs)
        } else {
            (q, r)
        }
    }

    /// Floored quotient.
    pub fn div_floor(&self, rhs: &Self) -> Self {
        self.div_rem_floor(rhs).0
    }

    /// Quotient rounded to the nearest integer, with ties rounded toward
    /// positive infinity. Requires a positive divisor.
    pub fn div_round(&self, rhs: &Self) -> Result<Self> {
        if !rhs.is_positive() {
            return Err(Error::InvalidArgument("rounded division requires a positive divisor"));
        }

        let (q, r) = self.div_rem_floor(rhs);

        if (r << 1) >= *rhs {
            Ok(q + Self::one())
        } else {
            Ok(q)
        }
    }

    /// Divides by a single non-zero limb, returning the truncated quotient
    /// and the remainder magnitude.
    pub fn div_rem_small(&self, d: Limb) -> Result<(Self, Limb)> {
        if d == 0 {
            return Err(Error::DivisionByZero);
        }

        let (q, r) = limb::div_rem_small(&self.limbs, d);
        Ok((Self::from_parts(self.neg, q), r))
    }
}

impl Div<&BigInt> for &BigInt {
    type Output = BigInt;

    fn div(self, rhs: &BigInt) -> BigInt {
        self.div_rem(rhs).0
    }
}

impl Rem<&BigInt> for &BigInt {
    type Output = BigInt;

    fn rem(self, rhs: &BigInt) -> BigInt {
        self.div_rem(rhs).1
    }
}

define_binop_variants!(impl Div, div for LHS = BigInt, RHS = BigInt, Output = BigInt);
define_binop_variants!(impl Rem, rem for LHS = BigInt, RHS = BigInt, Output = BigInt);
define_assign_variants!(impl DivAssign, div_assign, Div, div for LHS = BigInt, RHS = BigInt);
define_assign_variants!(impl RemAssign, rem_assign, Rem, rem for LHS = BigInt, RHS = BigInt);
