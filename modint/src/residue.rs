//! Residues: integers bound to a reduction [`Context`].

use crate::{BigInt, Context, Result, limb::Limb};
use alloc::{sync::Arc, vec::Vec};
use core::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Window width of the fixed-window exponentiation.
const POW_WINDOW: usize = 4;

/// Element of `Z/mZ` tied to the [`Context`] that owns `m`.
///
/// Arithmetic between residues of different contexts is a programming error
/// and panics.
#[derive(Clone)]
pub struct Residue {
    ctx: Arc<Context>,

    /// Internal representation, in Montgomery form for Montgomery contexts.
    repr: BigInt,
}

impl Residue {
    pub(crate) fn from_repr(ctx: Arc<Context>, repr: BigInt) -> Self {
        Self { ctx, repr }
    }

    #[inline]
    fn check(&self, other: &Self) {
        assert!(
            Arc::ptr_eq(&self.ctx, &other.ctx),
            "residues belong to different reduction contexts"
        );
    }

    fn with_repr(&self, repr: BigInt) -> Self {
        Self {
            ctx: self.ctx.clone(),
            repr,
        }
    }

    pub(crate) fn repr_ref(&self) -> &BigInt {
        &self.repr
    }

    /// The context this residue belongs to.
    pub fn context(&self) -> &Arc<Context> {
        &self.ctx
    }

    /// Canonical integer in `[0, m)`.
    pub fn lower(&self) -> BigInt {
        self.ctx.from_repr(&self.repr)
    }

    /// Is this the zero residue?
    pub fn is_zero(&self) -> bool {
        self.repr.is_zero()
    }

    /// Is this the residue `1`?
    pub fn is_one(&self) -> bool {
        self.repr == *self.ctx.one_repr()
    }

    /// Is the canonical representative odd?
    pub fn is_odd(&self) -> bool {
        self.lower().is_odd()
    }

    /// The `sgn0` function of RFC 9380 for prime fields: the parity of the
    /// canonical representative.
    pub fn sgn0(&self) -> Choice {
        Choice::from(self.is_odd() as u8)
    }

    /// Computes `self²`.
    pub fn sqr(&self) -> Self {
        self.with_repr(self.ctx.sqr_repr(&self.repr))
    }

    /// Computes `2 * self`.
    pub fn double(&self) -> Self {
        self.with_repr(self.ctx.add_repr(&self.repr, &self.repr))
    }

    /// Computes `self / 2`. Requires an odd modulus.
    pub fn halve(&self) -> Self {
        debug_assert!(self.ctx.modulus().is_odd());

        let repr = if self.repr.is_odd() {
            (&self.repr + self.ctx.modulus()) >> 1
        } else {
            &self.repr >> 1
        };

        self.with_repr(repr)
    }

    /// Multiplies by a small integer.
    pub fn mul_small(&self, k: Limb) -> Self {
        self.with_repr(self.repr.mul_small(k).rem_euclid(self.ctx.modulus()))
    }

    /// Squares in place.
    pub fn sqr_assign(&mut self) {
        self.repr = self.ctx.sqr_repr(&self.repr);
    }

    /// Negates in place.
    pub fn neg_assign(&mut self) {
        self.repr = self.ctx.neg_repr(&self.repr);
    }

    /// Multiplicative inverse.
    ///
    /// Fails with [`Error::NotInvertible`](crate::Error::NotInvertible) if `gcd(self, m) ≠ 1`.
    pub fn invert(&self) -> Result<Self> {
        let inv = self.lower().mod_inverse(self.ctx.modulus())?;
        Ok(self.ctx.lift(&inv))
    }

    /// Computes `self / rhs`, failing if `rhs` is not invertible.
    pub fn try_div(&self, rhs: &Self) -> Result<Self> {
        self.check(rhs);
        Ok(self * &rhs.invert()?)
    }

    /// Raises to an arbitrary integer power using a fixed window.
    ///
    /// A negative exponent inverts the base first, failing with
    /// [`Error::NotInvertible`](crate::Error::NotInvertible) if it has no inverse.
    pub fn pow(&self, exp: &BigInt) -> Result<Self> {
        if exp.is_negative() {
            return Ok(self.invert()?.pow_nonneg(&-exp));
        }

        Ok(self.pow_nonneg(exp))
    }

    /// Raises to a small power.
    pub fn pow_u64(&self, exp: u64) -> Self {
        self.pow_nonneg(&BigInt::from_u64(exp))
    }

    /// Fixed-window exponentiation. Every window costs the same number of
    /// squarings and exactly one multiplication, independent of its digit.
    pub(crate) fn pow_nonneg(&self, exp: &BigInt) -> Self {
        let ctx = &self.ctx;
        let mut table: Vec<BigInt> = Vec::with_capacity(1 << POW_WINDOW);
        table.push(ctx.one_repr().clone());
        table.push(self.repr.clone());

        for i in 2..(1 << POW_WINDOW) {
            let next = ctx.mul_repr(&table[i - 1], &self.repr);
            table.push(next);
        }

        let mut acc = ctx.one_repr().clone();

        for w in (0..exp.bits().div_ceil(POW_WINDOW)).rev() {
            for _ in 0..POW_WINDOW {
                acc = ctx.sqr_repr(&acc);
            }

            let digit = (0..POW_WINDOW).fold(0, |d, b| d | (exp.bit(w * POW_WINDOW + b) as usize) << b);
            acc = ctx.mul_repr(&acc, &table[digit]);
        }

        self.with_repr(acc)
    }

    /// Legendre symbol of the canonical value with respect to a prime modulus.
    pub fn legendre(&self) -> i8 {
        let m = self.ctx.modulus();

        if m.is_even() {
            return if self.is_zero() { 0 } else { 1 };
        }

        self.lower().jacobi(m).unwrap_or(0)
    }

    /// Is this a quadratic residue (zero included) modulo a prime?
    pub fn is_square(&self) -> bool {
        self.legendre() >= 0
    }

    /// Encodes the canonical value as big-endian bytes, `byte_len` wide.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut out = self.to_bytes_le();
        out.reverse();
        out
    }

    /// Encodes the canonical value as little-endian bytes, `byte_len` wide.
    pub fn to_bytes_le(&self) -> Vec<u8> {
        let mut out = alloc::vec![0u8; self.ctx.byte_len()];
        self.lower().write_le(&mut out);
        out
    }

    /// Limbs of the internal representation padded to the modulus width.
    fn padded(&self) -> Vec<Limb> {
        let mut limbs = self.repr.limbs().to_vec();
        limbs.resize(self.ctx.modulus().limbs().len(), 0);
        limbs
    }

    /// Returns `b` if `choice` is set, otherwise `a`.
    pub fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        a.check(b);
        let (x, y) = (a.padded(), b.padded());
        let limbs = x
            .iter()
            .zip(&y)
            .map(|(x, y)| Limb::conditional_select(x, y, choice))
            .collect();
        a.with_repr(BigInt::from_limbs(limbs))
    }

    /// Swaps `a` and `b` if `choice` is set.
    pub fn conditional_swap(a: &mut Self, b: &mut Self, choice: Choice) {
        a.check(b);
        let (mut x, mut y) = (a.padded(), b.padded());

        for (x, y) in x.iter_mut().zip(y.iter_mut()) {
            Limb::conditional_swap(x, y, choice);
        }

        a.repr = BigInt::from_limbs(x);
        b.repr = BigInt::from_limbs(y);
    }

    /// Replaces `self` with `other` if `choice` is set.
    pub fn conditional_assign(&mut self, other: &Self, choice: Choice) {
        *self = Self::conditional_select(self, other, choice);
    }

    /// Returns `-self` if `choice` is set.
    pub fn conditional_negate(&self, choice: Choice) -> Self {
        Self::conditional_select(self, &-self, choice)
    }
}

impl ConstantTimeEq for Residue {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.check(other);
        let (x, y) = (self.padded(), other.padded());
        x.as_slice().ct_eq(y.as_slice())
    }
}

impl PartialEq for Residue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ctx, &other.ctx) && self.repr == other.repr
    }
}

impl Eq for Residue {}

impl fmt::Debug for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Residue({:#x})", self.lower())
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.lower(), f)
    }
}

impl fmt::LowerHex for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.lower(), f)
    }
}

impl Zeroize for Residue {
    fn zeroize(&mut self) {
        self.repr.zeroize();
    }
}

impl Add<&Residue> for &Residue {
    type Output = Residue;

    fn add(self, rhs: &Residue) -> Residue {
        self.check(rhs);
        self.with_repr(self.ctx.add_repr(&self.repr, &rhs.repr))
    }
}

impl Sub<&Residue> for &Residue {
    type Output = Residue;

    fn sub(self, rhs: &Residue) -> Residue {
        self.check(rhs);
        self.with_repr(self.ctx.sub_repr(&self.repr, &rhs.repr))
    }
}

impl Mul<&Residue> for &Residue {
    type Output = Residue;

    fn mul(self, rhs: &Residue) -> Residue {
        self.check(rhs);
        self.with_repr(self.ctx.mul_repr(&self.repr, &rhs.repr))
    }
}

impl Neg for &Residue {
    type Output = Residue;

    fn neg(self) -> Residue {
        self.with_repr(self.ctx.neg_repr(&self.repr))
    }
}

define_binop_variants!(impl Add, add for LHS = Residue, RHS = Residue, Output = Residue);
define_binop_variants!(impl Sub, sub for LHS = Residue, RHS = Residue, Output = Residue);
define_binop_variants!(impl Mul, mul for LHS = Residue, RHS = Residue, Output = Residue);
define_assign_variants!(impl AddAssign, add_assign, Add, add for LHS = Residue, RHS = Residue);
define_assign_variants!(impl SubAssign, sub_assign, Sub, sub for LHS = Residue, RHS = Residue);
define_assign_variants!(impl MulAssign, mul_assign, Mul, mul for LHS = Residue, RHS = Residue);
define_neg_variant!(Residue);

#[cfg(test)]
mod tests {
    use crate::{BigInt, Context, Error, Strategy};
    use subtle::{Choice, ConstantTimeEq};

    #[test]
    fn field_identities() {
        let ctx = Context::new(BigInt::from(1_000_003u32), Strategy::Montgomery).unwrap();
        let a = ctx.from_u64(123_456);
        let b = ctx.from_i64(-77);

        assert_eq!(&a + &b - &b, a);
        assert_eq!((&a * &a.invert().unwrap()), ctx.one());
        assert_eq!(a.halve().double(), a);
        assert_eq!(a.pow(&BigInt::from(-2i32)).unwrap() * a.sqr(), ctx.one());
        assert_eq!(a.pow_u64(1_000_002), ctx.one());
        assert_eq!(b.mul_small(3), &b + &b + &b);
        assert_eq!(ctx.zero().invert(), Err(Error::NotInvertible));
    }

    #[test]
    #[should_panic(expected = "different reduction contexts")]
    fn mixing_contexts_panics() {
        let c1 = Context::new(BigInt::from(101u32), Strategy::Plain).unwrap();
        let c2 = Context::new(BigInt::from(101u32), Strategy::Plain).unwrap();
        let _ = c1.one() + c2.one();
    }

    #[test]
    fn conditional_ops() {
        let ctx = Context::new(BigInt::from(1_000_003u32), Strategy::Barrett).unwrap();
        let (mut a, mut b) = (ctx.from_u64(5), ctx.from_u64(1 << 19));
        crate::Residue::conditional_swap(&mut a, &mut b, Choice::from(1));
        assert_eq!((a.lower(), b.lower()), (BigInt::from(1u32 << 19), BigInt::from(5u32)));
        assert!(bool::from(a.ct_eq(&ctx.from_u64(1 << 19))));
        assert_eq!(a.conditional_negate(Choice::from(1)), -&a);
    }
}
