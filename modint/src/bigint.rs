//! Arbitrary-precision signed integers.

mod bits;
mod codec;
mod div;
mod rand;

use crate::limb::{self, Limb};
use alloc::{vec, vec::Vec};
use core::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    ops::{Add, Mul, Neg, Sub},
};
use zeroize::Zeroize;

/// Arbitrary-precision signed integer.
///
/// Stored in sign-magnitude form over little-endian [`Limb`]s. The magnitude
/// never carries high zero limbs and zero is never negative, so structural
/// equality is numeric equality.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BigInt {
    neg: bool,
    limbs: Vec<Limb>,
}

impl BigInt {
    /// The integer `0`.
    pub const ZERO: Self = Self {
        neg: false,
        limbs: Vec::new(),
    };

    /// Returns `0`.
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Returns `1`.
    pub fn one() -> Self {
        Self::from_u64(1)
    }

    /// Creates an integer from an unsigned 64-bit value.
    pub fn from_u64(n: u64) -> Self {
        Self::from_limbs(vec![n])
    }

    /// Creates an integer from a signed 64-bit value.
    pub fn from_i64(n: i64) -> Self {
        Self::from_parts(n < 0, vec![n.unsigned_abs()])
    }

    /// Creates a non-negative integer from little-endian limbs.
    pub fn from_limbs(limbs: Vec<Limb>) -> Self {
        Self::from_parts(false, limbs)
    }

    /// Creates an integer from a sign and a little-endian magnitude,
    /// normalizing the result.
    pub(crate) fn from_parts(neg: bool, mut limbs: Vec<Limb>) -> Self {
        limb::trim(&mut limbs);
        let neg = neg && !limbs.is_empty();
        Self { neg, limbs }
    }

    /// Little-endian limbs of the magnitude.
    pub fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    /// Is this value zero?
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Is this value one?
    pub fn is_one(&self) -> bool {
        !self.neg && self.limbs.as_slice() == [1]
    }

    /// Is this value strictly negative?
    pub fn is_negative(&self) -> bool {
        self.neg
    }

    /// Is this value strictly positive?
    pub fn is_positive(&self) -> bool {
        !self.neg && !self.is_zero()
    }

    /// Is the magnitude odd?
    pub fn is_odd(&self) -> bool {
        self.limbs.first().is_some_and(|w| w & 1 == 1)
    }

    /// Is the magnitude even?
    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Returns `-1`, `0` or `1` according to the sign.
    pub fn signum(&self) -> i8 {
        match (self.neg, self.is_zero()) {
            (_, true) => 0,
            (true, false) => -1,
            (false, false) => 1,
        }
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Self {
            neg: false,
            limbs: self.limbs.clone(),
        }
    }

    /// Compares magnitudes, ignoring signs.
    pub fn cmp_abs(&self, other: &Self) -> Ordering {
        limb::cmp(&self.limbs, &other.limbs)
    }

    /// Low 64 bits of the magnitude.
    pub fn low_u64(&self) -> u64 {
        self.limbs.first().copied().unwrap_or(0)
    }

    /// Converts to `u64` if the value fits.
    pub fn to_u64(&self) -> Option<u64> {
        match (self.neg, self.limbs.len()) {
            (_, 0) => Some(0),
            (false, 1) => Some(self.limbs[0]),
            _ => None,
        }
    }

    /// Converts to `i64` if the value fits.
    pub fn to_i64(&self) -> Option<i64> {
        let mag = match self.limbs.len() {
            0 => return Some(0),
            1 => self.limbs[0],
            _ => return None,
        };

        if self.neg {
            0i64.checked_sub_unsigned(mag)
        } else {
            i64::try_from(mag).ok()
        }
    }

    /// Computes `self²`.
    pub fn sqr(&self) -> Self {
        Self::from_limbs(limb::mul(&self.limbs, &self.limbs))
    }

    /// Raises to a small power.
    pub fn pow(&self, mut exp: u32) -> Self {
        let mut base = self.clone();
        let mut acc = Self::one();

        while exp > 0 {
            if exp & 1 == 1 {
                acc = &acc * &base;
            }

            exp >>= 1;

            if exp > 0 {
                base = base.sqr();
            }
        }

        acc
    }

    /// Multiplies by a single limb.
    pub fn mul_small(&self, m: Limb) -> Self {
        Self::from_parts(self.neg, limb::mul_small(&self.limbs, m))
    }

    /// Floor of the square root of a non-negative value.
    ///
    /// Returns [`None`] for negative inputs.
    pub fn isqrt(&self) -> Option<Self> {
        if self.neg {
            return None;
        }

        if self.is_zero() {
            return Some(Self::zero());
        }

        // Newton iteration from an overestimate converges monotonically.
        let mut x = Self::one() << self.bits().div_ceil(2);

        loop {
            let y = (&x + &(self / &x)) >> 1;

            if y >= x {
                return Some(x);
            }

            x = y;
        }
    }

    /// Is this value a perfect square?
    pub fn is_square(&self) -> bool {
        self.isqrt().is_some_and(|r| r.sqr() == *self)
    }

    /// Negates in place.
    pub fn neg_assign(&mut self) {
        self.neg = !self.neg && !self.is_zero();
    }

    fn add_signed(a: &Self, b: &Self, b_neg: bool) -> Self {
        if a.neg == b_neg {
            return Self::from_parts(a.neg, limb::add(&a.limbs, &b.limbs));
        }

        match limb::cmp(&a.limbs, &b.limbs) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => Self::from_parts(a.neg, limb::sub(&a.limbs, &b.limbs)),
            Ordering::Less => Self::from_parts(b_neg, limb::sub(&b.limbs, &a.limbs)),
        }
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.neg, other.neg) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_abs(other),
            (true, true) => other.cmp_abs(self),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for BigInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.neg.hash(state);
        self.limbs.hash(state);
    }
}

impl Zeroize for BigInt {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
        self.neg = false;
    }
}

impl Add<&BigInt> for &BigInt {
    type Output = BigInt;

    fn add(self, rhs: &BigInt) -> BigInt {
        BigInt::add_signed(self, rhs, rhs.neg)
    }
}

impl Sub<&BigInt> for &BigInt {
    type Output = BigInt;

    fn sub(self, rhs: &BigInt) -> BigInt {
        BigInt::add_signed(self, rhs, !rhs.neg && !rhs.is_zero())
    }
}

impl Mul<&BigInt> for &BigInt {
    type Output = BigInt;

    fn mul(self, rhs: &BigInt) -> BigInt {
        BigInt::from_parts(self.neg != rhs.neg, limb::mul(&self.limbs, &rhs.limbs))
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        let mut out = self.clone();
        out.neg_assign();
        out
    }
}

define_binop_variants!(impl Add, add for LHS = BigInt, RHS = BigInt, Output = BigInt);
define_binop_variants!(impl Sub, sub for LHS = BigInt, RHS = BigInt, Output = BigInt);
define_binop_variants!(impl Mul, mul for LHS = BigInt, RHS = BigInt, Output = BigInt);
define_assign_variants!(impl AddAssign, add_assign, Add, add for LHS = BigInt, RHS = BigInt);
define_assign_variants!(impl SubAssign, sub_assign, Sub, sub for LHS = BigInt, RHS = BigInt);
define_assign_variants!(impl MulAssign, mul_assign, Mul, mul for LHS = BigInt, RHS = BigInt);
define_neg_variant!(BigInt);

macro_rules! impl_from_unsigned {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for BigInt {
                fn from(n: $ty) -> BigInt {
                    BigInt::from_u64(n as u64)
                }
            }
        )+
    };
}

macro_rules! impl_from_signed {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for BigInt {
                fn from(n: $ty) -> BigInt {
                    BigInt::from_i64(n as i64)
                }
            }
        )+
    };
}

impl_from_unsigned!(u8, u16, u32, u64, usize);
impl_from_signed!(i8, i16, i32, i64, isize);

impl From<u128> for BigInt {
    fn from(n: u128) -> BigInt {
        BigInt::from_limbs(vec![n as Limb, (n >> 64) as Limb])
    }
}

impl From<i128> for BigInt {
    fn from(n: i128) -> BigInt {
        let mag = n.unsigned_abs();
        BigInt::from_parts(n < 0, vec![mag as Limb, (mag >> 64) as Limb])
    }
}

#[cfg(test)]
mod tests {
    use super::BigInt;

    #[test]
    fn zero_is_canonical() {
        let a = BigInt::from(5u32);
        let z = &a - &a;
        assert_eq!(z, BigInt::zero());
        assert!(!(-z).is_negative());
    }

    #[test]
    fn signed_addition() {
        let a = BigInt::from(-7i32);
        let b = BigInt::from(3u32);
        assert_eq!(&a + &b, BigInt::from(-4i32));
        assert_eq!(&b - &a, BigInt::from(10u32));
        assert_eq!(&a * &b, BigInt::from(-21i32));
    }

    #[test]
    fn ordering() {
        let vals = [-300i64, -2, 0, 1, 1 << 40];
        for w in vals.windows(2) {
            assert!(BigInt::from(w[0]) < BigInt::from(w[1]));
        }
    }

    #[test]
    fn integer_square_root() {
        let n = BigInt::from(u128::MAX);
        let r = n.isqrt().unwrap();
        assert_eq!(r, BigInt::from(u64::MAX));
        assert!(BigInt::from(144u32).is_square());
        assert!(!BigInt::from(145u32).is_square());
        assert!(BigInt::from(-4i32).isqrt().is_none());
    }

    #[test]
    fn small_conversions() {
        assert_eq!(BigInt::from(i64::MIN).to_i64(), Some(i64::MIN));
        assert_eq!(BigInt::from(u64::MAX).to_i64(), None);
        assert_eq!(BigInt::from(-1i32).to_u64(), None);
        assert_eq!(BigInt::from(3u8).pow(5), BigInt::from(243u32));
    }
}
