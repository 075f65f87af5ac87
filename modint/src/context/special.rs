//! Reduction modulo pseudo-Mersenne primes `2^k - c`.
//!
//! Uses `2^k = c (mod m)` to fold the high part of a value onto its low
//! part until it fits in `k` bits.

use crate::BigInt;

/// Recognizes `m = 2^k - c` where `c` is at most half as wide as `m`.
pub(crate) fn detect(m: &BigInt) -> Option<(usize, BigInt)> {
    let k = m.bits();
    let c = (BigInt::one() << k) - m;

    (c.is_positive() && 2 * c.bits() <= k).then_some((k, c))
}

pub(crate) struct Special {
    k: usize,
    c: BigInt,
    modulus: BigInt,
}

impl Special {
    pub(crate) fn new(k: usize, c: BigInt, m: &BigInt) -> Self {
        Self {
            k,
            c,
            modulus: m.clone(),
        }
    }

    /// Reduces a non-negative value.
    pub(crate) fn reduce(&self, x: &BigInt) -> BigInt {
        let mut x = x.clone();

        while x.bits() > self.k {
            x = (&x >> self.k) * &self.c + x.mask(self.k);
        }

        while x >= self.modulus {
            x -= &self.modulus;
        }

        x
    }
}

#[cfg(test)]
mod tests {
    use super::{Special, detect};
    use crate::BigInt;

    #[test]
    fn folds_like_remainder() {
        let m = (BigInt::one() << 255) - BigInt::from(19u32);
        let (k, c) = detect(&m).unwrap();
        assert_eq!((k, c.clone()), (255, BigInt::from(19u32)));

        let special = Special::new(k, c, &m);
        let x = (&m - BigInt::one()).sqr();
        assert_eq!(special.reduce(&x), x.rem_euclid(&m));
        assert_eq!(special.reduce(&m), BigInt::zero());
    }
}
