//! Barrett reduction (HAC 14.42 with base 2).

use crate::BigInt;

pub(crate) struct Barrett {
    modulus: BigInt,
    k: usize,

    /// `floor(4^k / m)`
    mu: BigInt,
}

impl Barrett {
    pub(crate) fn new(m: &BigInt) -> Self {
        let k = m.bits();
        let mu = (BigInt::one() << (2 * k)) / m;

        Self {
            modulus: m.clone(),
            k,
            mu,
        }
    }

    /// Reduces `0 <= x < m^2`.
    pub(crate) fn reduce(&self, x: &BigInt) -> BigInt {
        if x.bits() > 2 * self.k {
            return x.rem_euclid(&self.modulus);
        }

        let q = ((x >> (self.k - 1)) * &self.mu) >> (self.k + 1);
        let mut r = x - &(q * &self.modulus);

        while r >= self.modulus {
            r -= &self.modulus;
        }

        r
    }
}

#[cfg(test)]
mod tests {
    use super::Barrett;
    use crate::BigInt;

    #[test]
    fn matches_remainder() {
        let m = BigInt::from(1_000_003u32);
        let barrett = Barrett::new(&m);

        for x in [0u64, 5, 1_000_003, 1_000_002 * 1_000_002, 123_456_789_012] {
            let x = BigInt::from(x);
            assert_eq!(barrett.reduce(&x), x.rem_euclid(&m));
        }
    }
}
