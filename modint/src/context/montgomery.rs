//! Montgomery multiplication.
//!
//! Coarsely Integrated Operand Scanning (CIOS) as described in Koç, Acar and
//! Kaliski, "Analyzing and Comparing Montgomery Multiplication Algorithms".

use crate::{
    BigInt,
    limb::{self, LIMB_BITS, Limb, adc, mac},
};
use alloc::{vec, vec::Vec};
use subtle::{Choice, ConditionallySelectable};

pub(crate) struct Montgomery {
    /// Modulus limbs, exactly `n` of them.
    modulus: Vec<Limb>,

    /// `-m^-1 mod 2^64`
    inv: Limb,

    /// `R^2 mod m` with `R = 2^(64 n)`
    r2: BigInt,

    /// `R mod m`
    one: BigInt,
}

impl Montgomery {
    pub(crate) fn new(m: &BigInt) -> Self {
        let modulus = m.limbs().to_vec();
        let n = modulus.len();

        // Newton iteration doubles the number of correct low bits each step.
        let mut inv: Limb = 1;
        for _ in 0..6 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(modulus[0].wrapping_mul(inv)));
        }

        let r = BigInt::one() << (n * LIMB_BITS as usize);
        let one = r.rem_euclid(m);
        let r2 = (&one * &one).rem_euclid(m);

        Self {
            modulus,
            inv: inv.wrapping_neg(),
            r2,
            one,
        }
    }

    /// `R mod m`, the Montgomery form of `1`.
    pub(crate) fn one(&self) -> &BigInt {
        &self.one
    }

    pub(crate) fn to_mont(&self, x: &BigInt) -> BigInt {
        self.mul(x, &self.r2)
    }

    pub(crate) fn from_mont(&self, x: &BigInt) -> BigInt {
        self.mul(x, &BigInt::one())
    }

    /// Computes `a * b * R^-1 mod m` for `a, b < m`.
    pub(crate) fn mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        let m = &self.modulus;
        let n = m.len();
        let (a, b) = (a.limbs(), b.limbs());
        let mut t = vec![0 as Limb; n + 2];

        for i in 0..n {
            let ai = a.get(i).copied().unwrap_or(0);
            let mut carry = 0;

            for j in 0..n {
                let (w, c) = mac(t[j], ai, b.get(j).copied().unwrap_or(0), carry);
                t[j] = w;
                carry = c;
            }

            let (w, c) = adc(t[n], carry, 0);
            t[n] = w;
            t[n + 1] = c;

            let q = t[0].wrapping_mul(self.inv);
            let (_, mut carry) = mac(t[0], q, m[0], 0);

            for j in 1..n {
                let (w, c) = mac(t[j], q, m[j], carry);
                t[j - 1] = w;
                carry = c;
            }

            let (w, c) = adc(t[n], carry, 0);
            t[n - 1] = w;
            t[n] = t[n + 1] + c;
        }

        // t < 2m: subtract m unless that borrows, selecting without a branch
        t.truncate(n + 1);
        let mut d = t.clone();
        let borrow = limb::sub_assign(&mut d, m);
        let keep = Choice::from((borrow & 1) as u8);

        for (x, y) in t.iter_mut().zip(&d) {
            *x = Limb::conditional_select(y, x, keep);
        }

        BigInt::from_limbs(t)
    }
}

#[cfg(test)]
mod tests {
    use super::Montgomery;
    use crate::BigInt;

    #[test]
    fn round_trip() {
        let m: BigInt = "0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"
            .parse()
            .unwrap();
        let monty = Montgomery::new(&m);
        let x = BigInt::from(0xdead_beefu32);
        assert_eq!(monty.from_mont(&monty.to_mont(&x)), x);
        assert_eq!(monty.from_mont(monty.one()), BigInt::one());
    }
}
