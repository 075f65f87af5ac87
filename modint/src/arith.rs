//! Number theoretic functions on [`BigInt`].

use crate::{BigInt, Context, Error, Result};
use core::mem;

impl BigInt {
    /// Greatest common divisor, always non-negative.
    pub fn gcd(&self, other: &Self) -> Self {
        let (mut a, mut b) = (self.abs(), other.abs());

        while !b.is_zero() {
            let r = &a % &b;
            a = mem::replace(&mut b, r);
        }

        a
    }

    /// Extended Euclidean algorithm.
    ///
    /// Returns `(g, x, y)` with `g = gcd(self, other) ≥ 0` and
    /// `self·x + other·y = g`.
    pub fn egcd(&self, other: &Self) -> (Self, Self, Self) {
        let (mut r0, mut r1) = (self.clone(), other.clone());
        let (mut s0, mut s1) = (Self::one(), Self::zero());
        let (mut t0, mut t1) = (Self::zero(), Self::one());

        while !r1.is_zero() {
            let (q, r) = r0.div_rem(&r1);
            r0 = mem::replace(&mut r1, r);
            let s = &s0 - &(&q * &s1);
            s0 = mem::replace(&mut s1, s);
            let t = &t0 - &(&q * &t1);
            t0 = mem::replace(&mut t1, t);
        }

        if r0.is_negative() {
            (-r0, -s0, -t0)
        } else {
            (r0, s0, t0)
        }
    }

    /// Inverse modulo a positive `m`, in `[0, m)`.
    ///
    /// Fails with [`Error::NotInvertible`] if `gcd(self, m) ≠ 1` and with
    /// [`Error::DivisionByZero`] if `m` is zero.
    pub fn mod_inverse(&self, m: &Self) -> Result<Self> {
        if m.is_zero() {
            return Err(Error::DivisionByZero);
        }

        if m.is_negative() {
            return Err(Error::InvalidArgument("modulus must be positive"));
        }

        let (g, x, _) = self.rem_euclid(m).egcd(m);

        if !g.is_one() {
            return Err(Error::NotInvertible);
        }

        Ok(x.rem_euclid(m))
    }

    /// Jacobi symbol `(self / n)` for odd positive `n`.
    pub fn jacobi(&self, n: &Self) -> Result<i8> {
        if !n.is_positive() || n.is_even() {
            return Err(Error::InvalidArgument("Jacobi symbol needs an odd positive modulus"));
        }

        let mut a = self.rem_euclid(n);
        let mut n = n.clone();
        let mut t = 1i8;

        while !a.is_zero() {
            let z = a.trailing_zeros();
            a >>= z;
            let n8 = n.low_u64() & 7;

            if z & 1 == 1 && (n8 == 3 || n8 == 5) {
                t = -t;
            }

            if a.low_u64() & 3 == 3 && n8 & 3 == 3 {
                t = -t;
            }

            mem::swap(&mut a, &mut n);
            a = &a % &n;
        }

        Ok(if n.is_one() { t } else { 0 })
    }

    /// Legendre symbol `(self / p)` for an odd prime `p`.
    pub fn legendre(&self, p: &Self) -> Result<i8> {
        self.jacobi(p)
    }

    /// Kronecker symbol `(self / n)`, defined for every `n`.
    pub fn kronecker(&self, n: &Self) -> i8 {
        if n.is_zero() {
            return if self.abs().is_one() { 1 } else { 0 };
        }

        let mut t = 1i8;

        if n.is_negative() && self.is_negative() {
            t = -t;
        }

        let z = n.trailing_zeros();

        if z > 0 {
            if self.is_even() {
                return 0;
            }

            let a8 = self.rem_euclid(&Self::from_u64(8)).low_u64();

            if z & 1 == 1 && (a8 == 3 || a8 == 5) {
                t = -t;
            }
        }

        let odd = n.abs() >> z;

        // the odd part is positive, so the Jacobi symbol is defined
        t * self.jacobi(&odd).unwrap_or(0)
    }

    /// Modular exponentiation `self^exp mod m` for positive `m`.
    ///
    /// Uses a fixed window over the exponent. Negative exponents invert the
    /// base first.
    pub fn pow_mod(&self, exp: &Self, m: &Self) -> Result<Self> {
        if m.is_zero() {
            return Err(Error::DivisionByZero);
        }

        let ctx = Context::auto(m.clone())?;
        Ok(ctx.lift(self).pow(exp)?.lower())
    }
}

#[cfg(test)]
mod tests {
    use crate::{BigInt, Error};

    fn int(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn bezout() {
        let (a, b) = (int(240), int(-46));
        let (g, x, y) = a.egcd(&b);
        assert_eq!(g, int(2));
        assert_eq!(&a * &x + &b * &y, g);
        assert_eq!(a.gcd(&b), int(2));
    }

    #[test]
    fn inverses() {
        assert_eq!(int(3).mod_inverse(&int(11)).unwrap(), int(4));
        assert_eq!(int(-3).mod_inverse(&int(11)).unwrap(), int(7));
        assert_eq!(int(6).mod_inverse(&int(9)), Err(Error::NotInvertible));
        assert_eq!(int(6).mod_inverse(&int(0)), Err(Error::DivisionByZero));
    }

    #[test]
    fn symbols() {
        // quadratic residues mod 11: 1, 3, 4, 5, 9
        let expected = [0, 1, -1, 1, 1, 1, -1, -1, -1, 1, -1];
        for (a, &e) in expected.iter().enumerate() {
            assert_eq!(int(a as i64).jacobi(&int(11)).unwrap(), e);
        }
        assert_eq!(int(2).jacobi(&int(15)).unwrap(), 1);
        assert_eq!(int(7).jacobi(&int(15)).unwrap(), -1);
        assert!(int(2).jacobi(&int(8)).is_err());
        assert_eq!(int(5).kronecker(&int(2)), -1);
        assert_eq!(int(7).kronecker(&int(2)), 1);
        assert_eq!(int(-1).kronecker(&int(-1)), -1);
        assert_eq!(int(4).kronecker(&int(6)), 0);
    }

    #[test]
    fn modular_exponentiation() {
        assert_eq!(int(4).pow_mod(&int(13), &int(497)).unwrap(), int(445));
        assert_eq!(int(3).pow_mod(&int(-1), &int(10)).unwrap(), int(7));
        assert_eq!(int(3).pow_mod(&int(5), &int(1)).unwrap(), int(0));
        assert_eq!(int(2).pow_mod(&int(-1), &int(4)), Err(Error::NotInvertible));
    }
}
