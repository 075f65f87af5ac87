//! Probabilistic primality testing.
//!
//! [`BigInt::is_prime`] is a Baillie-PSW style test: trial division, a
//! Miller-Rabin test that always includes base 2, and a strong Lucas test
//! with Selfridge's parameters. No composite is known to pass both.

use crate::{BigInt, Context, Error, Result, Strategy};
use rand_core::{CryptoRng, RngCore};

/// Default number of random Miller-Rabin bases used by [`BigInt::is_prime`].
pub const DEFAULT_MR_ROUNDS: usize = 16;

const SMALL_PRIMES: [u64; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

/// Outcome of trial division by [`SMALL_PRIMES`].
enum Trial {
    Prime,
    Composite,
    Unknown,
}

fn trial_division(n: &BigInt) -> Trial {
    if n <= &BigInt::one() {
        return Trial::Composite;
    }

    for &p in SMALL_PRIMES.iter() {
        if let Some(small) = n.to_u64() {
            if small == p {
                return Trial::Prime;
            }
        }

        if matches!(n.div_rem_small(p), Ok((_, 0))) {
            return Trial::Composite;
        }
    }

    Trial::Unknown
}

impl BigInt {
    /// Miller-Rabin test with `rounds` random bases in `[2, n - 2]`.
    ///
    /// With `force2` an additional round with base 2 runs first. Values
    /// below 2 and even values other than 2 are reported composite.
    pub fn is_probable_prime_mr(
        &self,
        rounds: usize,
        rng: &mut (impl CryptoRng + RngCore + ?Sized),
        force2: bool,
    ) -> bool {
        if self <= &Self::one() {
            return false;
        }

        if self.is_even() {
            return self.to_u64() == Some(2);
        }

        if self.to_u64() == Some(3) {
            return true;
        }

        let Ok(ctx) = Context::new(self.clone(), Strategy::Montgomery) else {
            return false;
        };

        let n_minus_1 = self - &Self::one();
        let s = n_minus_1.trailing_zeros();
        let d = &n_minus_1 >> s;
        let one = ctx.one();
        let minus_one = -&one;
        let lo = Self::from_u64(2);

        let witness = |a: &BigInt| -> bool {
            let mut x = ctx.lift(a).pow_nonneg(&d);

            if x == one || x == minus_one {
                return false;
            }

            for _ in 1..s {
                x.sqr_assign();

                if x == minus_one {
                    return false;
                }

                if x == one {
                    return true;
                }
            }

            true
        };

        if force2 && witness(&lo) {
            return false;
        }

        for _ in 0..rounds {
            let Ok(a) = Self::random_range(&lo, &n_minus_1, rng) else {
                break;
            };

            if witness(&a) {
                return false;
            }
        }

        true
    }

    /// Strong Lucas probable prime test with Selfridge's method A
    /// (`P = 1`, `Q = (1 - D) / 4`, first `D` in `5, -7, 9, ...` with
    /// Jacobi symbol `-1`).
    pub fn is_strong_lucas_prime(&self) -> bool {
        if self <= &Self::one() || self.is_even() {
            return self.to_u64() == Some(2);
        }

        if self.to_u64().is_some_and(|n| SMALL_PRIMES.contains(&n)) {
            return true;
        }

        // perfect squares have no suitable D
        if self.is_square() {
            return false;
        }

        let n = self;
        let Ok(d) = selfridge_d(n) else {
            return false;
        };

        let q = (&Self::one() - &d) >> 2;
        let modn = |x: BigInt| x.rem_euclid(n);
        let half = |x: BigInt| {
            let x = modn(x);
            if x.is_odd() { (x + n) >> 1 } else { x >> 1 }
        };

        let n_plus_1 = n + &Self::one();
        let s = n_plus_1.trailing_zeros();
        let k = &n_plus_1 >> s;

        // U_1 = 1, V_1 = P = 1, Q^1
        let mut u = Self::one();
        let mut v = Self::one();
        let mut qk = modn(q.clone());

        for i in (0..k.bits().saturating_sub(1)).rev() {
            u = modn(&u * &v);
            v = modn(&v * &v - &(&qk << 1));
            qk = modn(&qk * &qk);

            if k.bit(i) {
                let (u_next, v_next) = (half(&u + &v), half(&d * &u + &v));
                u = u_next;
                v = v_next;
                qk = modn(&qk * &q);
            }
        }

        if u.is_zero() || v.is_zero() {
            return true;
        }

        for _ in 1..s {
            v = modn(&v * &v - &(&qk << 1));
            qk = modn(&qk * &qk);

            if v.is_zero() {
                return true;
            }
        }

        false
    }

    /// Baillie-PSW primality test: base-2 Miller-Rabin plus `rounds` random
    /// bases, and a strong Lucas test. Both must pass.
    pub fn is_prime(&self, rounds: usize, rng: &mut (impl CryptoRng + RngCore + ?Sized)) -> bool {
        match trial_division(self) {
            Trial::Prime => true,
            Trial::Composite => false,
            Trial::Unknown => self.is_probable_prime_mr(rounds, rng, true) && self.is_strong_lucas_prime(),
        }
    }

    /// Random prime of exactly `bits` bits.
    pub fn random_prime(bits: usize, rng: &mut (impl CryptoRng + RngCore + ?Sized)) -> Result<Self> {
        if bits < 2 {
            return Err(Error::InvalidArgument("primes need at least two bits"));
        }

        loop {
            let mut candidate = Self::random_bits(bits, rng);
            candidate.set_bit(bits - 1, true);

            if bits > 2 {
                candidate.set_bit(0, true);
            }

            if candidate.is_prime(DEFAULT_MR_ROUNDS, rng) {
                return Ok(candidate);
            }
        }
    }
}

/// First `D` in `5, -7, 9, -11, ...` with `(D / n) = -1`.
fn selfridge_d(n: &BigInt) -> Result<BigInt> {
    let mut d = 5i64;

    for _ in 0..1 << 16 {
        let candidate = BigInt::from_i64(d);

        match candidate.jacobi(n)? {
            -1 => return Ok(candidate),
            0 if candidate.abs() != *n => return Err(Error::InvalidArgument("n has a small factor")),
            _ => {}
        }

        d = if d > 0 { -(d + 2) } else { -(d - 2) };
    }

    Err(Error::InvalidArgument("no Selfridge parameter found"))
}

#[cfg(test)]
mod tests {
    use crate::BigInt;
    use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(0x5eed)
    }

    #[test]
    fn small_values() {
        let primes: alloc::vec::Vec<u64> = (0..200u64)
            .filter(|&n| BigInt::from(n).is_prime(4, &mut rng()))
            .collect();
        let expected: alloc::vec::Vec<u64> = (0..200u64)
            .filter(|&n| n > 1 && (2..n).all(|d| n % d != 0))
            .collect();
        assert_eq!(primes, expected);
    }

    #[test]
    fn strong_pseudoprimes() {
        // strong pseudoprime to base 2
        let spsp2 = BigInt::from(2047u32);
        assert!(spsp2.is_probable_prime_mr(0, &mut rng(), true));
        assert!(!spsp2.is_prime(8, &mut rng()));

        // Carmichael number
        assert!(!BigInt::from(561u32).is_prime(8, &mut rng()));

        // strong Lucas pseudoprimes
        for n in [5459u32, 5777, 10877, 16109, 18971] {
            assert!(BigInt::from(n).is_strong_lucas_prime());
        }
        assert!(!BigInt::from(5459u32).is_prime(8, &mut rng()));
    }

    #[test]
    fn large_primes() {
        let p256: BigInt = "0xffffffff00000001000000000000000000000000ffffffffffffffffffffffff"
            .parse()
            .unwrap();
        assert!(p256.is_prime(8, &mut rng()));
        assert!(!(&p256 + &BigInt::from(2u32)).is_prime(8, &mut rng()));

        let m127 = (BigInt::one() << 127) - BigInt::one();
        assert!(m127.is_strong_lucas_prime());
        assert!(m127.is_probable_prime_mr(4, &mut rng(), true));
    }

    #[test]
    fn generated_primes() {
        let p = BigInt::random_prime(96, &mut rng()).unwrap();
        assert_eq!(p.bits(), 96);
        assert!(p.is_strong_lucas_prime());
    }
}
