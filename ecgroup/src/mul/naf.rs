//! Signed digit recodings.

use alloc::vec::Vec;
use modint::BigInt;

/// Width-`w` non-adjacent form of a non-negative `k`, least significant
/// digit first.
///
/// Every non-zero digit is odd and lies in `(-2^(w-1), 2^(w-1))`, and any
/// `w` consecutive digits contain at most one non-zero digit.
pub(crate) fn wnaf(k: &BigInt, w: usize) -> Vec<i8> {
    debug_assert!((2..=8).contains(&w));
    debug_assert!(!k.is_negative());

    let width = 1i64 << w;
    let half = width >> 1;
    let mut k = k.clone();
    let mut digits = Vec::with_capacity(k.bits() + 1);

    while !k.is_zero() {
        if k.is_odd() {
            let m = (k.low_u64() & (width as u64 - 1)) as i64;
            let d = if m >= half { m - width } else { m };

            k -= BigInt::from(d);
            digits.push(d as i8);
        } else {
            digits.push(0);
        }

        k >>= 1;
    }

    digits
}

/// Joint sparse form of two non-negative scalars, least significant digit
/// first. Digits are in `{-1, 0, 1}` and at most half of the columns are
/// non-zero on average.
pub(crate) fn jsf(k1: &BigInt, k2: &BigInt) -> [Vec<i8>; 2] {
    debug_assert!(!k1.is_negative() && !k2.is_negative());

    let (mut k1, mut k2) = (k1.clone(), k2.clone());
    let (mut d1, mut d2) = (0u64, 0u64);
    let mut out = [Vec::new(), Vec::new()];

    while !(k1.is_zero() && d1 == 0) || !(k2.is_zero() && d2 == 0) {
        let m1 = signed_mod4(&k1, d1);
        let m2 = signed_mod4(&k2, d2);

        let u1 = digit(&k1, d1, m1, m2);
        let u2 = digit(&k2, d2, m2, m1);

        out[0].push(u1);
        out[1].push(u2);

        // carry update: d ← 1 - d whenever 2d = u + 1
        if 2 * d1 as i8 == u1 + 1 {
            d1 = 1 - d1;
        }

        if 2 * d2 as i8 == u2 + 1 {
            d2 = 1 - d2;
        }

        k1 >>= 1;
        k2 >>= 1;
    }

    out
}

/// `(k + d) mod 4` mapped to `{-1, 0, 1, 2}`.
fn signed_mod4(k: &BigInt, d: u64) -> i8 {
    match (k.low_u64() + d) & 3 {
        3 => -1,
        m => m as i8,
    }
}

fn digit(k: &BigInt, d: u64, m: i8, other: i8) -> i8 {
    if m & 1 == 0 {
        return 0;
    }

    let m8 = (k.low_u64() + d) & 7;

    if (m8 == 3 || m8 == 5) && other == 2 { -m } else { m }
}

/// Evaluates a signed digit expansion, least significant digit first.
#[cfg(test)]
pub(crate) fn eval(digits: &[i8]) -> BigInt {
    digits
        .iter()
        .rev()
        .fold(BigInt::zero(), |acc, &d| (acc << 1) + BigInt::from(d))
}

#[cfg(test)]
mod tests {
    use super::{eval, jsf, wnaf};
    use modint::BigInt;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn wnaf_recodes(k in any::<u128>(), w in 2usize..=8) {
            let k = BigInt::from(k);
            let digits = wnaf(&k, w);
            prop_assert_eq!(eval(&digits), k);

            let bound = 1i16 << (w - 1);

            for (i, &d) in digits.iter().enumerate() {
                prop_assert!(d == 0 || (d & 1 == 1 && (d as i16).abs() < bound));

                if d != 0 {
                    let end = (i + w).min(digits.len());
                    prop_assert!(digits[i + 1..end].iter().all(|&x| x == 0));
                }
            }
        }

        #[test]
        fn jsf_recodes(a in any::<u128>(), b in any::<u128>()) {
            let (a, b) = (BigInt::from(a), BigInt::from(b));
            let [d1, d2] = jsf(&a, &b);

            prop_assert_eq!(d1.len(), d2.len());
            prop_assert_eq!(eval(&d1), a);
            prop_assert_eq!(eval(&d2), b);
            prop_assert!(d1.iter().chain(&d2).all(|d| (-1..=1).contains(d)));
        }
    }

    #[test]
    fn small_values() {
        assert!(wnaf(&BigInt::zero(), 4).is_empty());
        assert_eq!(wnaf(&BigInt::from(7u32), 2), [-1, 0, 0, 1]);
        assert_eq!(wnaf(&BigInt::from(7u32), 4), [7]);
    }
}
