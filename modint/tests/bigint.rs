//! Cross-checks `BigInt` against `num-bigint`.

use modint::BigInt;
use num_bigint::{BigInt as NumBigInt, Sign};
use num_traits::{Euclid, Signed, Zero};
use proptest::prelude::*;

fn to_num(n: &BigInt) -> NumBigInt {
    let bytes = n.to_bytes_be_min();
    let sign = if n.is_negative() { Sign::Minus } else { Sign::Plus };
    NumBigInt::from_bytes_be(sign, &bytes)
}

prop_compose! {
    fn bigint()(neg in any::<bool>(), bytes in proptest::collection::vec(any::<u8>(), 0..80)) -> BigInt {
        let mag = BigInt::from_bytes_be(&bytes);
        if neg { -mag } else { mag }
    }
}

prop_compose! {
    fn nonzero()(n in bigint()) -> BigInt {
        if n.is_zero() { BigInt::from(7u32) } else { n }
    }
}

proptest! {
    #[test]
    fn ring_operations(a in bigint(), b in bigint()) {
        prop_assert_eq!(to_num(&(&a + &b)), to_num(&a) + to_num(&b));
        prop_assert_eq!(to_num(&(&a - &b)), to_num(&a) - to_num(&b));
        prop_assert_eq!(to_num(&(&a * &b)), to_num(&a) * to_num(&b));
        prop_assert_eq!(a.cmp(&b), to_num(&a).cmp(&to_num(&b)));
    }

    #[test]
    fn truncated_division(a in bigint(), b in nonzero()) {
        let (q, r) = a.div_rem(&b);
        prop_assert_eq!(to_num(&q), to_num(&a) / to_num(&b));
        prop_assert_eq!(to_num(&r), to_num(&a) % to_num(&b));
    }

    #[test]
    fn euclidean_division(a in bigint(), b in nonzero()) {
        let (q, r) = a.div_rem_euclid(&b);
        prop_assert_eq!(to_num(&q), Euclid::div_euclid(&to_num(&a), &to_num(&b)));
        prop_assert_eq!(to_num(&r), Euclid::rem_euclid(&to_num(&a), &to_num(&b)));
        prop_assert!(!r.is_negative());
    }

    #[test]
    fn bitwise(a in bigint(), b in bigint(), shift in 0usize..200) {
        prop_assert_eq!(to_num(&(&a & &b)), to_num(&a) & to_num(&b));
        prop_assert_eq!(to_num(&(&a | &b)), to_num(&a) | to_num(&b));
        prop_assert_eq!(to_num(&(&a ^ &b)), to_num(&a) ^ to_num(&b));
        prop_assert_eq!(to_num(&(&a << shift)), to_num(&a) << shift);
        prop_assert_eq!(to_num(&(&a >> shift)), to_num(&a) >> shift);
    }

    #[test]
    fn radix_strings(a in bigint(), radix in 2u32..=36) {
        let s = a.to_str_radix(radix);
        prop_assert_eq!(&s, &to_num(&a).to_str_radix(radix));
        prop_assert_eq!(BigInt::from_str_radix(&s, radix).unwrap(), a);
    }

    #[test]
    fn gcd_and_inverse(a in bigint(), m in nonzero()) {
        let m = m.abs();
        let (g, x, y) = a.egcd(&m);
        prop_assert_eq!(&(&a * &x) + &(&m * &y), g.clone());
        prop_assert_eq!(to_num(&g), num_integer_gcd(&to_num(&a), &to_num(&m)));

        match a.mod_inverse(&m) {
            Ok(inv) => prop_assert!((&a * &inv).rem_euclid(&m) == BigInt::one().rem_euclid(&m)),
            Err(_) => prop_assert!(!g.is_one()),
        }
    }

    #[test]
    fn modular_power(a in bigint(), e in 0u32..2000, m in nonzero()) {
        let m = m.abs();
        let expected = to_num(&a).modpow(&NumBigInt::from(e), &to_num(&m));
        let expected = Euclid::rem_euclid(&expected, &to_num(&m));
        prop_assert_eq!(to_num(&a.pow_mod(&BigInt::from(e), &m).unwrap()), expected);
    }

    #[test]
    fn integer_sqrt(a in bigint()) {
        let a = a.abs();
        let r = a.isqrt().unwrap();
        prop_assert!(r.sqr() <= a);
        prop_assert!((&r + &BigInt::one()).sqr() > a);
    }
}

fn num_integer_gcd(a: &NumBigInt, b: &NumBigInt) -> NumBigInt {
    let (mut a, mut b) = (a.abs(), b.abs());
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}
