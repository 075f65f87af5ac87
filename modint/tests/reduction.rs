//! Reduction contexts agree with plain integer arithmetic.

use modint::{BigInt, Context, Error, SqrtAlgorithm, Strategy};
use proptest::prelude::*;
use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};

const P256: &str = "0xffffffff00000001000000000000000000000000ffffffffffffffffffffffff";
const P224: &str = "0xffffffffffffffffffffffffffffffff000000000000000000000001";
const P448: &str = "0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

fn modulus(hex: &str) -> BigInt {
    hex.parse().unwrap()
}

fn p25519() -> BigInt {
    (BigInt::one() << 255) - BigInt::from(19u32)
}

prop_compose! {
    fn operand()(bytes in proptest::collection::vec(any::<u8>(), 0..72), neg in any::<bool>()) -> BigInt {
        let n = BigInt::from_bytes_be(&bytes);
        if neg { -n } else { n }
    }
}

proptest! {
    #[test]
    fn all_strategies_match_plain(a in operand(), b in operand()) {
        let cases = [
            (modulus(P256), Strategy::Montgomery),
            (modulus(P256), Strategy::Barrett),
            (modulus(P448), Strategy::Barrett),
            (p25519(), Strategy::Special),
            ((BigInt::one() << 521) - BigInt::one(), Strategy::Special),
        ];

        for (m, strategy) in cases {
            let ctx = Context::new(m.clone(), strategy).unwrap();
            let (x, y) = (ctx.lift(&a), ctx.lift(&b));
            prop_assert_eq!((&x * &y).lower(), (&a * &b).rem_euclid(&m));
            prop_assert_eq!((&x + &y).lower(), (&a + &b).rem_euclid(&m));
            prop_assert_eq!((&x - &y).lower(), (&a - &b).rem_euclid(&m));
            prop_assert_eq!(x.sqr().lower(), a.sqr().rem_euclid(&m));
        }
    }

    #[test]
    fn square_roots(a in operand()) {
        for m in [modulus(P256), modulus(P224), p25519(), modulus(P448)] {
            let ctx = Context::auto(m).unwrap();
            let x = ctx.lift(&a);
            let square = x.sqr();
            let root = square.sqrt().unwrap();
            prop_assert!(root == x || root == -&x);

            match x.sqrt() {
                Ok(r) => prop_assert_eq!(r.sqr(), x),
                Err(Error::NotASquare(_)) => prop_assert!(!x.is_square()),
                Err(e) => prop_assert!(false, "unexpected error {}", e),
            }
        }
    }

    #[test]
    fn inversion(a in operand()) {
        let ctx = Context::auto(modulus(P224)).unwrap();
        let x = ctx.lift(&a);

        match x.invert() {
            Ok(inv) => prop_assert!((&x * &inv).is_one()),
            Err(e) => {
                prop_assert!(x.is_zero());
                prop_assert_eq!(e, Error::NotInvertible);
            }
        }
    }
}

#[test]
fn sqrt_algorithm_selection() {
    let cases = [
        (modulus(P256), SqrtAlgorithm::Shanks),
        (modulus(P224), SqrtAlgorithm::TonelliShanks),
        (p25519(), SqrtAlgorithm::Atkin),
        (modulus(P448), SqrtAlgorithm::Shanks),
    ];

    for (m, algorithm) in cases {
        assert_eq!(Context::auto(m).unwrap().sqrt_algorithm(), algorithm);
    }
}

#[test]
fn divsqrt_matches_sqrt_of_ratio() {
    let ctx = Context::auto(p25519()).unwrap();
    let (u, v) = (ctx.from_u64(9), ctx.from_u64(4));
    let r = u.divsqrt(&v).unwrap();
    assert_eq!(&r.sqr() * &v, u);
    assert_eq!(u.divsqrt(&ctx.zero()), Err(Error::NotInvertible));
}

#[test]
fn random_residues_are_canonical() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let ctx = Context::auto(modulus(P256)).unwrap();

    for _ in 0..32 {
        let x = ctx.random(&mut rng);
        assert!(x.lower() < *ctx.modulus());
        assert_eq!(ctx.from_bytes_be(&x.to_bytes_be()).unwrap(), x);
        assert!(!ctx.random_nonzero(&mut rng).unwrap().is_zero());
    }
}
