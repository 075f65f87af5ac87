//! Group law and scalar multiplication properties.

use ecgroup::{Curve, CurveRef, Point, XPoint, params};
use modint::BigInt;
use proptest::prelude::*;
use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};

fn curves() -> Vec<CurveRef> {
    [params::P256, params::SECP256K1, params::ED25519, params::X25519, params::ED448]
        .iter()
        .map(|def| Curve::from_def(def).unwrap())
        .collect()
}

fn scalar(curve: &CurveRef, bytes: &[u8]) -> BigInt {
    let k = BigInt::from_bytes_be(bytes).rem_euclid(curve.order());
    if k.is_zero() { BigInt::one() } else { k }
}

/// Every representation of `g·k` the curve supports.
fn representations(p: &Point) -> Vec<Point> {
    let mut out = vec![p.to_affine()];
    out.extend(p.to_jacobian());
    out.extend(p.to_extended());
    out
}

prop_compose! {
    fn scalars()(a in any::<[u8; 32]>(), b in any::<[u8; 32]>(), c in any::<[u8; 32]>()) -> [[u8; 32]; 3] {
        [a, b, c]
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn commutative_and_associative(ks in scalars()) {
        for curve in curves() {
            let g = curve.generator();
            let [p, q, r] = ks.map(|k| g.mul_simple(&scalar(&curve, &k)));

            for (p, q) in representations(&p).iter().zip(representations(&q).iter().rev()) {
                prop_assert_eq!(p + q, q + p);
                prop_assert_eq!(&(p + q) + &r, p + &(q + &r));
                prop_assert!((p + q).validate().is_ok());
            }

            prop_assert_eq!(&p - &p, Point::identity(&curve));
            prop_assert_eq!(p.double(), &p + &p);
            prop_assert_eq!(&p + &Point::identity(&curve), p.clone());
        }
    }

    #[test]
    fn multiplication_strategies_agree(k in any::<[u8; 32]>()) {
        for curve in curves() {
            let k = scalar(&curve, &k);
            let g = curve.generator();
            let expected = g.mul_simple(&k);

            prop_assert_eq!(g.mul(&k), expected.clone());
            prop_assert_eq!(g.mul_wnaf(&k), expected.clone());
            prop_assert_eq!(g.precompute(4).mul(&k), expected.clone());

            let p = g.double();
            prop_assert_eq!(p.mul(&k), p.mul_simple(&k));
        }
    }

    #[test]
    fn multi_scalar(ks in scalars()) {
        for curve in curves() {
            let g = curve.generator();
            let [k1, k2, k3] = ks.map(|k| scalar(&curve, &k));
            let (p, q) = (g.double(), g.mul_simple(&BigInt::from_u64(5)));

            let expected = &(g.mul_simple(&k1) + p.mul_simple(&k2)) + &q.mul_simple(&k3);

            prop_assert_eq!(
                Point::mul_add(&g, &k1, &p, &k2),
                g.mul_simple(&k1) + p.mul_simple(&k2)
            );
            prop_assert_eq!(
                Point::mul_all(&[g.clone(), p.clone(), q.clone()], &[k1, k2, k3]).unwrap(),
                expected
            );
        }
    }
}

#[test]
fn glv_on_secp256k1() {
    let curve = Curve::from_def(&params::SECP256K1).unwrap();
    let endo = curve.endomorphism().expect("secp256k1 has a GLV endomorphism");
    let g = curve.generator();

    assert_eq!(endo.apply(&g), g.mul_simple(endo.lambda()));

    let k = curve.order() - &BigInt::from_u64(12345);
    let (k1, k2) = endo.split(&k).unwrap();
    assert!(k1.bits() <= 129 && k2.bits() <= 129);
    assert_eq!(g.mul(&k), g.mul_simple(&k));

    let p256 = Curve::from_def(&params::P256).unwrap();
    assert!(p256.endomorphism().is_none());
}

#[test]
fn blinded_and_ladder() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);

    for curve in curves() {
        let g = curve.generator();
        let k = scalar(&curve, &[0x5a; 32]);
        assert_eq!(g.mul_blind(&k, &mut rng).unwrap(), g.mul_simple(&k));

        let randomized = g.randomize(&mut rng).unwrap();
        assert_eq!(randomized, g);
    }

    let curve = Curve::from_def(&params::X25519).unwrap();
    let g = curve.generator();
    let base = XPoint::from_point(&g).unwrap();
    let k = scalar(&curve, &[0xa5; 32]);

    let (kp, next) = base.ladder(&k);
    assert_eq!(kp, g.mul_simple(&k).to_x().unwrap());
    assert_eq!(kp.recover(&g, &next).unwrap(), g.mul_simple(&k));
}

#[test]
fn torsion_and_cofactor() {
    for curve in curves() {
        let torsion = curve.torsion().unwrap();
        assert_eq!(BigInt::from_u64(torsion.len() as u64), *curve.cofactor());

        for t in &torsion {
            assert!(t.validate().is_ok());
            assert!(t.is_small_order());
            assert!(t.clear_cofactor().is_identity());
        }

        let g = curve.generator();
        assert!(g.is_torsion_free().unwrap());
        assert!(!g.is_small_order());

        if let Some(t) = torsion.iter().find(|t| !t.is_identity()) {
            assert!(!(&g + t).is_torsion_free().unwrap());
        }
    }
}

#[test]
fn batch_normalize_matches_affine() {
    let curve = Curve::from_def(&params::P256).unwrap();
    let g = curve.generator();
    let points: Vec<Point> = (1..6u64).map(|k| g.mul(&BigInt::from_u64(k))).collect();

    for (p, q) in Point::batch_normalize(&points).iter().zip(&points) {
        assert_eq!(p, q);
        assert!(matches!(p.coords(), ecgroup::Coords::Affine { .. }));
    }
}
