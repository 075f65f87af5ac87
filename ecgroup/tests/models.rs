//! Conversions between curve models.

use ecgroup::{Curve, Model, ModelMap, Point, params};
use modint::BigInt;

fn sample_points(curve: &ecgroup::CurveRef) -> Vec<Point> {
    let g = curve.generator();
    let mut points: Vec<Point> = [1u64, 2, 3, 1000, 123_456_789]
        .iter()
        .map(|k| g.mul(&BigInt::from_u64(*k)))
        .collect();

    points.push(curve.identity());
    points.extend(curve.torsion().unwrap());
    points
}

#[test]
fn edwards_short_montgomery_commute() {
    for def in [params::ED25519, params::ED448, params::CURVE1174] {
        let edwards = Curve::from_def(&def).unwrap();
        let short = edwards.derive_short().unwrap();
        let montgomery = edwards.derive_montgomery().unwrap();

        assert_eq!(short.model(), Model::Short);
        assert_eq!(montgomery.model(), Model::Montgomery);

        let to_short = ModelMap::new(&edwards, &short).unwrap();
        let short_to_mont = ModelMap::new(&short, &montgomery).unwrap();
        let to_mont = ModelMap::new(&edwards, &montgomery).unwrap();

        assert!(to_short.is_isomorphism() && to_mont.is_isomorphism());

        for p in sample_points(&edwards) {
            let s = to_short.map(&p).unwrap();
            assert!(s.validate().is_ok());

            let m = short_to_mont.map(&s).unwrap();
            assert_eq!(m, to_mont.map(&p).unwrap());
            assert_eq!(to_mont.unmap(&m).unwrap(), p);
            assert_eq!(to_short.unmap(&s).unwrap(), p);
        }
    }
}

#[test]
fn maps_are_homomorphisms() {
    let edwards = Curve::from_def(&params::ED25519).unwrap();
    let short = edwards.derive_short().unwrap();
    let map = ModelMap::new(&edwards, &short).unwrap();

    let g = edwards.generator();
    let p = g.mul(&BigInt::from_u64(77));
    let q = g.mul(&BigInt::from_u64(91));

    assert_eq!(
        map.map(&(&p + &q)).unwrap(),
        &map.map(&p).unwrap() + &map.map(&q).unwrap()
    );
    assert_eq!(map.map(&g).unwrap(), short.generator());
}

#[test]
fn isogeny_between_ed448_and_x448() {
    let edwards = Curve::from_def(&params::ED448).unwrap();
    let montgomery = Curve::from_def(&params::X448).unwrap();
    let map = ModelMap::new(&edwards, &montgomery).unwrap();

    assert!(!map.is_isomorphism());
    assert_eq!(map.map(&edwards.generator()).unwrap(), montgomery.generator());

    let p = edwards.generator().mul(&BigInt::from_u64(31337));
    let image = map.map(&p).unwrap();
    assert_eq!(image, montgomery.generator().mul(&BigInt::from_u64(31337)));
    assert_eq!(map.unmap(&image).unwrap(), p);
}

#[test]
fn short_curves_with_two_torsion() {
    let montgomery = Curve::from_def(&params::X25519).unwrap();
    let short = montgomery.derive_short().unwrap();
    let back = short.derive_montgomery().unwrap();

    let map = ModelMap::new(&short, &back).unwrap();

    for p in sample_points(&short) {
        let q = map.map(&p).unwrap();
        assert!(q.validate().is_ok());
        assert_eq!(map.unmap(&q).unwrap(), p);
    }

    let p256 = Curve::from_def(&params::P256).unwrap();
    assert!(p256.derive_montgomery().is_err());
    assert!(ModelMap::new(&p256, &short).is_err());
}
