//! Maps to curve and their inverses, on every built-in curve.

use ecgroup::{Curve, CurveRef, Encoder, MapToCurve, params};
use proptest::prelude::*;
use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};
use sha2::{Sha256, Sha512};

fn encoders() -> Vec<(CurveRef, Encoder)> {
    params::CurveDef::BUILTIN
        .iter()
        .map(|def| {
            let curve = Curve::from_def(def).unwrap();
            let encoder = Encoder::for_curve(&curve).unwrap();
            (curve, encoder)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn forward_is_total_and_invertible(seed in any::<u64>()) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);

        for (curve, encoder) in encoders() {
            let u = curve.field().random(&mut rng);
            let p = encoder.map_to_curve(&u);
            prop_assert!(p.validate().is_ok(), "{}", curve.name());

            let preimages: Vec<_> = (0..encoder.hints())
                .filter_map(|hint| encoder.map_to_field(&p, hint).ok())
                .collect();

            prop_assert!(preimages.contains(&u), "{}", curve.name());

            for v in preimages {
                prop_assert_eq!(encoder.map_to_curve(&v), p.clone());
            }
        }
    }
}

#[test]
fn exceptional_inputs() {
    for (curve, encoder) in encoders() {
        let field = curve.field();

        for u in [field.zero(), field.one(), field.from_i64(-1)] {
            assert!(encoder.map_to_curve(&u).validate().is_ok(), "{}", curve.name());
        }

        assert!(encoder.map_to_field(&curve.generator(), encoder.hints()).is_err());
    }
}

#[test]
fn hash_encoding_round_trip() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);

    for (curve, encoder) in encoders() {
        let p = curve.generator().double();
        let bytes = encoder.point_to_hash(&p, &mut rng).unwrap();

        assert_eq!(bytes.len(), 2 * curve.field_bytes());
        assert_eq!(encoder.hash_to_point(&bytes).unwrap(), p, "{}", curve.name());
    }
}

#[test]
fn hash_to_curve_lands_in_subgroup() {
    for (curve, encoder) in encoders() {
        let dst = b"ecgroup-test-XMD:SHA-512_RO_";

        let p = encoder.hash_to_curve::<Sha512>(b"message", dst).unwrap();
        assert!(p.validate().is_ok());
        assert!(p.is_torsion_free().unwrap(), "{}", curve.name());

        let q = encoder.encode_to_curve::<Sha256>(b"message", dst).unwrap();
        assert!(q.is_torsion_free().unwrap());

        assert_ne!(p, encoder.hash_to_curve::<Sha512>(b"other message", dst).unwrap());
    }
}
