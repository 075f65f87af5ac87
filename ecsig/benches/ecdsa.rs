//! ECDSA and Schnorr benchmarks

use criterion::{Criterion, criterion_group, criterion_main};
use ecgroup::CurveRegistry;
use ecsig::{SecretKey, ecdsa, schnorr};
use hex_literal::hex;
use modint::BigInt;
use sha2::Sha256;
use std::hint::black_box;

fn test_scalar_d() -> BigInt {
    BigInt::from_bytes_be(&hex!(
        "bb488aef416a41d7680d1cf01d70f59b60d7f5f77e30e78b8bf9d2d882f156a6"
    ))
}

static TEST_Z: [u8; 32] = hex!("e33580eb6ed022aed6af20d92237635e7c20c5f1bcd6aee88182ed7180f6e267");

fn bench_ecdsa(c: &mut Criterion) {
    let mut group = c.benchmark_group("ecdsa");

    for name in ["P256", "SECP256K1"] {
        let curve = CurveRegistry::global().get(name).unwrap();
        let d = SecretKey::from_scalar(&curve, test_scalar_d().rem_euclid(curve.order())).unwrap();
        let q = d.public_key();

        group.bench_function(format!("{name} sign_prehash"), |b| {
            b.iter(|| ecdsa::sign_prehash::<Sha256>(black_box(&d), &black_box(TEST_Z)).unwrap())
        });

        let (s, _) = ecdsa::sign_prehash::<Sha256>(&d, &TEST_Z).unwrap();

        group.bench_function(format!("{name} verify_prehash"), |b| {
            b.iter(|| ecdsa::verify_prehash(black_box(&q), &black_box(TEST_Z), black_box(&s)))
        });
    }

    group.finish();
}

fn bench_schnorr(c: &mut Criterion) {
    let mut group = c.benchmark_group("schnorr");

    let curve = CurveRegistry::global().get("SECP256K1").unwrap();
    let keys: Vec<SecretKey> = (1..=16u64)
        .map(|i| SecretKey::from_scalar(&curve, &test_scalar_d() + &BigInt::from_u64(i)).unwrap())
        .collect();
    let publics: Vec<_> = keys.iter().map(SecretKey::public_key).collect();
    let signatures: Vec<_> = keys
        .iter()
        .map(|key| schnorr::sign::<Sha256>(key, &TEST_Z).unwrap())
        .collect();

    group.bench_function("verify x16", |b| {
        b.iter(|| {
            publics
                .iter()
                .zip(&signatures)
                .all(|(q, s)| schnorr::verify::<Sha256>(q, &TEST_Z, s))
        })
    });

    let batch: Vec<_> = publics
        .iter()
        .zip(&signatures)
        .map(|(q, s)| (q, &TEST_Z[..], s))
        .collect();

    group.bench_function("verify_batch x16", |b| {
        b.iter(|| schnorr::verify_batch::<Sha256>(black_box(&batch)))
    });

    group.finish();
}

criterion_group!(benches, bench_ecdsa, bench_schnorr);
criterion_main!(benches);
