//! Scalar multiplication benchmarks.

use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use ecgroup::{Curve, CurveRef, Encoder, MapToCurve, Point, params};
use hex_literal::hex;
use modint::BigInt;
use std::hint::black_box;

fn test_scalar(curve: &CurveRef) -> BigInt {
    BigInt::from_bytes_be(&hex!(
        "519b423d715f8b581f4fa8ee59f4771a5b44c8130b4e3eacca54a56dda72b464"
    ))
    .rem_euclid(curve.order())
}

fn bench_curve<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, curve: &CurveRef) {
    let k = test_scalar(curve);
    let g = curve.generator();
    let p = g.double();

    group.bench_function(format!("{} fixed base", curve.name()), |b| {
        b.iter(|| g.mul(black_box(&k)))
    });
    group.bench_function(format!("{} variable base", curve.name()), |b| {
        b.iter(|| p.mul(black_box(&k)))
    });
    group.bench_function(format!("{} double and add", curve.name()), |b| {
        b.iter(|| p.mul_simple(black_box(&k)))
    });
    group.bench_function(format!("{} mul_add", curve.name()), |b| {
        b.iter(|| Point::mul_add(&g, black_box(&k), &p, black_box(&k)))
    });
}

fn bench_scalar_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar multiplication");

    for def in [params::P256, params::SECP256K1, params::ED25519, params::X25519] {
        bench_curve(&mut group, &Curve::from_def(&def).unwrap());
    }

    group.finish();
}

fn bench_maps(c: &mut Criterion) {
    let mut group = c.benchmark_group("map to curve");

    for def in [params::P256, params::SECP256K1, params::X25519, params::CURVE1174] {
        let curve = Curve::from_def(&def).unwrap();
        let encoder = Encoder::for_curve(&curve).unwrap();
        let u = curve.field().from_u64(0x1234_5678);

        group.bench_function(format!("{} {}", curve.name(), encoder.name()), |b| {
            b.iter(|| encoder.map_to_curve(black_box(&u)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scalar_mul, bench_maps);
criterion_main!(benches);
