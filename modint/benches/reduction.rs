//! Reduction strategy benchmarks.

use criterion::{Criterion, criterion_group, criterion_main};
use modint::{BigInt, Context, Strategy};
use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};
use std::hint::black_box;

fn bench_mul(c: &mut Criterion) {
    let p: BigInt = "0xffffffff00000001000000000000000000000000ffffffffffffffffffffffff"
        .parse()
        .unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let mut group = c.benchmark_group("mul");

    for strategy in [Strategy::Plain, Strategy::Montgomery, Strategy::Barrett] {
        let ctx = Context::new(p.clone(), strategy).unwrap();
        let (x, y) = (ctx.random(&mut rng), ctx.random(&mut rng));
        group.bench_function(format!("{strategy:?}"), |b| b.iter(|| black_box(&x) * black_box(&y)));
    }

    let k256 = Context::special(256, &BigInt::from(0x1_0000_03d1u64)).unwrap();
    let (x, y) = (k256.random(&mut rng), k256.random(&mut rng));
    group.bench_function("Special", |b| b.iter(|| black_box(&x) * black_box(&y)));
    group.finish();
}

fn bench_sqrt(c: &mut Criterion) {
    let ctx = Context::auto((BigInt::one() << 255) - BigInt::from(19u32)).unwrap();
    let x = ctx.from_u64(4);
    c.bench_function("sqrt 2^255-19", |b| b.iter(|| black_box(&x).sqrt()));
}

criterion_group!(benches, bench_mul, bench_sqrt);
criterion_main!(benches);
