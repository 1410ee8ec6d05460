use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ksum_dp::ReachLayer;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_steps(rng: &mut StdRng, count: usize, max: usize) -> Vec<usize> {
    let mut steps: Vec<usize> = (0..count).map(|_| rng.gen_range(0..=max)).collect();
    steps.sort_unstable();
    steps.dedup();
    steps
}

fn bench_advance(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5155AA55);
    let width = 1 << 16;
    let steps = random_steps(&mut rng, 48, width / 4);
    let layer = ReachLayer::seed(steps.iter().copied(), width);

    let mut group = c.benchmark_group("layer_advance");
    group.bench_function("serial", |b| {
        b.iter(|| black_box(layer.advance_serial(black_box(&steps))))
    });
    #[cfg(feature = "parallel")]
    group.bench_function("parallel", |b| {
        b.iter(|| black_box(layer.advance_parallel(black_box(&steps))))
    });
    group.finish();
}

fn bench_seed(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xA1B2C3D4);
    let width = 1 << 16;
    let steps = random_steps(&mut rng, 2_048, width);

    c.bench_function("layer_seed", |b| {
        b.iter(|| black_box(ReachLayer::seed(steps.iter().copied(), width)))
    });
}

criterion_group!(benches, bench_advance, bench_seed);
criterion_main!(benches);
