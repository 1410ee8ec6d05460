use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use ksum_dp::solve;
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn random_values(rng: &mut StdRng, len: usize, range: i64) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(-range..=range)).collect()
}

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        Some(p) => p.memory() / 1024,
        None => 0,
    }
}

fn bench_ksum_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("ksum_by_count");
    for &z in &[2usize, 8, 32] {
        group.bench_function(format!("z_{z}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(42);
                    let a = random_values(&mut rng, 64, 500);
                    let s: i64 = (0..z).map(|_| a[rng.gen_range(0..a.len())]).sum();
                    (a, s)
                },
                |(a, s)| {
                    let before = rss_kib();
                    let found = solve(&a, z as i64, s);
                    let after = rss_kib();
                    criterion::black_box(found);
                    // record memory delta to stderr to avoid criterion noise
                    eprintln!("RSS KiB delta (z {z}): {}", after.saturating_sub(before));
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

fn bench_ksum_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("ksum_by_range");
    for &range in &[1_000i64, 10_000, 100_000] {
        let mut rng = StdRng::seed_from_u64(7);
        let a = random_values(&mut rng, 32, range);
        // inside the reachable span, so the guards never settle it
        let s = range / 2;
        group.bench_function(format!("range_{range}"), |b| {
            b.iter(|| criterion::black_box(solve(&a, 3, s)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ksum_count, bench_ksum_range);
criterion_main!(benches);
