use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use easel_core::nearest_by;

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_by");
    for &n in &[1_000usize, 100_000usize] {
        let keys: Vec<f64> = (0..n).map(|i| i as f64 * 1.5).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut q = 0.0f64;
            b.iter(|| {
                q = (q + 17.3) % (n as f64 * 1.5);
                black_box(nearest_by(&keys, q, |k| *k));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nearest);
criterion_main!(benches);
