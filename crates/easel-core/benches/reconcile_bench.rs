use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use easel_core::{HandleSet, MarkGeometry, MarkKind, Rgba};

fn gen_targets(n: usize, height_seed: f64) -> Vec<(String, MarkGeometry)> {
    (0..n)
        .map(|i| {
            let g = MarkGeometry {
                x: i as f64 * 4.0,
                y: 300.0 - height_seed - i as f64,
                width: 3.0,
                height: height_seed + i as f64,
                radius: 0.0,
                color: Rgba::rgb((i % 256) as u8, 0x77, 0xb4),
            };
            (format!("k{i}"), g)
        })
        .collect()
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    for &n in &[1_000usize, 10_000usize] {
        let first = gen_targets(n, 10.0);
        let second = gen_targets(n, 40.0);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter_batched(
                || {
                    let mut set = HandleSet::new();
                    set.reconcile(&first, MarkKind::Bar { baseline: 300.0 }, 0.0, 750.0);
                    set
                },
                |mut set| {
                    let out = set.reconcile(&second, MarkKind::Bar { baseline: 300.0 }, 1000.0, 750.0);
                    black_box(out);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
