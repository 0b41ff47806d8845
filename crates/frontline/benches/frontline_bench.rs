//! Criterion benchmarks for one side's `Frontline::update` on random maps.
//! Focus sizes: grids of 6x5, 10x8 and 16x12 nodes.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p frontline

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use frontline::prelude::*;

fn map(cols: usize, rows: usize, seed: u64) -> NodeGraph {
    let cfg = MapCfg {
        cols,
        rows,
        ..MapCfg::default()
    };
    draw_map(cfg, ReplayToken { seed, index: 0 })
        .build_graph()
        .unwrap()
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("frontline");
    for &(cols, rows) in &[(6usize, 5usize), (10, 8), (16, 12)] {
        let n = cols * rows;
        let g = map(cols, rows, 42);
        group.bench_with_input(BenchmarkId::new("update_side1", n), &g, |b, g| {
            b.iter_batched(
                || Frontline::new(Side(1), FrontlineCfg::default()),
                |mut f| {
                    let _stats = f.update(g, &[]);
                },
                BatchSize::SmallInput,
            )
        });

        let s = draw_map(
            MapCfg {
                cols,
                rows,
                ..MapCfg::default()
            },
            ReplayToken { seed: 42, index: 0 },
        );
        group.bench_with_input(BenchmarkId::new("run_scenario", n), &s, |b, s| {
            b.iter(|| run_scenario(s).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
