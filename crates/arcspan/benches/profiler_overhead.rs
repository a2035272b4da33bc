//! Benchmark – cost of a scoped section around trivial work.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use arcspan::profiler::{Profiler, Site};

const SECTIONS_PER_RUN: usize = 1_000;

fn bench_section_push(c: &mut Criterion) {
    let site = Site::new("benches/profiler_overhead.rs", 12, "bench", Some("hot"));

    c.bench_function("section_guard_x1000", |b| {
        b.iter_batched(
            || {
                // Fresh ring per run keeps the slot counter in bounds.
                let profiler = Profiler::with_capacity(2 * SECTIONS_PER_RUN + 16, 1_000_000_000);
                profiler.start();
                profiler
            },
            |profiler| {
                for i in 0..SECTIONS_PER_RUN {
                    let _section = profiler.section(site);
                    black_box(i);
                }
                black_box(profiler.stop_and_collect(None));
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("inactive_section_x1000", |b| {
        let profiler = Profiler::with_capacity(16, 1_000_000_000);
        b.iter(|| {
            for i in 0..SECTIONS_PER_RUN {
                let _section = profiler.section(site);
                black_box(i);
            }
        });
    });
}

criterion_group!(benches, bench_section_push);
criterion_main!(benches);
