//! Benchmark – corpus parsing throughput.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Deterministic corpus text with `pairs` coordinate pairs, rendered the way
/// the generator renders them (16 fractional digits).
fn make_corpus(pairs: usize) -> String {
    let mut out = String::from("{\"pairs\": [");
    for i in 0..pairs {
        let t = i as f64;
        if i > 0 {
            out.push(',');
        }
        out.push_str(&format!(
            "\n    {{\"x0\": {:.16}, \"y0\": {:.16}, \"x1\": {:.16}, \"y1\": {:.16}}}",
            (t * 37.416473).sin() * 180.0,
            (t * 11.926158).cos() * 90.0,
            (t * 73.123811).sin() * 180.0,
            (t * 29.552134).cos() * 90.0,
        ));
    }
    out.push_str(&format!("\n], \"avg\": 0.0, \"count\": {pairs}}}"));
    out
}

fn bench_parse_corpus(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_corpus");

    for &pairs in &[64usize, 1_024, 8_192] {
        let payload = make_corpus(pairs);
        group.throughput(Throughput::Bytes(payload.len() as u64));

        group.bench_with_input(BenchmarkId::new("arcspan", pairs), &payload, |b, text| {
            b.iter(|| {
                let root = arcspan::parse(black_box(text.as_bytes())).unwrap();
                black_box(root.child_count());
            });
        });

        group.bench_with_input(BenchmarkId::new("serde_json", pairs), &payload, |b, text| {
            b.iter(|| {
                let value: serde_json::Value =
                    serde_json::from_slice(black_box(text.as_bytes())).unwrap();
                black_box(value.is_object());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse_corpus);
criterion_main!(benches);
