use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::catalog::catalog;
use slot_engine::index::build_index;
use slot_engine::record::AvailabilityRecord;
use slot_engine::selector::{select_pair, select_single};
use std::hint::black_box;

/// 200 participants, each available in a band of slots somewhere in the day,
/// so every catalog slot ends up in the index.
fn records() -> Vec<AvailabilityRecord> {
    let slots = catalog();
    (0..200)
        .map(|i| {
            let start = (i * 7) % slots.len();
            let band: Vec<String> = (0..6)
                .map(|k| slots[(start + k * (i % 5 + 1)) % slots.len()].to_string())
                .collect();
            AvailabilityRecord::new(format!("participant-{i}"), &band)
        })
        .collect()
}

fn selection(c: &mut Criterion) {
    let records = records();

    c.bench_function("build_index", |b| {
        b.iter(|| black_box(build_index(black_box(&records))))
    });

    let index = build_index(&records);

    c.bench_function("select_single", |b| {
        b.iter(|| black_box(select_single(black_box(&index))))
    });

    c.bench_function("select_pair", |b| {
        b.iter(|| black_box(select_pair(black_box(&index))))
    });
}

criterion_group!(benches, selection);
criterion_main!(benches);
