//! Store read and write path benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use entrystore_bench::{generate_entries, random_id};
use entrystore_codec::JsonCodec;
use entrystore_core::{EntryStore, StoreConfig, WriteMode};
use entrystore_testkit::{TestEntry, TestEntryStore};
use tempfile::TempDir;

/// Open a store in a fresh temporary directory holding `count` entries.
fn seeded_store(count: u32, config: StoreConfig) -> (TempDir, TestEntryStore) {
    let dir = TempDir::new().unwrap();
    let store =
        EntryStore::open_with_config(dir.path().join("bench.json"), JsonCodec::compact(), config)
            .unwrap();
    store.write_all(&generate_entries(count, 16));
    (dir, store)
}

/// Benchmark whole-document reads.
fn bench_get_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_all");

    for count in [10u32, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let (_dir, store) = seeded_store(count, StoreConfig::default());
            b.iter(|| {
                let entries = store.get_all();
                black_box(entries);
            });
        });
    }

    group.finish();
}

/// Benchmark lookups by matcher.
fn bench_find_direct(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_direct");

    for count in [100u32, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let (_dir, store) = seeded_store(count, StoreConfig::default());
            b.iter(|| {
                let probe = TestEntry::new(random_id(count), "");
                black_box(store.find_direct(&probe, None));
            });
        });
    }

    group.finish();
}

/// Benchmark add-or-replace under both write modes.
fn bench_add_entry(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_entry");
    group.sample_size(20);

    for (name, mode) in [("truncate", WriteMode::Truncate), ("atomic", WriteMode::AtomicReplace)] {
        group.bench_function(name, |b| {
            let (_dir, store) = seeded_store(100, StoreConfig::new().write_mode(mode));
            b.iter(|| {
                store.add_entry(TestEntry::new(random_id(200), "bench"), true);
            });
        });
    }

    group.finish();
}

/// Benchmark deleting absent entries, which reads but never writes.
fn bench_delete_missing(c: &mut Criterion) {
    c.bench_function("delete_missing", |b| {
        let (_dir, store) = seeded_store(100, StoreConfig::default());
        let missing = TestEntry::new(u32::MAX, "");
        b.iter(|| {
            black_box(store.delete_entry(black_box(&missing)));
        });
    });
}

criterion_group!(
    benches,
    bench_get_all,
    bench_find_direct,
    bench_add_entry,
    bench_delete_missing,
);

criterion_main!(benches);
