//! Criterion benchmarks for TtlCache: add, get hit, get miss, sweep.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use ephemera_cache::{CacheConfig, TtlCache};

const PREFILL: u64 = 10_000;

fn prefilled(ttl: Duration) -> TtlCache<u64, u64> {
    let cache = TtlCache::with_config(CacheConfig::new(ttl).without_background_sweep()).unwrap();
    for i in 0..PREFILL {
        cache.add(i, i);
    }
    cache
}

fn bench_add(c: &mut Criterion) {
    let cache = prefilled(Duration::from_secs(3600));
    let mut g = c.benchmark_group("add");
    g.throughput(Throughput::Elements(1));
    let mut next = 0u64;
    g.bench_function("add_overwrite", |b| {
        b.iter(|| {
            next = (next + 1) % PREFILL;
            cache.add(black_box(next), next);
        });
    });
    g.finish();
}

fn bench_get(c: &mut Criterion) {
    let cache = prefilled(Duration::from_secs(3600));
    let mut g = c.benchmark_group("get");
    g.throughput(Throughput::Elements(1));
    g.bench_function("get_hit", |b| {
        b.iter(|| black_box(cache.get(black_box(&42u64))));
    });
    g.bench_function("get_miss", |b| {
        b.iter(|| black_box(cache.get(black_box(&(PREFILL + 1)))));
    });
    g.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let mut g = c.benchmark_group("sweep");
    g.throughput(Throughput::Elements(PREFILL));
    g.bench_function("evict_all_expired", |b| {
        b.iter_batched_ref(
            || {
                let cache = prefilled(Duration::from_nanos(1));
                std::thread::sleep(Duration::from_micros(10));
                cache
            },
            |cache| black_box(cache.evict_expired()),
            BatchSize::LargeInput,
        );
    });
    g.finish();
}

criterion_group!(benches, bench_add, bench_get, bench_sweep);
criterion_main!(benches);
