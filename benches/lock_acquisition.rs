//! Benchmarks for lock acquisition latency

use criterion::{Criterion, criterion_group, criterion_main};
use global_lock::{GlobalLock, MemoryCache};

fn bench_memory_lock_acquisition(c: &mut Criterion) {
    let cache = MemoryCache::new();
    let lock = GlobalLock::new(cache, "bench-lock").unwrap();

    let mut group = c.benchmark_group("memory_lock");
    group.bench_function("try_acquire", |b| {
        b.to_async(tokio::runtime::Runtime::new().unwrap())
            .iter(|| async {
                if let Ok(Some(guard)) = lock.try_acquire().await {
                    let _ = guard.release().await;
                }
            });
    });

    group.bench_function("scoped", |b| {
        b.to_async(tokio::runtime::Runtime::new().unwrap())
            .iter(|| async {
                let _ = lock.scoped(|acquired| async move { acquired }).await;
            });
    });

    group.finish();
}

criterion_group!(benches, bench_memory_lock_acquisition);
criterion_main!(benches);
