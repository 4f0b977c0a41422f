//! Benchmarks for task submission and drain throughput.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use taskwell::ThreadPool;

fn submit_and_drain(pool: &ThreadPool, tasks: usize) {
    let done = Arc::new(AtomicUsize::new(0));

    for _ in 0..tasks {
        let done = done.clone();
        pool.execute(move || {
            done.fetch_add(1, Ordering::Release);
        })
        .unwrap();
    }

    while done.load(Ordering::Acquire) < tasks {
        std::hint::spin_loop();
    }
}

fn bench_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_and_drain");

    for &workers in &[1usize, 2, 4] {
        let pool = ThreadPool::with_threads(workers).unwrap();

        for &tasks in &[100usize, 1_000] {
            group.bench_with_input(
                BenchmarkId::new(format!("{workers}_workers"), tasks),
                &tasks,
                |b, &tasks| b.iter(|| submit_and_drain(&pool, tasks)),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_submit);
criterion_main!(benches);
