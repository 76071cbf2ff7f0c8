//! Queue benchmarks
//!
//! Benchmarks for the circular array queue, the pooled linked queue and the
//! node pool behind it, with `VecDeque` as a baseline.
//!
//! Run with: `cargo bench --bench queues_bench -p ringlink-queues`

use std::collections::VecDeque;

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use ringlink_queues::collections::{ArrayQueue, LinkedQueue, NodePool};

const SIZES: [usize; 3] = [16, 256, 4096];

// ============================================================================
// Steady-state enqueue/dequeue
// ============================================================================

fn bench_steady_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_steady_state");

    for size in SIZES {
        group.throughput(Throughput::Elements(1));

        group.bench_with_input(BenchmarkId::new("array_queue", size), &size, |b, &size| {
            let mut queue = ArrayQueue::new(size);
            for i in 0..size / 2 {
                queue.enqueue(i as u64).unwrap();
            }
            let mut counter = 0u64;
            b.iter(|| {
                queue.enqueue(black_box(counter)).unwrap();
                black_box(queue.dequeue().unwrap());
                counter = counter.wrapping_add(1);
            });
        });

        group.bench_with_input(BenchmarkId::new("linked_queue", size), &size, |b, &size| {
            let mut queue = LinkedQueue::with_pool(size, NodePool::new());
            for i in 0..size / 2 {
                queue.enqueue(i as u64).unwrap();
            }
            let mut counter = 0u64;
            b.iter(|| {
                queue.enqueue(black_box(counter)).unwrap();
                black_box(queue.dequeue().unwrap());
                counter = counter.wrapping_add(1);
            });
        });

        group.bench_with_input(BenchmarkId::new("vec_deque", size), &size, |b, &size| {
            let mut queue = VecDeque::with_capacity(size);
            for i in 0..size / 2 {
                queue.push_back(i as u64);
            }
            let mut counter = 0u64;
            b.iter(|| {
                queue.push_back(black_box(counter));
                black_box(queue.pop_front());
                counter = counter.wrapping_add(1);
            });
        });
    }

    group.finish();
}

// ============================================================================
// Fill then drain
// ============================================================================

fn bench_fill_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_fill_drain");

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("array_queue", size), &size, |b, &size| {
            let mut queue = ArrayQueue::new(size);
            b.iter(|| {
                for i in 0..size {
                    queue.enqueue(i).unwrap();
                }
                while let Ok(item) = queue.dequeue() {
                    black_box(item);
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("linked_queue_warm", size), &size, |b, &size| {
            let mut queue = LinkedQueue::with_pool(0, NodePool::new());
            b.iter(|| {
                for i in 0..size {
                    queue.enqueue(i).unwrap();
                }
                while let Ok(item) = queue.dequeue() {
                    black_box(item);
                }
            });
        });
    }

    group.finish();
}

// ============================================================================
// Construction and pool reuse
// ============================================================================

fn bench_linked_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("linked_queue_construction");

    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("cold_pool", size), &size, |b, &size| {
            b.iter_batched(
                NodePool::<u64>::new,
                |pool| black_box(LinkedQueue::with_pool(size, pool)),
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("warm_pool", size), &size, |b, &size| {
            let pool = NodePool::<u64>::new();
            pool.preallocate(size + 1);
            b.iter(|| {
                let queue = LinkedQueue::with_pool(size, pool.clone());
                black_box(queue.slack());
            });
        });
    }

    group.finish();
}

// ============================================================================
// Iteration and copying
// ============================================================================

fn bench_iteration_and_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_iterate_clone");

    for size in SIZES {
        let mut array = ArrayQueue::new(size);
        let mut linked = LinkedQueue::with_pool(size, NodePool::new());
        for i in 0..size as u64 {
            array.enqueue(i).unwrap();
            linked.enqueue(i).unwrap();
        }
        // Shift the array head so iteration crosses the wrap point.
        for _ in 0..size / 2 {
            let item = array.dequeue().unwrap();
            array.enqueue(item).unwrap();
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("array_iter", size), &array, |b, queue| {
            b.iter(|| black_box(queue.iter().sum::<u64>()));
        });
        group.bench_with_input(BenchmarkId::new("linked_iter", size), &linked, |b, queue| {
            b.iter(|| black_box(queue.iter().sum::<u64>()));
        });
        group.bench_with_input(BenchmarkId::new("array_clone", size), &array, |b, queue| {
            b.iter(|| black_box(queue.clone()));
        });
        group.bench_with_input(BenchmarkId::new("linked_clone", size), &linked, |b, queue| {
            b.iter(|| black_box(queue.clone()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_steady_state,
    bench_fill_drain,
    bench_linked_construction,
    bench_iteration_and_clone
);
criterion_main!(benches);
