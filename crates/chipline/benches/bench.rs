use core::hint::black_box;
use core::time::Duration;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use chipline::{
    ConcurrentStack, ConsumeStatus, Generator, GeneratorConfig, SharedStorage, Worker,
};
use std::{
    num::NonZeroUsize,
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

// Number of items pushed per benchmark iteration (split across threads for
// the contended groups).
const TOTAL_ITEMS: usize = 4096;

/// Single-threaded push then pop of the whole batch.
fn bench_stack_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack/sequential");
    group.throughput(Throughput::Elements(TOTAL_ITEMS as u64));

    group.bench_function(format!("elems/{}", TOTAL_ITEMS), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let stack = ConcurrentStack::with_capacity(TOTAL_ITEMS);
                for i in 0..TOTAL_ITEMS {
                    stack.push(i);
                }
                while let Some(item) = stack.pop() {
                    black_box(item);
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Threads hammering one stack with interleaved pushes and pops.
fn bench_stack_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack/contended");
    let max_threads = num_cpus::get().max(1);

    for thread_count in [1, 2, 4, 8, 16] {
        if thread_count > max_threads * 2 {
            break;
        }
        let items_per_thread = TOTAL_ITEMS / thread_count;

        group.throughput(Throughput::Elements(TOTAL_ITEMS as u64));
        group.bench_function(
            format!("elems/{}/threads/{}", TOTAL_ITEMS, thread_count),
            |b| {
                b.iter_custom(|iters| {
                    let start = Instant::now();

                    for _ in 0..iters {
                        let stack = ConcurrentStack::with_capacity(TOTAL_ITEMS);
                        let barrier = Barrier::new(thread_count + 1);
                        scope(|s| {
                            for _ in 0..thread_count {
                                let stack = &stack;
                                let barrier = &barrier;
                                s.spawn(move || {
                                    barrier.wait();
                                    for i in 0..items_per_thread {
                                        stack.push(i);
                                        black_box(stack.pop());
                                    }
                                });
                            }
                            barrier.wait();
                        });
                    }

                    start.elapsed()
                });
            },
        );
    }

    group.finish();
}

/// Producer to blocked consumer handoff through the storage's condvar.
fn bench_storage_handoff(c: &mut Criterion) {
    let mut group = c.benchmark_group("storage/handoff");
    group.throughput(Throughput::Elements(TOTAL_ITEMS as u64));

    group.bench_function(format!("elems/{}", TOTAL_ITEMS), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let storage = SharedStorage::with_capacity(TOTAL_ITEMS);
                scope(|s| {
                    s.spawn(|| {
                        while let ConsumeStatus::Ready { item } = storage.wait_for_item() {
                            black_box(item);
                        }
                    });
                    for i in 0..TOTAL_ITEMS {
                        storage.produce(i);
                    }
                    storage.finish();
                });
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Full generator and worker actors with no pacing.
fn bench_actors(c: &mut Criterion) {
    let mut group = c.benchmark_group("actors/unpaced");
    group.throughput(Throughput::Elements(TOTAL_ITEMS as u64));

    let config = GeneratorConfig {
        run_for: Duration::from_secs(3600),
        interval: Duration::ZERO,
        max_items: NonZeroUsize::new(TOTAL_ITEMS),
    };

    group.bench_function(format!("elems/{}", TOTAL_ITEMS), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let storage = Arc::new(SharedStorage::with_capacity(TOTAL_ITEMS));
                let worker = Worker::new()
                    .spawn(Arc::clone(&storage), |item: usize| {
                        black_box(item);
                    })
                    .unwrap();
                let mut next = 0_usize;
                let source = move || {
                    next += 1;
                    next
                };
                Generator::new(source, config)
                    .spawn(Arc::clone(&storage))
                    .unwrap()
                    .join()
                    .unwrap();
                worker.join().unwrap();
            }

            start.elapsed()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_stack_sequential,
    bench_stack_contended,
    bench_storage_handoff,
    bench_actors,
);
criterion_main!(benches);
