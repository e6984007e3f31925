use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use foundation_queues::BoundedBlockingQueue;
use foundation_testing::stress::{StressConfig, StressHarness};
use std::thread;
use std::time::Duration;

/// Benchmark produce followed by consume on a single thread.
fn bench_queue_uncontended(c: &mut Criterion) {
    c.bench_function("queue_produce_consume_uncontended", |b| {
        let queue = BoundedBlockingQueue::new(16).unwrap();

        b.iter(|| {
            queue.produce(black_box(1u64)).unwrap();
            black_box(queue.consume().unwrap());
        });
    });
}

/// Benchmark handing values across threads through a small queue.
fn bench_queue_handoff(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_handoff_1000_items");

    for capacity in [1, 10, 100] {
        group.bench_function(format!("capacity_{capacity}"), |b| {
            b.iter_batched(
                || BoundedBlockingQueue::new(capacity).unwrap(),
                |queue| {
                    let producer_queue = queue.clone();
                    let producer = thread::spawn(move || {
                        for i in 0..1000u64 {
                            producer_queue.produce(i).unwrap();
                        }
                    });

                    for _ in 0..1000 {
                        black_box(queue.consume().unwrap());
                    }
                    producer.join().unwrap();
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark the single producer, many consumers run with broadcast wake-ups.
fn bench_queue_spmc_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_spmc_scaling");
    group.sample_size(10);

    for consumers in [1, 4, 16] {
        group.bench_function(format!("{consumers}_consumers"), |b| {
            b.iter(|| {
                let config = StressConfig::new()
                    .consumers(consumers)
                    .items_per_producer(5_000)
                    .capacity(10);
                let result = StressHarness::new(config).run().unwrap();
                black_box(result.consumed);
            });
        });
    }

    group.finish();
}

/// Benchmark `try_consume` timeout accuracy on an empty queue.
fn bench_queue_timeout(c: &mut Criterion) {
    c.bench_function("queue_try_consume_timeout_100us", |b| {
        let queue = BoundedBlockingQueue::<u64>::new(1).unwrap();

        b.iter(|| {
            black_box(queue.try_consume(Duration::from_micros(100)).unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_queue_uncontended,
    bench_queue_handoff,
    bench_queue_spmc_scaling,
    bench_queue_timeout,
);
criterion_main!(benches);
