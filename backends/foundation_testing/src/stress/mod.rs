//! Stress test framework for the bounded queues.
//!
//! Provides configurable high-contention producer/consumer runs with:
//! - Producer and consumer count control
//! - Per-producer sequential values, so loss, duplication and reordering
//!   can be detected after the run
//! - Time-based duration limits
//! - Optional wait latency collection

use core::fmt;
use core::time::Duration;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use derive_more::derive::From;
use foundation_queues::{BoundedBlockingQueue, QueueError};

use crate::metrics::Metrics;

pub mod config;
pub mod sync;

pub use config::StressConfig;

/// Reasons a [`StressHarness`] refuses to run.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum StressError {
    /// The queue rejected the configured capacity.
    Queue(QueueError),

    /// Producers would block on a full queue with nobody draining it.
    #[from(ignore)]
    NoConsumers,
}

impl core::error::Error for StressError {}

impl fmt::Display for StressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StressError::Queue(err) => write!(f, "StressError::Queue({err})"),
            StressError::NoConsumers => write!(f, "StressError::NoConsumers"),
        }
    }
}

/// Result alias for stress runs.
pub type StressRunResult<T> = core::result::Result<T, StressError>;

/// A value emitted by a producer: `(producer index, sequence number)`.
type Tagged = (usize, usize);

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressResult {
    /// Values successfully handed to the queue
    pub produced: usize,
    /// Values returned by consumers
    pub consumed: usize,
    /// Values consumed more than once (counted per extra delivery)
    pub duplicates: usize,
    /// Produced values that no consumer returned
    pub missing: usize,
    /// Times a consumer saw a producer's sequence go backwards
    pub order_violations: usize,
    /// Bounded waits that returned without a value
    pub timeouts: usize,
    /// Largest queue length a consumer observed right after consuming
    pub max_observed_len: usize,
    /// Queue capacity used for the run
    pub capacity: usize,
    /// Total time taken for the test
    pub duration: Duration,
    /// Time spent inside `produce` calls, in nanoseconds
    pub produce_latencies: Vec<u64>,
    /// Time spent inside `consume` calls, in nanoseconds
    pub consume_latencies: Vec<u64>,
}

impl StressResult {
    /// Returns `true` when every produced value was consumed exactly once,
    /// in per-producer order, without the queue exceeding its capacity.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.produced == self.consumed
            && self.duplicates == 0
            && self.missing == 0
            && self.order_violations == 0
            && self.max_observed_len <= self.capacity
    }

    /// Returns the total number of queue operations.
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.produced + self.consumed
    }

    /// Returns operations per second.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn operations_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.total_operations() as f64 / secs
        }
    }

    /// Builds throughput and latency metrics for this run.
    #[must_use]
    pub fn metrics(&self) -> Metrics {
        Metrics::new(self.total_operations(), self.duration)
            .with_throughput()
            .with_latencies(
                self.produce_latencies.clone(),
                self.consume_latencies.clone(),
            )
    }
}

/// What a single consumer thread saw.
#[derive(Default)]
struct ConsumerTrace {
    values: Vec<Tagged>,
    latencies: Vec<u64>,
    timeouts: usize,
    max_observed_len: usize,
}

/// Producer/consumer stress harness.
///
/// Spawns the configured producers and consumers around one
/// [`BoundedBlockingQueue`], closes the queue once every producer is done
/// and checks the consumed values against what was produced.
pub struct StressHarness {
    config: StressConfig,
}

impl StressHarness {
    /// Creates a new stress test harness with the given configuration.
    #[must_use]
    pub const fn new(config: StressConfig) -> Self {
        Self { config }
    }

    /// Runs the configured workload to completion.
    ///
    /// # Examples
    ///
    /// ```
    /// use foundation_testing::stress::{StressConfig, StressHarness};
    ///
    /// let config = StressConfig::new().items_per_producer(1000);
    /// let result = StressHarness::new(config).run().unwrap();
    ///
    /// assert_eq!(result.produced, 1000);
    /// assert!(result.is_consistent());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`StressError::Queue`] when the configured capacity is zero and
    /// [`StressError::NoConsumers`] when no consumer is configured.
    ///
    /// # Panics
    ///
    /// Panics if any worker thread panics during the stress test execution.
    pub fn run(self) -> StressRunResult<StressResult> {
        if self.config.get_consumers() == 0 {
            return Err(StressError::NoConsumers);
        }

        let queue: BoundedBlockingQueue<Tagged> =
            BoundedBlockingQueue::new(self.config.get_capacity())?;

        tracing::info!(
            producers = self.config.get_producers(),
            consumers = self.config.get_consumers(),
            items_per_producer = self.config.get_items_per_producer(),
            capacity = self.config.get_capacity(),
            "starting queue stress run"
        );

        let start = Instant::now();
        let produced = Arc::new(AtomicUsize::new(0));

        // Closing releases producers blocked on a full queue; consumers
        // still drain whatever was accepted.
        if let Some(duration) = self.config.get_duration() {
            let queue = queue.clone();
            thread::spawn(move || {
                thread::sleep(duration);
                if queue.close() {
                    tracing::debug!(?duration, "stress duration reached, queue closed");
                }
            });
        }

        let consumer_handles: Vec<_> = (0..self.config.get_consumers())
            .map(|consumer_id| {
                let queue = queue.clone();
                let config = self.config;
                thread::spawn(move || consume_until_closed(consumer_id, &queue, &config))
            })
            .collect();

        let producer_handles: Vec<_> = (0..self.config.get_producers())
            .map(|producer_id| {
                let queue = queue.clone();
                let config = self.config;
                let produced = Arc::clone(&produced);
                thread::spawn(move || produce_sequence(producer_id, &queue, &config, &produced))
            })
            .collect();

        let mut produced_per_producer = Vec::with_capacity(producer_handles.len());
        let mut produce_latencies = Vec::new();
        for handle in producer_handles {
            let (count, latencies) = handle.join().expect("Producer panicked during stress test");
            produced_per_producer.push(count);
            produce_latencies.extend(latencies);
        }

        // Every producer is done, let consumers drain and exit.
        queue.close();

        let traces: Vec<ConsumerTrace> = consumer_handles
            .into_iter()
            .map(|handle| handle.join().expect("Consumer panicked during stress test"))
            .collect();

        let duration = start.elapsed();
        let result = analyze(
            &produced_per_producer,
            traces,
            produce_latencies,
            produced.load(Ordering::Relaxed),
            self.config.get_capacity(),
            duration,
        );

        if result.is_consistent() {
            tracing::info!(
                produced = result.produced,
                consumed = result.consumed,
                ?duration,
                "queue stress run completed"
            );
        } else {
            tracing::warn!(
                produced = result.produced,
                consumed = result.consumed,
                duplicates = result.duplicates,
                missing = result.missing,
                order_violations = result.order_violations,
                max_observed_len = result.max_observed_len,
                "queue stress run found inconsistencies"
            );
        }

        Ok(result)
    }
}

fn produce_sequence(
    producer_id: usize,
    queue: &BoundedBlockingQueue<Tagged>,
    config: &StressConfig,
    produced: &AtomicUsize,
) -> (usize, Vec<u64>) {
    let mut latencies = Vec::new();
    let mut count = 0;

    for seq in 0..config.get_items_per_producer() {
        let started = Instant::now();
        if queue.produce((producer_id, seq)).is_err() {
            tracing::debug!(producer_id, seq, "queue closed, producer stopping");
            break;
        }
        if config.get_record_latencies() {
            latencies.push(elapsed_nanos(started));
        }

        count += 1;
        produced.fetch_add(1, Ordering::Relaxed);
    }

    (count, latencies)
}

fn consume_until_closed(
    consumer_id: usize,
    queue: &BoundedBlockingQueue<Tagged>,
    config: &StressConfig,
) -> ConsumerTrace {
    let mut trace = ConsumerTrace::default();

    loop {
        let started = Instant::now();
        let value = match config.get_consume_timeout() {
            Some(timeout) => match queue.try_consume(timeout) {
                Ok(Some(value)) => value,
                Ok(None) => {
                    trace.timeouts += 1;
                    continue;
                }
                Err(_) => break,
            },
            None => match queue.consume() {
                Ok(value) => value,
                Err(_) => break,
            },
        };

        if config.get_record_latencies() {
            trace.latencies.push(elapsed_nanos(started));
        }
        trace.max_observed_len = trace.max_observed_len.max(queue.len());
        trace.values.push(value);
    }

    tracing::debug!(
        consumer_id,
        consumed = trace.values.len(),
        timeouts = trace.timeouts,
        "consumer finished"
    );
    trace
}

fn analyze(
    produced_per_producer: &[usize],
    traces: Vec<ConsumerTrace>,
    produce_latencies: Vec<u64>,
    produced: usize,
    capacity: usize,
    duration: Duration,
) -> StressResult {
    let mut deliveries: Vec<Vec<u32>> = produced_per_producer
        .iter()
        .map(|count| vec![0; *count])
        .collect();

    let mut consumed = 0;
    let mut duplicates = 0;
    let mut order_violations = 0;
    let mut timeouts = 0;
    let mut max_observed_len = 0;
    let mut consume_latencies = Vec::new();

    for trace in traces {
        let mut last_seq: Vec<Option<usize>> = vec![None; produced_per_producer.len()];

        for (producer_id, seq) in trace.values {
            consumed += 1;

            if let Some(slot) = deliveries
                .get_mut(producer_id)
                .and_then(|seqs| seqs.get_mut(seq))
            {
                *slot += 1;
                if *slot > 1 {
                    duplicates += 1;
                }
            }

            if let Some(last) = last_seq.get_mut(producer_id) {
                if matches!(*last, Some(previous) if previous >= seq) {
                    order_violations += 1;
                }
                *last = Some(seq);
            }
        }

        timeouts += trace.timeouts;
        max_observed_len = max_observed_len.max(trace.max_observed_len);
        consume_latencies.extend(trace.latencies);
    }

    let missing = deliveries
        .iter()
        .flatten()
        .filter(|count| **count == 0)
        .count();

    StressResult {
        produced,
        consumed,
        duplicates,
        missing,
        order_violations,
        timeouts,
        max_observed_len,
        capacity,
        duration,
        produce_latencies,
        consume_latencies,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_nanos(started: Instant) -> u64 {
    started.elapsed().as_nanos() as u64
}
