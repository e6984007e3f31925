//! Random message producer/consumer workload.

use core::fmt;
use core::time::Duration;
use std::thread;
use std::time::Instant;

use derive_more::derive::From;
use foundation_queues::{BoundedBlockingQueue, QueueError};
use serde::Deserialize;

/// Settings for a [`MessageWorkload`].
///
/// Every field has a default, so a partial TOML table is enough:
///
/// ```
/// use foundation_testing::scenarios::WorkloadConfig;
///
/// let config: WorkloadConfig = toml::from_str("consumers = 2").unwrap();
///
/// assert_eq!(config.consumers, 2);
/// assert_eq!(config.capacity, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Capacity of the shared queue
    pub capacity: usize,
    /// Number of producer threads
    pub producers: usize,
    /// Number of consumer threads
    pub consumers: usize,
    /// Upper bound of the random pause after each produce, in milliseconds
    pub max_producer_delay_ms: u64,
    /// Upper bound of the random pause after each consume, in milliseconds
    pub max_consumer_delay_ms: u64,
    /// Messages each producer sends before stopping; `None` runs until the
    /// queue is closed
    pub messages_per_producer: Option<usize>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            producers: 1,
            consumers: 3,
            max_producer_delay_ms: 100,
            max_consumer_delay_ms: 500,
            messages_per_producer: None,
        }
    }
}

/// Reasons a [`MessageWorkload`] cannot be created.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum WorkloadError {
    /// The queue rejected the configured capacity.
    Queue(QueueError),

    /// At least one producer is required.
    #[from(ignore)]
    NoProducers,

    /// At least one consumer is required, otherwise producers block forever.
    #[from(ignore)]
    NoConsumers,
}

impl core::error::Error for WorkloadError {}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadError::Queue(err) => write!(f, "WorkloadError::Queue({err})"),
            WorkloadError::NoProducers => write!(f, "WorkloadError::NoProducers"),
            WorkloadError::NoConsumers => write!(f, "WorkloadError::NoConsumers"),
        }
    }
}

/// Outcome of [`MessageWorkload::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadReport {
    /// Messages accepted by the queue
    pub produced: usize,
    /// Messages taken by each consumer, indexed by consumer id
    pub consumed_per_consumer: Vec<usize>,
    /// Wall time of the run
    pub duration: Duration,
}

impl WorkloadReport {
    /// Total messages consumed across all consumers.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed_per_consumer.iter().sum()
    }
}

impl fmt::Display for WorkloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== message workload ===")?;
        writeln!(f, "Produced: {}", self.produced)?;
        writeln!(f, "Consumed: {}", self.consumed())?;
        for (consumer_id, count) in self.consumed_per_consumer.iter().enumerate() {
            writeln!(f, "  consumer-{consumer_id}: {count}")?;
        }
        write!(f, "Duration: {:?}", self.duration)
    }
}

/// Producers emitting `"Random Message = N"` into a shared bounded queue
/// and consumers logging whatever they take out.
///
/// # Examples
///
/// ```
/// use foundation_testing::scenarios::{MessageWorkload, WorkloadConfig};
///
/// let config = WorkloadConfig {
///     producers: 2,
///     consumers: 2,
///     max_producer_delay_ms: 0,
///     max_consumer_delay_ms: 0,
///     messages_per_producer: Some(25),
///     ..WorkloadConfig::default()
/// };
///
/// let report = MessageWorkload::new(config).unwrap().run();
/// assert_eq!(report.produced, 50);
/// assert_eq!(report.consumed(), 50);
/// ```
pub struct MessageWorkload {
    config: WorkloadConfig,
    queue: BoundedBlockingQueue<String>,
}

impl MessageWorkload {
    /// Validates `config` and creates the shared queue.
    ///
    /// # Errors
    ///
    /// Fails when there are no producers or no consumers, or when the
    /// capacity is rejected by the queue.
    pub fn new(config: WorkloadConfig) -> Result<Self, WorkloadError> {
        if config.producers == 0 {
            return Err(WorkloadError::NoProducers);
        }
        if config.consumers == 0 {
            return Err(WorkloadError::NoConsumers);
        }

        let queue = BoundedBlockingQueue::new(config.capacity)?;
        Ok(Self { config, queue })
    }

    /// Handle to the shared queue.
    ///
    /// Closing it stops the producers; consumers drain what is left and exit.
    #[must_use]
    pub fn queue(&self) -> &BoundedBlockingQueue<String> {
        &self.queue
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    /// Runs until every producer has sent its messages, or until the queue
    /// is closed when no message limit is configured.
    ///
    /// # Panics
    ///
    /// Panics if a producer or consumer thread panics.
    #[must_use]
    pub fn run(&self) -> WorkloadReport {
        let start = Instant::now();
        tracing::info!(
            capacity = self.config.capacity,
            producers = self.config.producers,
            consumers = self.config.consumers,
            limit = ?self.config.messages_per_producer,
            "starting message workload"
        );

        let consumers: Vec<_> = (0..self.config.consumers)
            .map(|consumer_id| {
                let queue = self.queue.clone();
                let max_delay = self.config.max_consumer_delay_ms;
                thread::Builder::new()
                    .name(format!("consumer-{consumer_id}"))
                    .spawn(move || consume_messages(consumer_id, &queue, max_delay))
                    .expect("should spawn consumer thread")
            })
            .collect();

        let producers: Vec<_> = (0..self.config.producers)
            .map(|producer_id| {
                let queue = self.queue.clone();
                let max_delay = self.config.max_producer_delay_ms;
                let limit = self.config.messages_per_producer;
                thread::Builder::new()
                    .name(format!("producer-{producer_id}"))
                    .spawn(move || produce_messages(producer_id, &queue, max_delay, limit))
                    .expect("should spawn producer thread")
            })
            .collect();

        let produced: usize = producers
            .into_iter()
            .map(|handle| handle.join().expect("producer thread panicked"))
            .sum();

        if self.queue.close() {
            tracing::info!(produced, "producers finished, closing queue");
        }

        let consumed_per_consumer = consumers
            .into_iter()
            .map(|handle| handle.join().expect("consumer thread panicked"))
            .collect();

        let report = WorkloadReport {
            produced,
            consumed_per_consumer,
            duration: start.elapsed(),
        };
        tracing::info!(
            produced = report.produced,
            consumed = report.consumed(),
            duration = ?report.duration,
            "message workload finished"
        );
        report
    }
}

fn produce_messages(
    producer_id: usize,
    queue: &BoundedBlockingQueue<String>,
    max_delay_ms: u64,
    limit: Option<usize>,
) -> usize {
    let mut produced = 0;

    while limit.is_none_or(|limit| produced < limit) {
        let message = format!("Random Message = {}", fastrand::u32(..1_000_000));
        tracing::info!(producer_id, %message, "producing message");

        if let Err(err) = queue.produce(message) {
            tracing::debug!(producer_id, error = %err, "queue closed, producer stopping");
            break;
        }
        produced += 1;

        pause(max_delay_ms);
    }

    produced
}

fn consume_messages(
    consumer_id: usize,
    queue: &BoundedBlockingQueue<String>,
    max_delay_ms: u64,
) -> usize {
    let mut consumed = 0;

    while let Ok(message) = queue.consume() {
        tracing::info!(consumer_id, %message, "consumed message");
        consumed += 1;

        pause(max_delay_ms);
    }

    tracing::debug!(consumer_id, consumed, "queue closed and drained, consumer stopping");
    consumed
}

fn pause(max_delay_ms: u64) {
    if max_delay_ms == 0 {
        return;
    }
    thread::sleep(random_delay(max_delay_ms));
}

/// Uniform delay in `[0, max_delay_ms)` milliseconds; `max_delay_ms` must be positive.
fn random_delay(max_delay_ms: u64) -> Duration {
    Duration::from_millis(fastrand::u64(..max_delay_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_delay_stays_below_the_bound() {
        for _ in 0..1_000 {
            assert!(random_delay(2) < Duration::from_millis(2));
        }
        assert_eq!(random_delay(1), Duration::ZERO);
    }

    fn fast_config() -> WorkloadConfig {
        WorkloadConfig {
            max_producer_delay_ms: 0,
            max_consumer_delay_ms: 0,
            ..WorkloadConfig::default()
        }
    }

    #[test]
    fn test_rejects_missing_threads() {
        let config = WorkloadConfig {
            producers: 0,
            ..fast_config()
        };
        assert_eq!(MessageWorkload::new(config).err(), Some(WorkloadError::NoProducers));

        let config = WorkloadConfig {
            consumers: 0,
            ..fast_config()
        };
        assert_eq!(MessageWorkload::new(config).err(), Some(WorkloadError::NoConsumers));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let config = WorkloadConfig {
            capacity: 0,
            ..fast_config()
        };
        assert_eq!(
            MessageWorkload::new(config).err(),
            Some(WorkloadError::Queue(QueueError::InvalidCapacity(0)))
        );
    }

    #[test]
    fn test_limited_run_consumes_everything() {
        let config = WorkloadConfig {
            capacity: 2,
            producers: 3,
            consumers: 2,
            messages_per_producer: Some(40),
            ..fast_config()
        };

        let report = MessageWorkload::new(config).unwrap().run();
        assert_eq!(report.produced, 120);
        assert_eq!(report.consumed(), 120);
        assert_eq!(report.consumed_per_consumer.len(), 2);
    }

    #[test]
    fn test_report_display() {
        let report = WorkloadReport {
            produced: 3,
            consumed_per_consumer: vec![1, 2],
            duration: Duration::from_millis(5),
        };
        let rendered = report.to_string();
        assert!(rendered.contains("Produced: 3"));
        assert!(rendered.contains("Consumed: 3"));
        assert!(rendered.contains("consumer-1: 2"));
    }
}
