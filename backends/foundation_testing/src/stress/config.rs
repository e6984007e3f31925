//! Stress test configuration.

use core::time::Duration;

/// Configuration for a producer/consumer stress run.
#[derive(Debug, Clone, Copy)]
pub struct StressConfig {
    /// Number of producer threads
    producers: usize,
    /// Number of consumer threads
    consumers: usize,
    /// Sequential values emitted by each producer
    items_per_producer: usize,
    /// Capacity of the queue under test
    capacity: usize,
    /// Optional maximum duration for producing
    duration: Option<Duration>,
    /// When set, consumers poll with `try_consume` using this timeout
    consume_timeout: Option<Duration>,
    /// Whether produce/consume wait latencies are recorded
    record_latencies: bool,
}

impl StressConfig {
    /// Creates a new stress configuration with default values.
    ///
    /// Defaults:
    /// - `producers`: 1
    /// - `consumers`: 4
    /// - `items_per_producer`: 10 000
    /// - `capacity`: 10
    /// - `duration`: None (no time limit)
    /// - `consume_timeout`: None (blocking consumers)
    /// - `record_latencies`: false
    #[must_use]
    pub const fn new() -> Self {
        Self {
            producers: 1,
            consumers: 4,
            items_per_producer: 10_000,
            capacity: 10,
            duration: None,
            consume_timeout: None,
            record_latencies: false,
        }
    }

    /// Sets the number of producer threads.
    #[must_use]
    pub const fn producers(mut self, count: usize) -> Self {
        self.producers = count;
        self
    }

    /// Sets the number of consumer threads.
    #[must_use]
    pub const fn consumers(mut self, count: usize) -> Self {
        self.consumers = count;
        self
    }

    /// Sets how many values each producer emits.
    #[must_use]
    pub const fn items_per_producer(mut self, count: usize) -> Self {
        self.items_per_producer = count;
        self
    }

    /// Sets the queue capacity.
    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the maximum duration for producing.
    ///
    /// Once reached, producers stop early and the run drains what was
    /// already produced.
    #[must_use]
    pub const fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Sets the duration in seconds.
    #[must_use]
    pub const fn duration_secs(mut self, secs: u64) -> Self {
        self.duration = Some(Duration::from_secs(secs));
        self
    }

    /// Makes consumers use the bounded wait with the given timeout.
    #[must_use]
    pub const fn consume_timeout(mut self, timeout: Duration) -> Self {
        self.consume_timeout = Some(timeout);
        self
    }

    /// Records the time every produce and consume call spent waiting.
    #[must_use]
    pub const fn record_latencies(mut self, enabled: bool) -> Self {
        self.record_latencies = enabled;
        self
    }

    /// Returns the producer count.
    #[must_use]
    pub const fn get_producers(&self) -> usize {
        self.producers
    }

    /// Returns the consumer count.
    #[must_use]
    pub const fn get_consumers(&self) -> usize {
        self.consumers
    }

    /// Returns the number of values per producer.
    #[must_use]
    pub const fn get_items_per_producer(&self) -> usize {
        self.items_per_producer
    }

    /// Returns the queue capacity.
    #[must_use]
    pub const fn get_capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the optional duration.
    #[must_use]
    pub const fn get_duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Returns the optional consume timeout.
    #[must_use]
    pub const fn get_consume_timeout(&self) -> Option<Duration> {
        self.consume_timeout
    }

    /// Returns whether latencies are recorded.
    #[must_use]
    pub const fn get_record_latencies(&self) -> bool {
        self.record_latencies
    }
}

impl Default for StressConfig {
    fn default() -> Self {
        Self::new()
    }
}
