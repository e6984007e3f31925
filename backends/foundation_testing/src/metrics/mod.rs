//! Performance metrics collection and reporting.

pub mod reporter;

pub use reporter::PerformanceReport;

use core::time::Duration;

/// Throughput and wait latencies of a queue run.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Time producers spent inside `produce` (in nanoseconds)
    pub produce_latencies: Vec<u64>,
    /// Time consumers spent inside `consume` (in nanoseconds)
    pub consume_latencies: Vec<u64>,
    /// Throughput (operations per second)
    pub throughput: f64,
    /// Total operations completed
    pub operations: usize,
    /// Total duration
    pub duration: Duration,
}

impl Metrics {
    /// Creates a new metrics collection.
    #[must_use]
    pub const fn new(operations: usize, duration: Duration) -> Self {
        Self {
            produce_latencies: Vec::new(),
            consume_latencies: Vec::new(),
            throughput: 0.0,
            operations,
            duration,
        }
    }

    /// Calculates throughput from operations and duration.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn with_throughput(mut self) -> Self {
        let secs = self.duration.as_secs_f64();
        self.throughput = if secs > 0.0 {
            self.operations as f64 / secs
        } else {
            0.0
        };
        self
    }

    /// Adds latency measurements for both sides of the queue.
    #[must_use]
    pub fn with_latencies(mut self, produce: Vec<u64>, consume: Vec<u64>) -> Self {
        self.produce_latencies = produce;
        self.consume_latencies = consume;
        self
    }

    /// Summary of producer wait latencies, `None` when none were recorded.
    #[must_use]
    pub fn produce_summary(&self) -> Option<LatencySummary> {
        LatencySummary::from_samples(&self.produce_latencies)
    }

    /// Summary of consumer wait latencies, `None` when none were recorded.
    #[must_use]
    pub fn consume_summary(&self) -> Option<LatencySummary> {
        LatencySummary::from_samples(&self.consume_latencies)
    }
}

/// Order statistics over a set of latency samples, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySummary {
    /// Number of samples
    pub samples: usize,
    /// Smallest sample
    pub min: u64,
    /// Arithmetic mean
    pub avg: f64,
    /// Median sample
    pub median: u64,
    /// 95th percentile
    pub p95: u64,
    /// 99th percentile
    pub p99: u64,
    /// Largest sample
    pub max: u64,
}

impl LatencySummary {
    /// Computes the summary, or `None` for an empty slice.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_samples(samples: &[u64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        let sum: u128 = sorted.iter().map(|sample| u128::from(*sample)).sum();
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2
        } else {
            sorted[mid]
        };

        Some(Self {
            samples: sorted.len(),
            min: sorted[0],
            avg: sum as f64 / sorted.len() as f64,
            median,
            p95: percentile(&sorted, 0.95),
            p99: percentile(&sorted, 0.99),
            max: sorted[sorted.len() - 1],
        })
    }
}

// `sorted` must be non-empty and ascending.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn percentile(sorted: &[u64], percentile: f64) -> u64 {
    let rank = ((sorted.len() as f64) * percentile).ceil() as usize;
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}
