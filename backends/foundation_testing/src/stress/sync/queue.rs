//! `BoundedBlockingQueue` stress runs.

use crate::stress::{StressConfig, StressHarness, StressResult, StressRunResult};
use std::time::Duration;

/// Runs one producer against many consumers.
///
/// Keeps the configured consumer count, capacity and item count but forces
/// a single producer, so the whole run has one global production order that
/// every consumer must observe a subsequence of.
///
/// # Examples
///
/// ```
/// use foundation_testing::stress::{StressConfig, sync::run_queue_spmc_stress};
///
/// let config = StressConfig::new().consumers(4).items_per_producer(2000);
/// let result = run_queue_spmc_stress(config).unwrap();
///
/// assert!(result.is_consistent());
/// ```
///
/// # Errors
///
/// Returns an error when the configured capacity or consumer count is zero.
pub fn run_queue_spmc_stress(config: StressConfig) -> StressRunResult<StressResult> {
    StressHarness::new(config.producers(1)).run()
}

/// Runs many producers against many consumers.
///
/// Producers and consumers contend on both conditions at once, which is
/// where a single-wake notification would lose wake-ups.
///
/// # Examples
///
/// ```
/// use foundation_testing::stress::{StressConfig, sync::run_queue_mpmc_stress};
///
/// let config = StressConfig::new().producers(4).consumers(4).items_per_producer(500);
/// let result = run_queue_mpmc_stress(config).unwrap();
///
/// assert_eq!(result.consumed, 2000);
/// assert!(result.is_consistent());
/// ```
///
/// # Errors
///
/// Returns an error when the configured capacity is zero.
pub fn run_queue_mpmc_stress(config: StressConfig) -> StressRunResult<StressResult> {
    let producers = config.get_producers().max(2);
    let consumers = config.get_consumers().max(2);

    StressHarness::new(config.producers(producers).consumers(consumers)).run()
}

/// Runs consumers that only use the bounded wait.
///
/// Consumers poll with `try_consume` and a short timeout, so timeouts race
/// with produces. A timed out wait must never remove an element, which the
/// loss and duplication checks verify.
///
/// # Errors
///
/// Returns an error when the configured capacity or consumer count is zero.
pub fn run_queue_timeout_stress(config: StressConfig) -> StressRunResult<StressResult> {
    let timeout = config
        .get_consume_timeout()
        .unwrap_or(Duration::from_micros(50));

    StressHarness::new(config.consume_timeout(timeout)).run()
}
