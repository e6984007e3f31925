//! Integration tests for the stress harness and the message workload.
//!
//! These runs drive real producer and consumer threads through the queue.

use foundation_testing::scenarios::{MessageWorkload, WorkloadConfig};
use foundation_testing::stress::sync::{
    run_queue_mpmc_stress, run_queue_spmc_stress, run_queue_timeout_stress,
};
use foundation_testing::stress::{StressConfig, StressHarness};
use foundation_testing::PerformanceReport;
use ntest::timeout;
use serial_test::serial;
use std::thread;
use std::time::Duration;
use tracing_test::traced_test;

#[test]
#[timeout(60000)]
fn test_one_producer_four_consumers_ten_thousand_values() {
    let config = StressConfig::new()
        .producers(1)
        .consumers(4)
        .items_per_producer(10_000)
        .capacity(10);

    let result = run_queue_spmc_stress(config).unwrap();

    assert_eq!(result.produced, 10_000);
    assert_eq!(result.consumed, 10_000);
    assert_eq!(result.duplicates, 0);
    assert_eq!(result.missing, 0);
    assert_eq!(result.order_violations, 0);
    assert!(result.is_consistent());
}

#[test]
#[timeout(60000)]
fn test_mpmc_with_capacity_one() {
    let config = StressConfig::new()
        .producers(4)
        .consumers(4)
        .items_per_producer(1_000)
        .capacity(1);

    let result = run_queue_mpmc_stress(config).unwrap();

    assert_eq!(result.consumed, 4_000);
    assert!(result.max_observed_len <= 1);
    assert!(result.is_consistent());
}

#[test]
#[timeout(60000)]
fn test_more_consumers_than_capacity() {
    let config = StressConfig::new()
        .producers(2)
        .consumers(12)
        .items_per_producer(2_000)
        .capacity(3);

    let result = StressHarness::new(config).run().unwrap();
    assert!(result.is_consistent());
}

#[test]
#[timeout(60000)]
fn test_timeout_consumers_never_lose_values() {
    let config = StressConfig::new()
        .producers(3)
        .consumers(3)
        .items_per_producer(1_000)
        .capacity(4)
        .consume_timeout(Duration::from_micros(10));

    let result = run_queue_timeout_stress(config).unwrap();

    assert_eq!(result.consumed, 3_000);
    assert!(result.is_consistent());
}

#[test]
#[timeout(60000)]
#[serial]
fn test_duration_limit_stops_producers_early() {
    let config = StressConfig::new()
        .producers(2)
        .consumers(2)
        .items_per_producer(usize::MAX)
        .duration(Duration::from_millis(200));

    let result = StressHarness::new(config).run().unwrap();

    assert!(result.produced > 0);
    assert!(result.duration < Duration::from_secs(10));
    assert!(result.is_consistent());
}

#[test]
#[timeout(60000)]
fn test_latency_metrics_are_recorded() {
    let config = StressConfig::new()
        .consumers(2)
        .items_per_producer(2_000)
        .record_latencies(true);

    let result = StressHarness::new(config).run().unwrap();
    let metrics = result.metrics();

    assert_eq!(metrics.produce_latencies.len(), 2_000);
    assert_eq!(metrics.consume_latencies.len(), 2_000);
    assert!(metrics.throughput > 0.0);

    let report = PerformanceReport::new("spmc", metrics).to_string();
    assert!(report.contains("Produce wait"));
    assert!(report.contains("Consume wait"));
}

#[test]
#[traced_test]
fn test_limited_workload_drains_every_message() {
    let config = WorkloadConfig {
        capacity: 3,
        producers: 2,
        consumers: 3,
        max_producer_delay_ms: 1,
        max_consumer_delay_ms: 2,
        messages_per_producer: Some(30),
    };

    let report = MessageWorkload::new(config).unwrap().run();

    assert_eq!(report.produced, 60);
    assert_eq!(report.consumed(), 60);
    assert!(logs_contain("message workload finished"));
}

#[test]
#[timeout(60000)]
#[serial]
fn test_unlimited_workload_stops_when_queue_is_closed() {
    let config = WorkloadConfig {
        capacity: 5,
        producers: 2,
        consumers: 2,
        max_producer_delay_ms: 2,
        max_consumer_delay_ms: 2,
        messages_per_producer: None,
    };

    let workload = MessageWorkload::new(config).unwrap();
    let queue = workload.queue().clone();

    let closer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(150));
        queue.close();
    });

    let report = workload.run();
    closer.join().unwrap();

    assert!(report.produced > 0);
    assert_eq!(report.produced, report.consumed());
    assert!(workload.queue().is_closed());
    assert!(workload.queue().is_empty());
}
