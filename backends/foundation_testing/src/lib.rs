//! Stress testing infrastructure for the foundation bounded queues.
//!
//! This crate provides:
//! - **Stress harness**: configurable producer/consumer runs over a
//!   [`BoundedBlockingQueue`](foundation_queues::BoundedBlockingQueue) that
//!   verify no loss, no duplication and per-producer ordering
//! - **Scenarios**: the random message producer/consumer workload
//! - **Performance metrics**: wait latencies and throughput
//! - **Criterion benchmarks**: queue throughput and timeout accuracy
//!
//! # Examples
//!
//! ```rust
//! use foundation_testing::stress::{StressConfig, StressHarness};
//!
//! let config = StressConfig::new()
//!     .producers(2)
//!     .consumers(3)
//!     .items_per_producer(500)
//!     .capacity(8);
//!
//! let result = StressHarness::new(config).run().expect("capacity is positive");
//!
//! assert_eq!(result.consumed, 1000);
//! assert!(result.is_consistent());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Common for testing crates

pub mod metrics;
pub mod scenarios;
pub mod stress;

// Re-export commonly used items
pub use metrics::{Metrics, PerformanceReport};
pub use scenarios::{MessageWorkload, WorkloadConfig, WorkloadReport};
pub use stress::{StressConfig, StressError, StressHarness, StressResult};
