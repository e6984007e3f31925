//! Producer/consumer scenarios built on the bounded queue.
//!
//! Provides the random message workload: producers generate text messages
//! at jittered intervals while consumers drain and log them.

pub mod producer_consumer;

pub use producer_consumer::{MessageWorkload, WorkloadConfig, WorkloadError, WorkloadReport};
