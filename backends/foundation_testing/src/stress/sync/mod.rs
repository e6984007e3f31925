//! Canned stress runs for the bounded queues.

pub mod queue;

pub use queue::{run_queue_mpmc_stress, run_queue_spmc_stress, run_queue_timeout_stress};
