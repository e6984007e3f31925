//! Bounded producer/consumer coordination for the foundation crates.
//!
//! The crate provides [`BoundedBlockingQueue`], a monitor-style queue with a
//! fixed capacity. Producers block while it is full, consumers block while it
//! is empty, and every successful operation wakes the opposite class of
//! waiters.
//!
//! # Examples
//!
//! ```rust
//! use foundation_queues::BoundedBlockingQueue;
//! use std::thread;
//!
//! let queue = BoundedBlockingQueue::new(2).expect("capacity is positive");
//!
//! let producer_queue = queue.clone();
//! let producer = thread::spawn(move || {
//!     for i in 0..5 {
//!         producer_queue.produce(i).expect("queue is open");
//!     }
//! });
//!
//! let mut received = Vec::new();
//! for _ in 0..5 {
//!     received.push(queue.consume().expect("queue is open"));
//! }
//!
//! producer.join().unwrap();
//! assert_eq!(received, vec![0, 1, 2, 3, 4]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bounded;
pub mod errors;
pub mod primitives;

pub use bounded::BoundedBlockingQueue;
pub use errors::{ProduceError, QueueError, QueueResult};
