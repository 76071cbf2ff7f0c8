//! Testing utilities and helpers
//!
//! This module provides helpers for exercising queues in tests:
//! - **[`assertions`]**: FIFO order assertions usable with either queue
//! - **[`fixtures`]**: drop tracking and seeded operation scripts
//!
//! ## Usage
//!
//! ```rust
//! use ringlink_queues::collections::ArrayQueue;
//! use ringlink_queues::testing::{assert_fifo, DropCounter};
//!
//! let counter = DropCounter::new();
//! let mut queue = ArrayQueue::new(2);
//! queue.enqueue(counter.track('a')).unwrap();
//! queue.enqueue(counter.track('b')).unwrap();
//!
//! assert_fifo(&mut queue, &[counter.track('a'), counter.track('b')]);
//! ```

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
// Note: `assert_queue_eq!` is exported at the crate root
pub use assertions::assert_fifo;
pub use fixtures::{random_ops, random_ops_seeded, DropCounter, QueueOp, Tracked};
