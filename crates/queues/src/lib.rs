//! Bounded FIFO queues over a circular array and a pooled linked ring.
//!
//! Two queue kinds share one contract ([`collections::Queue`]):
//!
//! - [`ArrayQueue`]: fixed capacity, stored in `capacity + 1` slots of a
//!   [`DynamicArray`] so full and empty never look alike.
//! - [`LinkedQueue`]: a sentinel-based circular doubly-linked ring whose
//!   dequeued nodes stay behind as slack, backed by a per-thread
//!   [`NodePool`] free list.
//!
//! Both offer double-ended iteration, position cursors, deep `Clone`,
//! copy-then-swap assignment and content equality.
//!
//! # Feature Tiers
//!
//! - `foundation` (default): serde/TOML configuration ([`config`]) and
//!   serialization error conversions
//! - `observability` (default): `tracing` events for construction and
//!   node pool activity
//! - `test-utils`: the `testing` helpers (drop tracking, FIFO assertions,
//!   seeded operation scripts) for downstream test suites

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Core
// -----------------------------------------------------------------
pub mod collections;
pub mod error;

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod config;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
pub use collections::{
    ArrayQueue, Cursor, Direction, DynamicArray, LinkedQueue, NodePool, PoolStats, Queue,
};
#[cfg(feature = "foundation")]
pub use config::QueueConfig;
pub use error::{
    ArrayError, CommonError, CommonResult, ErrorClassification, ErrorSeverity, QueueError,
    QueueResult,
};
