//! Test fixture generators
//!
//! Provides a drop tracker for ownership checks and random operation
//! scripts for model-based queue tests.
//!
//! For deterministic tests, use [`random_ops_seeded`] with a fixed seed.

use std::cell::Cell;
use std::rc::Rc;

use rand::{Rng, SeedableRng};

/// Counts how many tracked values have been dropped
///
/// Values wrapped with [`DropCounter::track`] bump the shared count when
/// dropped, which makes leaks and double drops visible.
///
/// # Examples
///
/// ```
/// use ringlink_queues::testing::fixtures::DropCounter;
///
/// let counter = DropCounter::new();
/// let value = counter.track(5);
/// assert_eq!(counter.drops(), 0);
/// drop(value);
/// assert_eq!(counter.drops(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DropCounter {
    drops: Rc<Cell<usize>>,
}

impl DropCounter {
    /// Create a counter with no drops recorded
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `value` so its drop is counted
    #[must_use]
    pub fn track<V>(&self, value: V) -> Tracked<V> {
        Tracked { value, drops: Rc::clone(&self.drops) }
    }

    /// Number of tracked values dropped so far
    #[must_use]
    pub fn drops(&self) -> usize {
        self.drops.get()
    }
}

/// A value whose drop is reported to a [`DropCounter`]
///
/// Equality compares the wrapped values only.
#[derive(Debug)]
pub struct Tracked<V> {
    value: V,
    drops: Rc<Cell<usize>>,
}

impl<V> Tracked<V> {
    /// The wrapped value
    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<V: Clone> Clone for Tracked<V> {
    fn clone(&self) -> Self {
        Self { value: self.value.clone(), drops: Rc::clone(&self.drops) }
    }
}

impl<V: PartialEq> PartialEq for Tracked<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<V: Eq> Eq for Tracked<V> {}

impl<V> Drop for Tracked<V> {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

/// One step of a generated queue workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOp {
    /// Enqueue the value
    Enqueue(u32),
    /// Dequeue one item
    Dequeue,
    /// Peek at the head
    Front,
}

/// Generate a random operation script of `len` steps
///
/// **Note:** This uses a non-deterministic RNG. For deterministic tests,
/// use [`random_ops_seeded`] instead.
///
/// # Examples
///
/// ```
/// use ringlink_queues::testing::fixtures::random_ops;
///
/// assert_eq!(random_ops(25).len(), 25);
/// ```
#[must_use]
pub fn random_ops(len: usize) -> Vec<QueueOp> {
    generate_ops(&mut rand::thread_rng(), len)
}

/// Generate a random operation script with a seed (deterministic)
///
/// Enqueues are slightly more likely than dequeues so scripts reach full
/// queues as well as empty ones.
///
/// # Examples
///
/// ```
/// use ringlink_queues::testing::fixtures::random_ops_seeded;
///
/// assert_eq!(random_ops_seeded(50, 7), random_ops_seeded(50, 7));
/// ```
#[must_use]
pub fn random_ops_seeded(len: usize, seed: u64) -> Vec<QueueOp> {
    generate_ops(&mut rand::rngs::StdRng::seed_from_u64(seed), len)
}

fn generate_ops<R: Rng>(rng: &mut R, len: usize) -> Vec<QueueOp> {
    (0..len)
        .map(|_| match rng.gen_range(0..10) {
            0..=4 => QueueOp::Enqueue(rng.gen()),
            5..=8 => QueueOp::Dequeue,
            _ => QueueOp::Front,
        })
        .collect()
}
