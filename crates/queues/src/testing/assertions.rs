//! Custom assertions for queue tests
//!
//! Provides assertion macros and functions that check FIFO contents.

// Allow missing panics docs for test utilities - these assertions are designed to panic
// on failure which is their core purpose in test contexts
#![allow(clippy::missing_panics_doc)]

use std::fmt::Debug;

use crate::collections::Queue;

/// Assert that a queue yields exactly the listed items in FIFO order
///
/// Works with anything whose `iter()` yields references, without consuming
/// the queue.
///
/// # Examples
///
/// ```
/// use ringlink_queues::collections::LinkedQueue;
///
/// let mut queue = LinkedQueue::new(0);
/// queue.enqueue(1).unwrap();
/// queue.enqueue(2).unwrap();
/// ringlink_queues::assert_queue_eq!(queue, [1, 2]);
/// ```
#[macro_export]
macro_rules! assert_queue_eq {
    ($queue:expr, [$($item:expr),* $(,)?]) => {{
        let expected = [$($item),*];
        let actual: Vec<_> = $queue.iter().collect();
        let expected_refs: Vec<_> = expected.iter().collect();
        assert_eq!(
            actual, expected_refs,
            "Queue contents differ from expected FIFO order"
        );
        assert_eq!($queue.len(), expected.len(), "Queue length differs from item count");
    }};
}

/// Assert that draining `queue` yields `expected`, then that it is empty
///
/// # Examples
///
/// ```
/// use ringlink_queues::collections::ArrayQueue;
/// use ringlink_queues::testing::assertions::assert_fifo;
///
/// let mut queue = ArrayQueue::new(3);
/// queue.enqueue("x").unwrap();
/// queue.enqueue("y").unwrap();
/// assert_fifo(&mut queue, &["x", "y"]);
/// ```
pub fn assert_fifo<Q, T>(queue: &mut Q, expected: &[T])
where
    Q: Queue<T>,
    T: PartialEq + Debug,
{
    assert_eq!(queue.len(), expected.len(), "Queue length differs from item count");
    for (position, want) in expected.iter().enumerate() {
        match queue.dequeue() {
            Ok(got) => assert_eq!(&got, want, "Item {} out of FIFO order", position),
            Err(e) => panic!("Dequeue {} failed early: {}", position, e),
        }
    }
    assert!(queue.is_empty(), "Queue still holds {} items", queue.len());
    assert!(queue.dequeue().is_err(), "Drained queue did not underflow");
}
