//! The operation set every backing queue exposes.
//!
//! [`Queue`] is the uniform surface a facade or generic consumer drives:
//! exactly six operations, with `Overflow` raised only by `enqueue` and
//! `Underflow` only by `dequeue` and `front`.

use crate::error::QueueResult;

/// First-in-first-out queue contract shared by [`ArrayQueue`] and
/// [`LinkedQueue`].
///
/// # Examples
///
/// ```rust
/// use ringlink_queues::collections::{ArrayQueue, LinkedQueue, Queue};
///
/// fn fill<Q: Queue<u32>>(queue: &mut Q, upto: u32) -> usize {
///     (0..upto).take_while(|value| queue.enqueue(*value).is_ok()).count()
/// }
///
/// assert_eq!(fill(&mut ArrayQueue::new(2), 5), 2);
/// assert_eq!(fill(&mut LinkedQueue::new(2), 5), 5);
/// ```
///
/// [`ArrayQueue`]: super::ArrayQueue
/// [`LinkedQueue`]: super::LinkedQueue
pub trait Queue<T> {
    /// Places `item` at the tail.
    ///
    /// # Errors
    ///
    /// [`QueueError::Overflow`](crate::error::QueueError::Overflow) when the
    /// queue is full.
    fn enqueue(&mut self, item: T) -> QueueResult<()>;

    /// Removes and returns the head item.
    ///
    /// # Errors
    ///
    /// [`QueueError::Underflow`](crate::error::QueueError::Underflow) when
    /// the queue is empty.
    fn dequeue(&mut self) -> QueueResult<T>;

    /// Returns the head item without removing it.
    ///
    /// # Errors
    ///
    /// [`QueueError::Underflow`](crate::error::QueueError::Underflow) when
    /// the queue is empty.
    fn front(&self) -> QueueResult<&T>;

    /// Returns `true` when no items are queued.
    fn is_empty(&self) -> bool;

    /// Returns `true` when the next `enqueue` would overflow.
    fn is_full(&self) -> bool;

    /// Number of queued items.
    fn len(&self) -> usize;
}
