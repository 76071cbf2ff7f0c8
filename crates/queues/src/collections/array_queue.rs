#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

//! A fixed-capacity circular FIFO queue with one reserved slot.
//!
//! An [`ArrayQueue`] of capacity `C` stores its items in a
//! [`DynamicArray`] of `C + 1` slots. `head` names the oldest item and
//! `tail` the next free slot; both advance modulo `C + 1`. The extra slot
//! means a full queue never has `head == tail`, so the two boundary states
//! are distinguishable, and `count` answers both predicates directly.
//!
//! When the last item is dequeued both indices return to `0`, so every
//! empty queue has the same physical layout regardless of history.
//!
//! # Complexity
//! - `enqueue`, `dequeue`, `front`, `len`, `is_empty`, `is_full`,
//!   `capacity`, and every cursor operation are **O(1)**.
//! - `clone`, equality, and `clear` are **O(n)**.
//!
//! # Errors
//! - `enqueue` on a full queue fails with [`QueueError::Overflow`].
//! - `dequeue` / `front` on an empty queue fail with
//!   [`QueueError::Underflow`].
//! - Failed calls leave the queue untouched.
//!
//! # Cursor validity
//! - Cursors carry the queue identity and a physical slot index. A
//!   `dequeue` moves no data, so cursors naming later items stay readable;
//!   a cursor naming a dequeued slot reads as `None`.

use std::fmt;
use std::iter::{Chain, FusedIterator};
use std::slice;

use super::cursor::{Cursor, Direction, QueueId};
use super::dynamic_array::DynamicArray;
use super::queue::Queue;
use crate::error::{CommonError, QueueError, QueueResult};

/// Cursor into an [`ArrayQueue`]; the position is a physical slot index.
pub type ArrayCursor = Cursor<usize>;

/// A bounded FIFO queue over a circular array.
///
/// # Examples
///
/// ```rust
/// use ringlink_queues::collections::ArrayQueue;
///
/// let mut queue = ArrayQueue::new(3);
/// queue.enqueue('A').unwrap();
/// queue.enqueue('B').unwrap();
/// queue.enqueue('C').unwrap();
/// assert!(queue.enqueue('X').is_err());
///
/// assert_eq!(queue.dequeue(), Ok('A'));
/// queue.enqueue('D').unwrap(); // wraps around physically
///
/// assert_eq!(queue.iter().copied().collect::<String>(), "BCD");
/// assert_eq!(queue.iter().rev().copied().collect::<String>(), "DCB");
/// ```
pub struct ArrayQueue<T> {
    slots: DynamicArray<Option<T>>,
    head: usize,
    tail: usize,
    count: usize,
    id: QueueId,
}

impl<T> ArrayQueue<T> {
    /// Creates an empty queue that holds at most `capacity` items.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" when `capacity + 1` slots cannot be
    /// counted in a `usize`, the same way `Vec` reports an impossible size.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let Some(slot_count) = capacity.checked_add(1) else {
            panic!("capacity overflow: {capacity} items leave no room for the reserved slot");
        };

        #[cfg(feature = "observability")]
        tracing::debug!(capacity, "array queue constructed");

        Self {
            slots: DynamicArray::new(slot_count),
            head: 0,
            tail: 0,
            count: 0,
            id: QueueId::next(),
        }
    }

    /// Creates a queue sized by `config.capacity`.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Common`] when the configuration is invalid.
    #[cfg(feature = "foundation")]
    pub fn from_config(config: &crate::config::QueueConfig) -> QueueResult<Self> {
        config.validate()?;
        Ok(Self::new(config.capacity))
    }

    /// Places `item` at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Overflow`] when `len() == capacity()`; `item`
    /// is dropped and the queue is unchanged.
    pub fn enqueue(&mut self, item: T) -> QueueResult<()> {
        if self.is_full() {
            return Err(QueueError::Overflow { capacity: self.capacity() });
        }

        *self.slots.get_mut(self.tail)? = Some(item);
        self.tail = self.increment(self.tail);
        self.count += 1;
        Ok(())
    }

    /// Removes and returns the head item.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Underflow`] when the queue is empty.
    pub fn dequeue(&mut self) -> QueueResult<T> {
        if self.count == 0 {
            return Err(QueueError::Underflow);
        }

        let item = self.slots.get_mut(self.head)?.take().ok_or_else(|| vacant("dequeue"))?;
        self.count -= 1;
        if self.count == 0 {
            self.head = 0;
            self.tail = 0;
        } else {
            self.head = self.increment(self.head);
        }
        Ok(item)
    }

    /// Returns the head item without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Underflow`] when the queue is empty.
    pub fn front(&self) -> QueueResult<&T> {
        if self.count == 0 {
            return Err(QueueError::Underflow);
        }
        self.slots.get(self.head)?.as_ref().ok_or_else(|| vacant("front"))
    }

    /// Returns the head item mutably.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Underflow`] when the queue is empty.
    pub fn front_mut(&mut self) -> QueueResult<&mut T> {
        if self.count == 0 {
            return Err(QueueError::Underflow);
        }
        self.slots.get_mut(self.head)?.as_mut().ok_or_else(|| vacant("front_mut"))
    }

    /// Returns `true` when the queue holds no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` when the queue holds `capacity()` items.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Returns the number of queued items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns the maximum number of items the queue can hold.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    /// Identity of this queue instance, shared by all of its cursors.
    #[inline]
    #[must_use]
    pub fn id(&self) -> QueueId {
        self.id
    }

    /// Drops every queued item and resets both indices to `0`.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    /// Exchanges contents with `other`. Both queues draw fresh identities,
    /// so outstanding cursors on either side stop resolving.
    pub fn swap(&mut self, other: &mut Self) {
        self.slots.swap(&mut other.slots);
        std::mem::swap(&mut self.head, &mut other.head);
        std::mem::swap(&mut self.tail, &mut other.tail);
        std::mem::swap(&mut self.count, &mut other.count);
        self.id = QueueId::next();
        other.id = QueueId::next();
    }

    /// Returns an iterator from the oldest to the newest item.
    ///
    /// The iterator is double-ended: `.rev()` walks newest to oldest.
    pub fn iter(&self) -> Iter<'_, T> {
        let (wrapped, from_head) = self.slots.as_slice().split_at(self.head);
        let first = self.count.min(from_head.len());
        let second = self.count - first;
        Iter {
            inner: from_head[..first].iter().chain(wrapped[..second].iter()),
            remaining: self.count,
        }
    }

    /// Returns a mutable iterator from the oldest to the newest item.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (head, count) = (self.head, self.count);
        let (wrapped, from_head) = self.slots.as_mut_slice().split_at_mut(head);
        let first = count.min(from_head.len());
        let second = count - first;
        IterMut {
            inner: from_head[..first].iter_mut().chain(wrapped[..second].iter_mut()),
            remaining: count,
        }
    }

    /// Cursor at the oldest item (equal to [`end`](Self::end) when empty).
    #[must_use]
    pub fn begin(&self) -> ArrayCursor {
        Cursor::new(self.id, self.head, Direction::Forward)
    }

    /// Cursor one past the newest item.
    #[must_use]
    pub fn end(&self) -> ArrayCursor {
        Cursor::new(self.id, self.tail, Direction::Forward)
    }

    /// Reverse cursor at the newest item.
    #[must_use]
    pub fn rbegin(&self) -> ArrayCursor {
        Cursor::new(self.id, self.decrement(self.tail), Direction::Reverse)
    }

    /// Reverse cursor one before the oldest item.
    #[must_use]
    pub fn rend(&self) -> ArrayCursor {
        Cursor::new(self.id, self.decrement(self.head), Direction::Reverse)
    }

    /// Moves `cursor` one slot in its own direction.
    ///
    /// Returns `None` for cursors that belong to another queue.
    #[must_use]
    pub fn advance(&self, cursor: ArrayCursor) -> Option<ArrayCursor> {
        self.step(cursor, cursor.direction())
    }

    /// Moves `cursor` one slot against its direction.
    #[must_use]
    pub fn retreat(&self, cursor: ArrayCursor) -> Option<ArrayCursor> {
        self.step(cursor, cursor.direction().reversed())
    }

    /// Reads the item under `cursor`.
    ///
    /// Returns `None` when the cursor belongs to another queue or its slot
    /// holds no live item (end positions, dequeued slots).
    #[must_use]
    pub fn get(&self, cursor: ArrayCursor) -> Option<&T> {
        let slot = self.live_slot(cursor)?;
        self.slots.get(slot).ok()?.as_ref()
    }

    /// Mutable counterpart of [`get`](Self::get).
    #[must_use]
    pub fn get_mut(&mut self, cursor: ArrayCursor) -> Option<&mut T> {
        let slot = self.live_slot(cursor)?;
        self.slots.get_mut(slot).ok()?.as_mut()
    }

    fn step(&self, cursor: ArrayCursor, direction: Direction) -> Option<ArrayCursor> {
        if cursor.queue() != self.id || cursor.position() >= self.slots.len() {
            return None;
        }
        let position = match direction {
            Direction::Forward => self.increment(cursor.position()),
            Direction::Reverse => self.decrement(cursor.position()),
        };
        Some(cursor.with_position(position))
    }

    fn live_slot(&self, cursor: ArrayCursor) -> Option<usize> {
        let slots = self.slots.len();
        let position = cursor.position();
        if cursor.queue() != self.id || position >= slots {
            return None;
        }
        let offset = (position + slots - self.head) % slots;
        (offset < self.count).then_some(position)
    }

    #[inline]
    fn increment(&self, index: usize) -> usize {
        if index + 1 == self.slots.len() {
            0
        } else {
            index + 1
        }
    }

    #[inline]
    fn decrement(&self, index: usize) -> usize {
        if index == 0 {
            self.slots.len() - 1
        } else {
            index - 1
        }
    }
}

fn vacant(operation: &str) -> QueueError {
    CommonError::internal_with_context("live slot holds no item", format!("ArrayQueue::{operation}"))
        .into()
}

impl<T: Clone> ArrayQueue<T> {
    /// Replaces this queue's contents with a copy of `other`.
    ///
    /// The copy is built completely before anything is swapped in, so a
    /// panicking `T::clone` leaves `self` untouched.
    pub fn assign_from(&mut self, other: &Self) {
        let mut copy = other.clone();
        self.swap(&mut copy);
    }
}

impl<T: Clone> Clone for ArrayQueue<T> {
    /// Deep copy with a fresh identity.
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            head: self.head,
            tail: self.tail,
            count: self.count,
            id: QueueId::next(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source);
    }
}

impl<T: PartialEq> PartialEq for ArrayQueue<T> {
    /// Queues are equal when they hold equal items in the same FIFO order,
    /// regardless of where those items sit physically.
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ArrayQueue<T> {}

impl<T: fmt::Debug> fmt::Debug for ArrayQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayQueue")
            .field("capacity", &self.capacity())
            .field("items", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Queue<T> for ArrayQueue<T> {
    fn enqueue(&mut self, item: T) -> QueueResult<()> {
        Self::enqueue(self, item)
    }

    fn dequeue(&mut self) -> QueueResult<T> {
        Self::dequeue(self)
    }

    fn front(&self) -> QueueResult<&T> {
        Self::front(self)
    }

    fn is_empty(&self) -> bool {
        Self::is_empty(self)
    }

    fn is_full(&self) -> bool {
        Self::is_full(self)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

/// Borrowing iterator over an [`ArrayQueue`] in FIFO order.
pub struct Iter<'a, T> {
    inner: Chain<slice::Iter<'a, Option<T>>, slice::Iter<'a, Option<T>>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let slot = self.inner.next()?;
        self.remaining -= 1;
        slot.as_ref()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let slot = self.inner.next_back()?;
        self.remaining -= 1;
        slot.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable iterator over an [`ArrayQueue`] in FIFO order.
pub struct IterMut<'a, T> {
    inner: Chain<slice::IterMut<'a, Option<T>>, slice::IterMut<'a, Option<T>>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        let slot = self.inner.next()?;
        self.remaining -= 1;
        slot.as_mut()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let slot = self.inner.next_back()?;
        self.remaining -= 1;
        slot.as_mut()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator that dequeues until the queue is empty.
pub struct IntoIter<T> {
    queue: ArrayQueue<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.queue.dequeue().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for ArrayQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

impl<'a, T> IntoIterator for &'a ArrayQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ArrayQueue<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
