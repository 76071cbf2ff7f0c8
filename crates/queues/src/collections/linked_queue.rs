#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

//! A FIFO queue over a circular doubly-linked ring with a sentinel node.
//!
//! Nodes live in a per-queue table and link to each other by index. Slot
//! `0` is the sentinel; it never holds a value. Walking `next` from the
//! sentinel visits the live nodes oldest first, then the slack nodes
//! (allocated but empty), then returns to the sentinel:
//!
//! ```text
//! sentinel -> live(oldest) .. live(newest) -> slack .. slack -> sentinel
//! ```
//!
//! `enqueue` writes into the first slack node, or takes a node from the
//! [`NodePool`] when no slack remains. `dequeue` moves the oldest node to
//! the end of the slack run instead of freeing it. The ring therefore only
//! grows, and every node goes back to the pool when the queue is dropped.
//!
//! The queue is unbounded unless built with [`LinkedQueue::bounded`] or a
//! config carrying `max_len`.
//!
//! # Cursor validity
//! - Every node carries a stamp that changes whenever its value is written
//!   or taken. Cursors remember the stamp they saw, so a cursor naming a
//!   node that has since been reused reads as `None`.

use std::fmt;
use std::iter::FusedIterator;

use super::cursor::{Cursor, Direction, QueueId};
use super::node_pool::{Node, NodePool};
use super::queue::Queue;
use crate::error::{CommonError, QueueError, QueueResult};

#[cfg(feature = "observability")]
use tracing::debug;

const SENTINEL: usize = 0;

/// Position of a node in a [`LinkedQueue`], tagged with the node's stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    index: usize,
    stamp: u64,
}

impl NodeRef {
    /// Index of the node in the queue's node table (`0` is the sentinel).
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` when this position is the sentinel.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        self.index == SENTINEL
    }
}

/// Cursor into a [`LinkedQueue`].
pub type LinkedCursor = Cursor<NodeRef>;

/// A FIFO queue over a pooled, circular doubly-linked ring.
///
/// # Examples
///
/// ```rust
/// use ringlink_queues::collections::LinkedQueue;
///
/// let mut queue = LinkedQueue::new(2);
/// queue.enqueue(1).unwrap();
/// queue.enqueue(2).unwrap();
/// queue.enqueue(3).unwrap(); // ring grows past the hint
///
/// assert_eq!(queue.dequeue(), Ok(1));
/// assert_eq!(queue.slack(), 1);
/// assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
/// ```
pub struct LinkedQueue<T> {
    nodes: Vec<Box<Node<T>>>,
    back: usize,
    count: usize,
    stamp: u64,
    max_len: Option<usize>,
    pool: NodePool<T>,
    id: QueueId,
}

impl<T: 'static> LinkedQueue<T> {
    /// Creates an unbounded queue with `size_hint` slack nodes, drawing
    /// from this thread's shared pool.
    #[must_use]
    pub fn new(size_hint: usize) -> Self {
        Self::with_pool(size_hint, NodePool::shared())
    }

    /// Creates a queue that overflows once it holds `max_len` items.
    #[must_use]
    pub fn bounded(size_hint: usize, max_len: usize) -> Self {
        let mut queue = Self::new(size_hint);
        queue.max_len = Some(max_len);
        queue
    }

    /// Creates a queue from `config`.
    ///
    /// `capacity` becomes the slack hint, `max_len` the optional bound, and
    /// `pool_preallocate` nodes are seeded into the shared pool first.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Common`] when the configuration is invalid.
    #[cfg(feature = "foundation")]
    pub fn from_config(config: &crate::config::QueueConfig) -> QueueResult<Self> {
        config.validate()?;
        let pool = NodePool::shared();
        if config.pool_preallocate > 0 {
            pool.preallocate(config.pool_preallocate);
        }
        let mut queue = Self::with_pool(config.capacity, pool);
        queue.max_len = config.max_len;
        Ok(queue)
    }
}

impl<T> LinkedQueue<T> {
    /// Creates an unbounded queue with `size_hint` slack nodes taken from
    /// `pool`.
    #[must_use]
    pub fn with_pool(size_hint: usize, pool: NodePool<T>) -> Self {
        #[cfg(feature = "observability")]
        debug!(size_hint, "linked queue constructed");

        let sentinel = pool.acquire();
        let mut queue = Self {
            nodes: Vec::with_capacity(size_hint.saturating_add(1)),
            back: SENTINEL,
            count: 0,
            stamp: 0,
            max_len: None,
            pool,
            id: QueueId::next(),
        };
        queue.nodes.push(sentinel);
        for _ in 0..size_hint {
            queue.grow();
        }
        queue
    }

    /// Places `item` at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Overflow`] when the queue is bounded and
    /// already holds `max_len` items.
    pub fn enqueue(&mut self, item: T) -> QueueResult<()> {
        if let Some(limit) = self.max_len {
            if self.count >= limit {
                return Err(QueueError::Overflow { capacity: limit });
            }
        }
        self.place(item);
        Ok(())
    }

    /// Removes and returns the head item. Its node becomes slack.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Underflow`] when the queue is empty.
    pub fn dequeue(&mut self) -> QueueResult<T> {
        if self.count == 0 {
            return Err(QueueError::Underflow);
        }

        let first = self.nodes[SENTINEL].next;
        let item = self.nodes[first].value.take().ok_or_else(|| vacant("dequeue"))?;
        let stamp = self.next_stamp();
        self.nodes[first].stamp = stamp;
        self.count -= 1;

        self.unlink(first);
        self.link_before(SENTINEL, first);
        if self.count == 0 {
            self.back = SENTINEL;
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
        let first = self.nodes[SENTINEL].next;
        self.nodes[first].value.as_ref().ok_or_else(|| vacant("front"))
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
        let first = self.nodes[SENTINEL].next;
        self.nodes[first].value.as_mut().ok_or_else(|| vacant("front_mut"))
    }

    /// Returns `true` when the queue holds no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` only for a bounded queue holding `max_len` items.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.max_len.is_some_and(|limit| self.count >= limit)
    }

    /// Returns the number of queued items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Number of allocated nodes holding no value.
    #[inline]
    #[must_use]
    pub fn slack(&self) -> usize {
        self.ring_len() - self.count
    }

    /// Number of nodes in the ring, sentinel excluded.
    #[inline]
    #[must_use]
    pub fn ring_len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// The bound set at construction, if any.
    #[inline]
    #[must_use]
    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    /// The pool this queue acquires nodes from and releases them to.
    #[must_use]
    pub fn pool(&self) -> &NodePool<T> {
        &self.pool
    }

    /// Identity of this queue instance, shared by all of its cursors.
    #[inline]
    #[must_use]
    pub fn id(&self) -> QueueId {
        self.id
    }

    /// Drops every queued item. Live nodes turn into slack; nothing is
    /// released to the pool.
    pub fn clear(&mut self) {
        let mut index = self.nodes[SENTINEL].next;
        for _ in 0..self.count {
            let stamp = self.next_stamp();
            let node = &mut self.nodes[index];
            node.value = None;
            node.stamp = stamp;
            index = node.next;
        }
        self.count = 0;
        self.back = SENTINEL;
    }

    /// Exchanges whole states with `other`, pools included. Both queues
    /// draw fresh identities, so outstanding cursors stop resolving.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
        self.id = QueueId::next();
        other.id = QueueId::next();
    }

    /// Returns an iterator from the oldest to the newest item.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.nodes[SENTINEL].next,
            back: self.back,
            remaining: self.count,
        }
    }

    /// Returns a mutable iterator from the oldest to the newest item.
    ///
    /// Building it allocates one link table the size of the ring (slack
    /// included); the walk itself follows `next`/`prev` lazily.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let front = self.nodes[SENTINEL].next;
        let links = self
            .nodes
            .iter_mut()
            .map(|node| Link { value: node.value.as_mut(), next: node.next, prev: node.prev })
            .collect();
        IterMut { links, front, back: self.back, remaining: self.count }
    }

    /// Cursor at the oldest item (equal to [`end`](Self::end) when empty).
    #[must_use]
    pub fn begin(&self) -> LinkedCursor {
        Cursor::new(self.id, self.node_ref(self.nodes[SENTINEL].next), Direction::Forward)
    }

    /// Cursor one past the newest item: the first slack node, or the
    /// sentinel when there is no slack.
    #[must_use]
    pub fn end(&self) -> LinkedCursor {
        Cursor::new(self.id, self.node_ref(self.nodes[self.back].next), Direction::Forward)
    }

    /// Reverse cursor at the newest item.
    #[must_use]
    pub fn rbegin(&self) -> LinkedCursor {
        Cursor::new(self.id, self.node_ref(self.back), Direction::Reverse)
    }

    /// Reverse cursor at the sentinel.
    #[must_use]
    pub fn rend(&self) -> LinkedCursor {
        Cursor::new(self.id, self.node_ref(SENTINEL), Direction::Reverse)
    }

    /// Follows one link in the cursor's own direction.
    ///
    /// Returns `None` for foreign or stale cursors.
    #[must_use]
    pub fn advance(&self, cursor: LinkedCursor) -> Option<LinkedCursor> {
        self.step(cursor, cursor.direction())
    }

    /// Follows one link against the cursor's direction.
    #[must_use]
    pub fn retreat(&self, cursor: LinkedCursor) -> Option<LinkedCursor> {
        self.step(cursor, cursor.direction().reversed())
    }

    /// Reads the item under `cursor`.
    ///
    /// Returns `None` for foreign or stale cursors and for positions that
    /// hold no value (sentinel, slack).
    #[must_use]
    pub fn get(&self, cursor: LinkedCursor) -> Option<&T> {
        let index = self.resolve(cursor)?;
        self.nodes[index].value.as_ref()
    }

    /// Mutable counterpart of [`get`](Self::get).
    #[must_use]
    pub fn get_mut(&mut self, cursor: LinkedCursor) -> Option<&mut T> {
        let index = self.resolve(cursor)?;
        self.nodes[index].value.as_mut()
    }

    fn resolve(&self, cursor: LinkedCursor) -> Option<usize> {
        if cursor.queue() != self.id {
            return None;
        }
        let position = cursor.position();
        let node = self.nodes.get(position.index)?;
        (node.stamp == position.stamp).then_some(position.index)
    }

    fn step(&self, cursor: LinkedCursor, direction: Direction) -> Option<LinkedCursor> {
        let node = &self.nodes[self.resolve(cursor)?];
        let next = match direction {
            Direction::Forward => node.next,
            Direction::Reverse => node.prev,
        };
        Some(cursor.with_position(self.node_ref(next)))
    }

    fn node_ref(&self, index: usize) -> NodeRef {
        NodeRef { index, stamp: self.nodes[index].stamp }
    }

    /// Writes `item` into the node after `back`, growing the ring when that
    /// node is the sentinel.
    fn place(&mut self, item: T) {
        let mut slot = self.nodes[self.back].next;
        if slot == SENTINEL {
            slot = self.grow();
        }
        let stamp = self.next_stamp();
        let node = &mut self.nodes[slot];
        node.value = Some(item);
        node.stamp = stamp;
        self.back = slot;
        self.count += 1;
    }

    /// Links a node from the pool in just before the sentinel.
    fn grow(&mut self) -> usize {
        let index = self.nodes.len();
        let mut node = self.pool.acquire();
        node.stamp = self.next_stamp();
        self.nodes.push(node);
        self.link_before(SENTINEL, index);
        index
    }

    fn link_before(&mut self, anchor: usize, index: usize) {
        let prev = self.nodes[anchor].prev;
        self.nodes[index].prev = prev;
        self.nodes[index].next = anchor;
        self.nodes[prev].next = index;
        self.nodes[anchor].prev = index;
    }

    fn unlink(&mut self, index: usize) {
        let (prev, next) = (self.nodes[index].prev, self.nodes[index].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    fn next_stamp(&mut self) -> u64 {
        self.stamp += 1;
        self.stamp
    }
}

fn vacant(operation: &str) -> QueueError {
    CommonError::internal_with_context("live node holds no item", format!("LinkedQueue::{operation}"))
        .into()
}

impl<T> Drop for LinkedQueue<T> {
    fn drop(&mut self) {
        for node in self.nodes.drain(..) {
            self.pool.release(node);
        }
    }
}

impl<T: Clone> LinkedQueue<T> {
    /// Replaces this queue's contents with a copy of `other`.
    ///
    /// The copy is built completely before it is swapped in.
    pub fn assign_from(&mut self, other: &Self) {
        let mut copy = other.clone();
        self.swap(&mut copy);
    }
}

impl<T: Clone> Clone for LinkedQueue<T> {
    /// Deep copy into fresh nodes from the same pool. The copy carries no
    /// slack and gets a new identity.
    fn clone(&self) -> Self {
        let mut copy = Self::with_pool(0, self.pool.clone());
        copy.max_len = self.max_len;
        for item in self {
            copy.place(item.clone());
        }
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source);
    }
}

impl<T: PartialEq> PartialEq for LinkedQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedQueue<T> {}

impl<T: fmt::Debug> fmt::Debug for LinkedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedQueue")
            .field("max_len", &self.max_len)
            .field("slack", &self.slack())
            .field("items", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Queue<T> for LinkedQueue<T> {
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

/// Borrowing iterator over a [`LinkedQueue`] in FIFO order.
pub struct Iter<'a, T> {
    nodes: &'a [Box<Node<T>>],
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.front)?;
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.back)?;
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable iterator over a [`LinkedQueue`] in FIFO order.
///
/// Holds each node's value borrow next to a copy of its links, and hands a
/// borrow out at most once.
pub struct IterMut<'a, T> {
    links: Vec<Link<'a, T>>,
    front: usize,
    back: usize,
    remaining: usize,
}

struct Link<'a, T> {
    value: Option<&'a mut T>,
    next: usize,
    prev: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let link = self.links.get_mut(self.front)?;
        self.front = link.next;
        self.remaining -= 1;
        link.value.take()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let link = self.links.get_mut(self.back)?;
        self.back = link.prev;
        self.remaining -= 1;
        link.value.take()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator that dequeues until the queue is empty.
pub struct IntoIter<T> {
    queue: LinkedQueue<T>,
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

impl<T> IntoIterator for LinkedQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedQueue<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
