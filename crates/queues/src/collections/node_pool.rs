#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

//! Free-list allocator for linked queue nodes.
//!
//! A [`NodePool`] keeps boxed nodes that no queue currently uses so a later
//! queue can take them back without touching the global allocator. Nodes
//! move between three places only: a queue's ring, a pool's free list, or
//! the allocator after an explicit [`drain`](NodePool::drain).
//!
//! Pools are reference counted handles. [`NodePool::shared`] hands out the
//! pool for one element type on the current thread; every
//! [`LinkedQueue`](super::LinkedQueue) built with `new` draws from it.
//! Handles are `!Send`, so a pool is never touched from two threads.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[cfg(feature = "observability")]
use tracing::{debug, trace};

/// One slot of a linked queue ring.
///
/// `next`/`prev` are indices into the owning queue's node table; they mean
/// nothing while the node sits in a pool.
pub(crate) struct Node<T> {
    pub(crate) value: Option<T>,
    pub(crate) next: usize,
    pub(crate) prev: usize,
    pub(crate) stamp: u64,
}

impl<T> Node<T> {
    const fn vacant() -> Self {
        Self { value: None, next: 0, prev: 0, stamp: 0 }
    }
}

/// Counters describing a pool's history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Nodes created with a fresh allocation.
    pub allocated: u64,
    /// Acquisitions served from the free list.
    pub reused: u64,
    /// Nodes returned to the free list.
    pub released: u64,
    /// Nodes handed back to the allocator by `drain`.
    pub drained: u64,
}

struct FreeList<T> {
    nodes: Vec<Box<Node<T>>>,
    stats: PoolStats,
}

/// Handle to a free list of linked queue nodes.
///
/// Cloning the handle shares the same free list.
///
/// # Examples
///
/// ```rust
/// use ringlink_queues::collections::{LinkedQueue, NodePool};
///
/// let pool = NodePool::new();
/// pool.preallocate(4);
///
/// {
///     let mut queue = LinkedQueue::with_pool(2, pool.clone());
///     queue.enqueue("a").unwrap();
///     assert_eq!(pool.free_len(), 1);
/// }
///
/// // sentinel + two slack nodes come back on drop
/// assert_eq!(pool.free_len(), 4);
/// assert_eq!(pool.drain(), 4);
/// ```
pub struct NodePool<T> {
    inner: Rc<RefCell<FreeList<T>>>,
}

thread_local! {
    static SHARED_POOLS: RefCell<HashMap<TypeId, Box<dyn Any>>> = RefCell::new(HashMap::new());
}

impl<T: 'static> NodePool<T> {
    /// Returns this thread's shared pool for element type `T`.
    #[must_use]
    pub fn shared() -> Self {
        SHARED_POOLS.with(|pools| {
            let mut pools = pools.borrow_mut();
            let entry = pools.entry(TypeId::of::<T>()).or_insert_with(|| Box::new(Self::new()));
            entry.downcast_ref::<Self>().map_or_else(Self::new, Self::clone)
        })
    }
}

impl<T> NodePool<T> {
    /// Creates a private, empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(FreeList { nodes: Vec::new(), stats: PoolStats::default() })),
        }
    }

    /// Pops a free node, allocating a new one when the free list is empty.
    pub(crate) fn acquire(&self) -> Box<Node<T>> {
        let mut list = self.inner.borrow_mut();
        if let Some(node) = list.nodes.pop() {
            list.stats.reused += 1;
            #[cfg(feature = "observability")]
            trace!(reused = true, free_len = list.nodes.len(), "node acquired");
            node
        } else {
            list.stats.allocated += 1;
            #[cfg(feature = "observability")]
            trace!(reused = false, "node acquired");
            Box::new(Node::vacant())
        }
    }

    /// Clears `node` and pushes it onto the free list.
    pub(crate) fn release(&self, mut node: Box<Node<T>>) {
        // The value may own other queues; drop it before borrowing the list.
        drop(node.value.take());
        node.next = 0;
        node.prev = 0;
        node.stamp = 0;

        let mut list = self.inner.borrow_mut();
        list.nodes.push(node);
        list.stats.released += 1;
        #[cfg(feature = "observability")]
        trace!(free_len = list.nodes.len(), "node released");
    }

    /// Seeds the free list with `count` freshly allocated nodes.
    pub fn preallocate(&self, count: usize) {
        let mut list = self.inner.borrow_mut();
        list.nodes.reserve(count);
        list.nodes.extend((0..count).map(|_| Box::new(Node::vacant())));
        list.stats.allocated += count as u64;
        #[cfg(feature = "observability")]
        debug!(count, free_len = list.nodes.len(), "node pool preallocated");
    }

    /// Frees every node on the free list and returns how many were freed.
    ///
    /// Nodes currently linked into a queue are unaffected.
    pub fn drain(&self) -> usize {
        let drained = {
            let mut list = self.inner.borrow_mut();
            let drained = std::mem::take(&mut list.nodes);
            list.stats.drained += drained.len() as u64;
            drained
        };
        let count = drained.len();
        drop(drained);
        #[cfg(feature = "observability")]
        debug!(count, "node pool drained");
        count
    }

    /// Number of nodes waiting on the free list.
    #[must_use]
    pub fn free_len(&self) -> usize {
        self.inner.borrow().nodes.len()
    }

    /// Snapshot of the pool counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.inner.borrow().stats
    }

    /// Returns `true` when both handles refer to the same free list.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for NodePool<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T> Default for NodePool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for NodePool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.inner.borrow();
        f.debug_struct("NodePool")
            .field("free_len", &list.nodes.len())
            .field("stats", &list.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for collections::node_pool.
    use super::{NodePool, PoolStats};

    /// Validates `NodePool::acquire` behavior for the reuse scenario.
    ///
    /// Assertions:
    /// - Confirms the first acquisition allocates.
    /// - Confirms a released node is handed out again instead of allocating.
    #[test]
    fn released_nodes_are_reused() {
        let pool: NodePool<String> = NodePool::new();
        let mut node = pool.acquire();
        node.value = Some("payload".to_string());
        node.next = 7;
        pool.release(node);
        assert_eq!(pool.free_len(), 1);

        let node = pool.acquire();
        assert!(node.value.is_none());
        assert_eq!(node.next, 0);
        assert_eq!(
            pool.stats(),
            PoolStats { allocated: 1, reused: 1, released: 1, drained: 0 }
        );
    }

    /// Validates `NodePool::preallocate` and `NodePool::drain` behavior.
    #[test]
    fn preallocate_then_drain_reports_count() {
        let pool: NodePool<u8> = NodePool::new();
        pool.preallocate(5);
        assert_eq!(pool.free_len(), 5);
        assert_eq!(pool.drain(), 5);
        assert_eq!(pool.free_len(), 0);
        assert_eq!(pool.drain(), 0);
        assert_eq!(pool.stats().drained, 5);
    }

    /// Validates `NodePool::shared` behavior for the per type registry
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms two lookups for one type share a free list.
    /// - Confirms a private pool is distinct from the shared one.
    #[test]
    fn shared_pool_is_per_type() {
        struct Marker;
        let first: NodePool<Marker> = NodePool::shared();
        let second: NodePool<Marker> = NodePool::shared();
        assert!(first.ptr_eq(&second));
        assert!(!first.ptr_eq(&NodePool::new()));

        first.preallocate(2);
        assert_eq!(second.free_len(), 2);
        second.drain();
    }
}
