//! Cursor positions for stepping through a queue in either direction.
//!
//! A [`Cursor`] is a plain `Copy` token: the identity of the queue that
//! produced it, a position inside that queue, and a direction of travel. It
//! borrows nothing, so it never keeps a queue alive and never blocks
//! mutation. Reading through a cursor always goes through the owning
//! queue's bounds-checked accessors (`get` / `get_mut`), which reject
//! cursors from other queues and cursors whose position no longer holds a
//! live element.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one queue instance.
///
/// Every constructed or cloned queue draws a fresh identity, so cursors from
/// a copy never compare equal to cursors from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueueId(u64);

static NEXT_QUEUE_ID: AtomicU64 = AtomicU64::new(1);

impl QueueId {
    pub(crate) fn next() -> Self {
        Self(NEXT_QUEUE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Direction a cursor travels when advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Oldest to newest.
    Forward,
    /// Newest to oldest.
    Reverse,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// A position inside a specific queue.
///
/// `P` is the queue's own position type: a slot index for the array queue,
/// a generation-checked node reference for the linked queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor<P> {
    queue: QueueId,
    position: P,
    direction: Direction,
}

impl<P: Copy> Cursor<P> {
    pub(crate) const fn new(queue: QueueId, position: P, direction: Direction) -> Self {
        Self { queue, position, direction }
    }

    /// Identity of the queue this cursor belongs to.
    #[must_use]
    pub const fn queue(&self) -> QueueId {
        self.queue
    }

    /// The raw position inside the queue.
    #[must_use]
    pub const fn position(&self) -> P {
        self.position
    }

    /// The direction [`advance`](super::ArrayQueue::advance) moves in.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) const fn with_position(self, position: P) -> Self {
        Self { position, ..self }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for collections::cursor.
    use super::{Cursor, Direction, QueueId};

    /// Validates `QueueId::next` behavior for the uniqueness scenario.
    #[test]
    fn queue_ids_are_unique() {
        let first = QueueId::next();
        let second = QueueId::next();
        assert_ne!(first, second);
        assert!(second.get() > first.get());
    }

    /// Validates `Cursor` equality for the identity and direction scenario.
    ///
    /// Assertions:
    /// - Confirms cursors differing only in queue identity are unequal.
    /// - Confirms cursors differing only in direction are unequal.
    #[test]
    fn equality_includes_queue_and_direction() {
        let queue = QueueId::next();
        let other = QueueId::next();
        let forward = Cursor::new(queue, 3_usize, Direction::Forward);

        assert_eq!(forward, Cursor::new(queue, 3, Direction::Forward));
        assert_ne!(forward, Cursor::new(other, 3, Direction::Forward));
        assert_ne!(forward, Cursor::new(queue, 3, Direction::Reverse));
        assert_eq!(forward.with_position(4).position(), 4);
        assert_eq!(Direction::Forward.reversed(), Direction::Reverse);
    }
}
