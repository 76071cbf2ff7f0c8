//! Bounded FIFO queues and the storage they are built on.
//!
//! - **[`dynamic_array`]**: resizable storage with bounds-checked access
//! - **[`array_queue`]**: fixed-capacity circular array queue
//! - **[`linked_queue`]**: circular doubly-linked queue with slack nodes
//! - **[`node_pool`]**: free-list allocator shared by linked queues
//! - **[`cursor`]**: positions for stepping through either queue
//! - **[`queue`]**: the operation set both queues implement
//!
//! ## Usage
//!
//! ```rust
//! use ringlink_queues::collections::{ArrayQueue, LinkedQueue, Queue};
//!
//! let mut array = ArrayQueue::new(8);
//! let mut linked = LinkedQueue::new(8);
//! for value in 0..4 {
//!     array.enqueue(value).unwrap();
//!     linked.enqueue(value).unwrap();
//! }
//!
//! assert!(array.iter().eq(linked.iter()));
//! assert_eq!(Queue::front(&array), Ok(&0));
//! ```

pub mod array_queue;
pub mod cursor;
pub mod dynamic_array;
pub mod linked_queue;
pub mod node_pool;
pub mod queue;

// Re-export commonly used types
pub use array_queue::{ArrayCursor, ArrayQueue};
pub use cursor::{Cursor, Direction, QueueId};
pub use dynamic_array::DynamicArray;
pub use linked_queue::{LinkedCursor, LinkedQueue, NodeRef};
pub use node_pool::{NodePool, PoolStats};
pub use queue::Queue;
