//! Error types for circular queue operations.

use thiserror::Error;

/// Queue construction and mutation failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// A queue needs at least one slot.
    #[error("queue capacity must be greater than zero")]
    ZeroCapacity,

    /// Slot storage for the requested capacity could not be allocated.
    #[error("cannot allocate a queue of {capacity} slots")]
    Alloc {
        /// Requested capacity.
        capacity: usize,
    },

    /// Enqueue attempted while every slot is occupied.
    #[error("queue is full (capacity: {capacity})")]
    Full {
        /// Configured capacity of the queue.
        capacity: usize,
    },
}
