//! prodcon-queue: fixed-capacity circular queue of timed jobs.
//!
//! Slot-indexed ring buffer. The queue itself is not synchronized; the
//! synchronization core wraps it in a lock and gates every call with a
//! free-slot or filled-slot permit.

mod error;
mod job;
mod queue;
mod snapshot;

pub use error::QueueError;
pub use job::{Job, JobId};
pub use queue::CircularQueue;
pub use snapshot::QueueSnapshot;
