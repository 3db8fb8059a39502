//! Synchronization core: two counting permits and a queue lock.
//!
//! ```text
//! producer: acquire free-slot -> lock -> enqueue -> unlock -> release filled-slot
//! consumer: acquire filled-slot -> lock -> dequeue -> unlock -> release free-slot
//! ```
//!
//! Permits are always taken before the lock and the lock is never held
//! across a permit wait or a sleep, so no cycle of waits can form.

mod metrics;
mod ops;

use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use std::time::Duration;

use prodcon_events::{EventSink, SimEvent};
use prodcon_queue::{CircularQueue, Job};
use tokio::sync::{Mutex, Semaphore};

use crate::error::{Result, SimError};

pub use metrics::SlotCounts;

/// Job handed to a consumer together with the counter value it left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dequeued {
    /// The dequeued job.
    pub job: Job,
    /// Remaining-to-consume after this dequeue.
    pub remaining: u64,
}

/// Shared coordination point for every producer and consumer.
///
/// Constructed once per simulation and handed to workers as `Arc<SyncCore>`.
pub struct SyncCore {
    queue: Mutex<CircularQueue>,
    free_slots: Semaphore,
    filled_slots: Semaphore,
    // Counter of permits taken but not yet handed to the other side. The
    // release step and `slot_counts` both hold this lock.
    in_flight: StdMutex<usize>,
    remaining: AtomicU64,
    next_serial: AtomicU64,
    capacity: usize,
    idle_timeout: Duration,
    sink: Arc<dyn EventSink>,
}

impl SyncCore {
    /// Build a core around an empty queue of `capacity` slots.
    ///
    /// `total_jobs` seeds the shared remaining-to-consume counter.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] when `capacity` exceeds the
    /// semaphore permit limit, or [`SimError::Queue`] when it is zero.
    pub fn new(
        capacity: usize,
        total_jobs: u64,
        idle_timeout: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self> {
        if capacity > Semaphore::MAX_PERMITS {
            return Err(SimError::InvalidConfig(format!(
                "queue capacity {capacity} exceeds the permit limit {}",
                Semaphore::MAX_PERMITS
            )));
        }
        let queue = CircularQueue::new(capacity)?;
        Ok(Self {
            queue: Mutex::new(queue),
            free_slots: Semaphore::new(capacity),
            filled_slots: Semaphore::new(0),
            in_flight: StdMutex::new(0),
            remaining: AtomicU64::new(total_jobs),
            next_serial: AtomicU64::new(0),
            capacity,
            idle_timeout,
            sink,
        })
    }

    /// Forward an event to the sink.
    pub fn emit(&self, event: &SimEvent) {
        self.sink.emit(event);
    }

    fn in_flight_count(&self) -> MutexGuard<'_, usize> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
