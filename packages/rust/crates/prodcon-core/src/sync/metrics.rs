use std::sync::atomic::Ordering;
use std::time::Duration;

use prodcon_queue::QueueSnapshot;

use super::SyncCore;

/// Permit accounting at one instant.
///
/// Outside an enqueue/dequeue body `free + filled == capacity`; during one,
/// the permit being moved is counted in `in_flight`. A worker that has just
/// won a permit but not yet recorded itself in flight is missing from all
/// three, so a reading taken while workers run may fall short of the
/// capacity. It never exceeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCounts {
    /// Available free-slot permits.
    pub free: usize,
    /// Available filled-slot permits.
    pub filled: usize,
    /// Workers between taking a permit and releasing its counterpart.
    pub in_flight: usize,
}

impl SlotCounts {
    /// `free + filled + in_flight`: at most the queue capacity, and equal to
    /// it whenever no worker is between winning a permit and recording it.
    #[must_use]
    pub fn total(&self) -> usize {
        self.free + self.filled + self.in_flight
    }
}

impl SyncCore {
    /// Number of queue slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bounded permit wait.
    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Current free-slot permit count.
    #[must_use]
    pub fn free_slots(&self) -> usize {
        self.free_slots.available_permits()
    }

    /// Current filled-slot permit count.
    #[must_use]
    pub fn filled_slots(&self) -> usize {
        self.filled_slots.available_permits()
    }

    /// Workers currently inside an enqueue/dequeue body.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        *self.in_flight_count()
    }

    /// Jobs not yet dequeued by any consumer.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.remaining.load(Ordering::Acquire)
    }

    /// Permit accounting snapshot.
    ///
    /// Taken under the in-flight lock. Every increase of the three counts
    /// happens under that lock, so while it is held they can only shrink and
    /// the reading cannot count a permit twice.
    #[must_use]
    pub fn slot_counts(&self) -> SlotCounts {
        let in_flight = self.in_flight_count();
        SlotCounts {
            in_flight: *in_flight,
            free: self.free_slots(),
            filled: self.filled_slots(),
        }
    }

    /// Queue cursors and live jobs, taken under the queue lock.
    pub async fn snapshot(&self) -> QueueSnapshot {
        self.queue.lock().await.snapshot()
    }
}
