use std::sync::atomic::Ordering;

use prodcon_events::{SimEvent, WorkerId};
use prodcon_queue::{CircularQueue, Job};
use tokio::sync::{AcquireError, Semaphore, SemaphorePermit};
use tokio::time::error::Elapsed;

use crate::error::{Result, SimError};

use super::{Dequeued, SyncCore};

impl SyncCore {
    /// Store one job of `duration` units on behalf of `producer_id`.
    ///
    /// Waits at most the idle timeout for a free slot. `Ok(None)` means the
    /// wait elapsed and the producer should stop.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Queue`] if the queue rejects the job despite the
    /// free-slot permit.
    pub async fn produce(&self, producer_id: WorkerId, duration: u32) -> Result<Option<Job>> {
        let Some(permit) = permit_or_idle(
            tokio::time::timeout(self.idle_timeout, self.free_slots.acquire()).await,
        ) else {
            tracing::debug!(producer = producer_id, "free-slot wait elapsed");
            return Ok(None);
        };
        permit.forget();
        *self.in_flight_count() += 1;

        let enqueued = {
            let mut queue = self.queue.lock().await;
            let serial = self.next_serial.fetch_add(1, Ordering::Relaxed);
            let enqueued = queue.enqueue(duration, serial);
            if let Ok(job) = &enqueued {
                self.sink.emit(&SimEvent::JobEnqueued {
                    producer_id,
                    job_id: job.id,
                    serial: job.serial,
                    duration: job.duration,
                });
                trace_queue(&queue);
            }
            enqueued
        };

        let job = match enqueued {
            Ok(job) => job,
            Err(error) => {
                *self.in_flight_count() -= 1;
                return Err(error.into());
            }
        };
        self.hand_over(&self.filled_slots);
        Ok(Some(job))
    }

    /// Take the oldest job on behalf of `consumer_id`.
    ///
    /// Waits at most the idle timeout for a filled slot. `Ok(None)` means the
    /// wait elapsed and the consumer should stop. The remaining-to-consume
    /// counter is decremented under the queue lock; the dequeue that brings
    /// it to zero also emits `AllJobsDispatched`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::EmptyUnderPermit`] if the queue is empty despite
    /// the filled-slot permit.
    pub async fn consume(&self, consumer_id: WorkerId) -> Result<Option<Dequeued>> {
        let Some(permit) = permit_or_idle(
            tokio::time::timeout(self.idle_timeout, self.filled_slots.acquire()).await,
        ) else {
            tracing::debug!(consumer = consumer_id, "filled-slot wait elapsed");
            return Ok(None);
        };
        permit.forget();
        *self.in_flight_count() += 1;

        let dequeued = {
            let mut queue = self.queue.lock().await;
            queue.dequeue().map(|job| {
                let (remaining, drained) = self.take_remaining();
                self.sink.emit(&SimEvent::JobDequeued {
                    consumer_id,
                    job_id: job.id,
                    serial: job.serial,
                    duration: job.duration,
                });
                if drained {
                    self.sink.emit(&SimEvent::AllJobsDispatched);
                }
                trace_queue(&queue);
                Dequeued { job, remaining }
            })
        };

        let Some(dequeued) = dequeued else {
            *self.in_flight_count() -= 1;
            return Err(SimError::EmptyUnderPermit(consumer_id));
        };
        self.hand_over(&self.free_slots);
        Ok(Some(dequeued))
    }

    // Leave the in-flight count and release the counterpart permit as one step,
    // so a concurrent `slot_counts` never sees the permit twice.
    fn hand_over(&self, counterpart: &Semaphore) {
        let mut in_flight = self.in_flight_count();
        *in_flight -= 1;
        counterpart.add_permits(1);
    }

    // Saturating decrement; reports the new value and whether this call hit zero.
    fn take_remaining(&self) -> (u64, bool) {
        match self
            .remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
        {
            Ok(previous) => (previous - 1, previous == 1),
            Err(_) => (0, false),
        }
    }
}

fn permit_or_idle<'a>(
    waited: std::result::Result<std::result::Result<SemaphorePermit<'a>, AcquireError>, Elapsed>,
) -> Option<SemaphorePermit<'a>> {
    match waited {
        Ok(Ok(permit)) => Some(permit),
        // Closed semaphore or elapsed wait: either way no more work.
        Ok(Err(_)) | Err(_) => None,
    }
}

fn trace_queue(queue: &CircularQueue) {
    if tracing::enabled!(tracing::Level::TRACE) {
        tracing::trace!(len = queue.len(), "queue state:\n{}", queue.snapshot());
    }
}
