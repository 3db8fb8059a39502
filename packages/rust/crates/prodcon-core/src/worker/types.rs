//! Shared worker types.

use prodcon_events::{DoneReason, WorkerId};
use serde::Serialize;

/// Lifecycle state of a producer or consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Loop continues.
    Working,
    /// Loop ended for the given reason.
    Done(DoneReason),
}

/// Final tally of one producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProducerOutcome {
    /// Producer number (1-based).
    pub producer_id: WorkerId,
    /// Jobs enqueued.
    pub produced: u64,
    /// Quota left unproduced after an idle timeout.
    pub abandoned: u64,
    /// Exit cause.
    pub reason: DoneReason,
}

/// Final tally of one consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConsumerOutcome {
    /// Consumer number (1-based).
    pub consumer_id: WorkerId,
    /// Jobs dequeued and completed.
    pub consumed: u64,
    /// Exit cause.
    pub reason: DoneReason,
}

/// Outcome of any worker, as joined by the simulation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// A producer finished.
    Producer(ProducerOutcome),
    /// A consumer finished.
    Consumer(ConsumerOutcome),
}
