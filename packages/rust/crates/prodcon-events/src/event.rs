//! Core event model.

use std::fmt;

use prodcon_queue::JobId;
use serde::{Deserialize, Serialize};

/// 1-based producer or consumer number.
pub type WorkerId = usize;

/// Why a worker left its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoneReason {
    /// Producer enqueued its whole quota.
    QuotaMet,
    /// No permit became available within the idle timeout.
    IdleTimeout,
    /// Consumer saw the shared remaining-to-consume counter at zero.
    NoWorkRemaining,
}

impl DoneReason {
    /// Stable label for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QuotaMet => "quota_met",
            Self::IdleTimeout => "idle_timeout",
            Self::NoWorkRemaining => "no_work_remaining",
        }
    }
}

impl fmt::Display for DoneReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observable state change in a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    /// A producer stored a job.
    JobEnqueued {
        /// Producing worker.
        producer_id: WorkerId,
        /// Slot the job was stored at.
        job_id: JobId,
        /// Unique job serial.
        serial: u64,
        /// Simulated run time in time units.
        duration: u32,
    },
    /// A consumer took a job and is about to run it.
    JobDequeued {
        /// Consuming worker.
        consumer_id: WorkerId,
        /// Slot the job was read from.
        job_id: JobId,
        /// Unique job serial.
        serial: u64,
        /// Simulated run time in time units.
        duration: u32,
    },
    /// A consumer finished running a job.
    JobCompleted {
        /// Consuming worker.
        consumer_id: WorkerId,
        /// Slot the job was read from.
        job_id: JobId,
        /// Unique job serial.
        serial: u64,
    },
    /// The last expected job left the queue; consumers drain and stop.
    AllJobsDispatched,
    /// A producer stopped.
    ProducerDone {
        /// Producing worker.
        producer_id: WorkerId,
        /// Jobs this producer enqueued.
        produced: u64,
        /// Exit cause.
        reason: DoneReason,
    },
    /// A consumer stopped.
    ConsumerDone {
        /// Consuming worker.
        consumer_id: WorkerId,
        /// Jobs this consumer dequeued and completed.
        consumed: u64,
        /// Exit cause.
        reason: DoneReason,
    },
}

/// Fieldless discriminant of `SimEvent`, for filtering and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// See [`SimEvent::JobEnqueued`].
    JobEnqueued,
    /// See [`SimEvent::JobDequeued`].
    JobDequeued,
    /// See [`SimEvent::JobCompleted`].
    JobCompleted,
    /// See [`SimEvent::AllJobsDispatched`].
    AllJobsDispatched,
    /// See [`SimEvent::ProducerDone`].
    ProducerDone,
    /// See [`SimEvent::ConsumerDone`].
    ConsumerDone,
}

impl EventKind {
    /// Same tag the JSON encoding uses.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::JobEnqueued => "job_enqueued",
            Self::JobDequeued => "job_dequeued",
            Self::JobCompleted => "job_completed",
            Self::AllJobsDispatched => "all_jobs_dispatched",
            Self::ProducerDone => "producer_done",
            Self::ConsumerDone => "consumer_done",
        }
    }
}

impl SimEvent {
    /// Discriminant of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::JobEnqueued { .. } => EventKind::JobEnqueued,
            Self::JobDequeued { .. } => EventKind::JobDequeued,
            Self::JobCompleted { .. } => EventKind::JobCompleted,
            Self::AllJobsDispatched => EventKind::AllJobsDispatched,
            Self::ProducerDone { .. } => EventKind::ProducerDone,
            Self::ConsumerDone { .. } => EventKind::ConsumerDone,
        }
    }

    /// Job serial carried by job-level events.
    #[must_use]
    pub fn serial(&self) -> Option<u64> {
        match self {
            Self::JobEnqueued { serial, .. }
            | Self::JobDequeued { serial, .. }
            | Self::JobCompleted { serial, .. } => Some(*serial),
            _ => None,
        }
    }
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JobEnqueued {
                producer_id,
                job_id,
                duration,
                ..
            } => write!(f, "Producer({producer_id}): Job id {job_id} duration {duration}"),
            Self::JobDequeued {
                consumer_id,
                job_id,
                duration,
                ..
            } => write!(
                f,
                "Consumer({consumer_id}): Job id {job_id} executing sleep duration {duration}"
            ),
            Self::JobCompleted {
                consumer_id,
                job_id,
                ..
            } => write!(f, "Consumer({consumer_id}): Job id {job_id} completed"),
            Self::AllJobsDispatched => f.write_str(
                "No new jobs coming in... will finish what is being processed at the moment and then consumers are done...",
            ),
            Self::ProducerDone {
                producer_id,
                produced,
                reason,
            } => match reason {
                DoneReason::QuotaMet => {
                    write!(f, "Producer({producer_id}): I am done producing jobs....")
                }
                _ => write!(
                    f,
                    "Producer({producer_id}): no free slot before idle timeout, stopping after {produced} job(s)"
                ),
            },
            Self::ConsumerDone {
                consumer_id,
                consumed,
                reason,
            } => match reason {
                DoneReason::IdleTimeout => write!(
                    f,
                    "Consumer({consumer_id}): no new job before idle timeout, done after {consumed} job(s)"
                ),
                _ => write!(
                    f,
                    "Consumer({consumer_id}): no jobs left, done after {consumed} job(s)"
                ),
            },
        }
    }
}
