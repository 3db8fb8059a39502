//! Consumer: drain jobs until none are expected or none arrive in time.

use std::sync::Arc;

use prodcon_events::{DoneReason, SimEvent, WorkerId};

use crate::config::TimingConfig;
use crate::error::Result;
use crate::sync::SyncCore;

use super::{ConsumerOutcome, WorkerState};

/// One consumer worker.
pub struct Consumer {
    id: WorkerId,
    consumed: u64,
    core: Arc<SyncCore>,
    timing: TimingConfig,
}

impl Consumer {
    /// Consumer `id` sharing `core`.
    #[must_use]
    pub fn new(id: WorkerId, core: Arc<SyncCore>, timing: TimingConfig) -> Self {
        Self {
            id,
            consumed: 0,
            core,
            timing,
        }
    }

    /// One iteration: check the shared counter, acquire a filled slot,
    /// dequeue, run the job.
    ///
    /// The counter is only checked here, before the wait: a consumer already
    /// waiting when the counter reaches zero still handles whatever it gets.
    /// A dequeued job is always run to completion.
    ///
    /// # Errors
    ///
    /// Propagates queue invariant failures from the core.
    pub async fn step(&mut self) -> Result<WorkerState> {
        if self.core.remaining() == 0 {
            return Ok(WorkerState::Done(DoneReason::NoWorkRemaining));
        }

        let Some(dequeued) = self.core.consume(self.id).await? else {
            tracing::warn!(
                consumer = self.id,
                consumed = self.consumed,
                remaining = self.core.remaining(),
                "no job within idle timeout; consumer stopping"
            );
            return Ok(WorkerState::Done(DoneReason::IdleTimeout));
        };
        self.consumed += 1;
        let job = dequeued.job;
        tracing::debug!(
            consumer = self.id,
            job_id = job.id,
            serial = job.serial,
            duration = job.duration,
            remaining = dequeued.remaining,
            "job dequeued"
        );

        tokio::time::sleep(self.timing.units(job.duration)).await;
        self.core.emit(&SimEvent::JobCompleted {
            consumer_id: self.id,
            job_id: job.id,
            serial: job.serial,
        });
        Ok(WorkerState::Working)
    }

    /// Run until no work remains or a filled-slot wait times out.
    ///
    /// # Errors
    ///
    /// Propagates queue invariant failures from the core.
    pub async fn run(mut self) -> Result<ConsumerOutcome> {
        let reason = loop {
            if let WorkerState::Done(reason) = self.step().await? {
                break reason;
            }
        };
        self.core.emit(&SimEvent::ConsumerDone {
            consumer_id: self.id,
            consumed: self.consumed,
            reason,
        });
        tracing::info!(
            consumer = self.id,
            consumed = self.consumed,
            reason = %reason,
            "consumer done"
        );
        Ok(ConsumerOutcome {
            consumer_id: self.id,
            consumed: self.consumed,
            reason,
        })
    }
}
