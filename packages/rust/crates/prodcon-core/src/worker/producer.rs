//! Producer: enqueue a fixed quota of jobs, pausing between them.

use std::sync::Arc;

use prodcon_events::{DoneReason, SimEvent, WorkerId};

use crate::error::Result;
use crate::sync::SyncCore;

use super::{Pacing, ProducerOutcome, WorkerState};

/// One producer worker.
pub struct Producer {
    id: WorkerId,
    remaining: u64,
    produced: u64,
    core: Arc<SyncCore>,
    pacing: Pacing,
}

impl Producer {
    /// Producer `id` that will try to enqueue `quota` jobs.
    #[must_use]
    pub fn new(id: WorkerId, quota: u64, core: Arc<SyncCore>, pacing: Pacing) -> Self {
        Self {
            id,
            remaining: quota,
            produced: 0,
            core,
            pacing,
        }
    }

    /// One iteration: acquire a free slot, enqueue, think.
    ///
    /// # Errors
    ///
    /// Propagates queue invariant failures from the core.
    pub async fn step(&mut self) -> Result<WorkerState> {
        if self.remaining == 0 {
            return Ok(WorkerState::Done(DoneReason::QuotaMet));
        }

        let duration = self.pacing.job_duration();
        let Some(job) = self.core.produce(self.id, duration).await? else {
            tracing::warn!(
                producer = self.id,
                produced = self.produced,
                abandoned = self.remaining,
                "no free slot within idle timeout; producer stopping"
            );
            return Ok(WorkerState::Done(DoneReason::IdleTimeout));
        };
        self.remaining -= 1;
        self.produced += 1;
        tracing::debug!(
            producer = self.id,
            job_id = job.id,
            serial = job.serial,
            duration,
            remaining = self.remaining,
            "job enqueued"
        );

        let think = self.pacing.think_time();
        if !think.is_zero() {
            tokio::time::sleep(think).await;
        }
        Ok(WorkerState::Working)
    }

    /// Run until the quota is met or a free-slot wait times out.
    ///
    /// # Errors
    ///
    /// Propagates queue invariant failures from the core.
    pub async fn run(mut self) -> Result<ProducerOutcome> {
        let reason = loop {
            if let WorkerState::Done(reason) = self.step().await? {
                break reason;
            }
        };
        self.core.emit(&SimEvent::ProducerDone {
            producer_id: self.id,
            produced: self.produced,
            reason,
        });
        tracing::info!(
            producer = self.id,
            produced = self.produced,
            reason = %reason,
            "producer done"
        );
        Ok(ProducerOutcome {
            producer_id: self.id,
            produced: self.produced,
            abandoned: self.remaining,
            reason,
        })
    }
}
