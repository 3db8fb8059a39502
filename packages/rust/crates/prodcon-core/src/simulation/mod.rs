//! Simulation driver: spawn every worker, join them, report totals.

mod report;

use std::sync::Arc;

use prodcon_events::EventSink;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::config::SimulationConfig;
use crate::error::{Result, SimError};
use crate::sync::SyncCore;
use crate::worker::{Consumer, Pacing, Producer, WorkerOutcome};

pub use report::SimulationReport;

/// One configured run of producers and consumers over a shared core.
pub struct Simulation {
    config: SimulationConfig,
    total_jobs: u64,
    core: Arc<SyncCore>,
}

impl Simulation {
    /// Validate `config` and build the synchronization core.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] for a rejected configuration.
    pub fn new(config: SimulationConfig, sink: Arc<dyn EventSink>) -> Result<Self> {
        config.validate()?;
        let total_jobs = config.total_jobs()?;
        let core = SyncCore::new(
            config.queue_capacity,
            total_jobs,
            config.timing.idle_timeout(),
            sink,
        )?;
        Ok(Self {
            config,
            total_jobs,
            core: Arc::new(core),
        })
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Shared core; lets callers observe permits and the queue while running.
    #[must_use]
    pub fn core(&self) -> &Arc<SyncCore> {
        &self.core
    }

    /// Spawn one task per worker and wait for all of them.
    ///
    /// Must be called inside a tokio runtime; on a multi-threaded runtime
    /// workers run in parallel.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::WorkerJoin`] if a worker panics, or the first
    /// error a worker reports. Remaining workers are aborted in both cases.
    pub async fn run(self) -> Result<SimulationReport> {
        let started = Instant::now();
        let timing = self.config.timing;
        tracing::info!(
            queue_capacity = self.config.queue_capacity,
            jobs_per_producer = self.config.jobs_per_producer,
            producers = self.config.num_producers,
            consumers = self.config.num_consumers,
            total_jobs = self.total_jobs,
            idle_timeout_ms = timing.idle_timeout().as_millis(),
            "simulation starting"
        );

        let mut workers: JoinSet<Result<WorkerOutcome>> = JoinSet::new();
        for id in 1..=self.config.num_producers {
            let pacing = Pacing::new(timing, self.config.seed, id);
            let producer = Producer::new(
                id,
                self.config.jobs_per_producer,
                Arc::clone(&self.core),
                pacing,
            );
            workers.spawn(async move { producer.run().await.map(WorkerOutcome::Producer) });
        }
        for id in 1..=self.config.num_consumers {
            let consumer = Consumer::new(id, Arc::clone(&self.core), timing);
            workers.spawn(async move { consumer.run().await.map(WorkerOutcome::Consumer) });
        }

        let mut report = SimulationReport::new(self.total_jobs);
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(outcome)) => report.record(outcome),
                Ok(Err(error)) => {
                    tracing::error!("worker failed: {error}");
                    workers.abort_all();
                    return Err(error);
                }
                Err(error) => {
                    tracing::error!("worker task crashed: {error}");
                    workers.abort_all();
                    return Err(SimError::WorkerJoin(error.to_string()));
                }
            }
        }

        report.finish(self.core.remaining(), started.elapsed());
        tracing::info!(
            produced = report.produced,
            consumed = report.consumed,
            remaining = report.remaining,
            elapsed_ms = report.elapsed.as_millis(),
            "simulation finished"
        );
        Ok(report)
    }
}
