//! Aggregated outcome of a simulation run.

use std::fmt;
use std::time::Duration;

use prodcon_events::DoneReason;
use serde::Serialize;

use crate::worker::{ConsumerOutcome, ProducerOutcome, WorkerOutcome};

/// Totals and per-worker outcomes of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    /// `jobs_per_producer * num_producers`.
    pub expected: u64,
    /// Jobs enqueued across all producers.
    pub produced: u64,
    /// Jobs dequeued and completed across all consumers.
    pub consumed: u64,
    /// Remaining-to-consume when the last worker exited.
    pub remaining: u64,
    /// Producer outcomes, ordered by id.
    pub producers: Vec<ProducerOutcome>,
    /// Consumer outcomes, ordered by id.
    pub consumers: Vec<ConsumerOutcome>,
    /// Wall time from spawn to last join.
    pub elapsed: Duration,
}

impl SimulationReport {
    pub(super) fn new(expected: u64) -> Self {
        Self {
            expected,
            produced: 0,
            consumed: 0,
            remaining: expected,
            producers: Vec::new(),
            consumers: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub(super) fn record(&mut self, outcome: WorkerOutcome) {
        match outcome {
            WorkerOutcome::Producer(producer) => {
                self.produced += producer.produced;
                self.producers.push(producer);
            }
            WorkerOutcome::Consumer(consumer) => {
                self.consumed += consumer.consumed;
                self.consumers.push(consumer);
            }
        }
    }

    pub(super) fn finish(&mut self, remaining: u64, elapsed: Duration) {
        self.remaining = remaining;
        self.elapsed = elapsed;
        self.producers.sort_by_key(|p| p.producer_id);
        self.consumers.sort_by_key(|c| c.consumer_id);
    }

    /// Every expected job was produced and completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining == 0 && self.consumed == self.expected
    }

    /// Workers that stopped because a permit wait timed out.
    #[must_use]
    pub fn idle_timeouts(&self) -> usize {
        let producers = self
            .producers
            .iter()
            .filter(|p| p.reason == DoneReason::IdleTimeout)
            .count();
        let consumers = self
            .consumers
            .iter()
            .filter(|c| c.reason == DoneReason::IdleTimeout)
            .count();
        producers + consumers
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Jobs expected: {} | produced: {} | consumed: {} | remaining: {} | idle timeouts: {} | elapsed: {:.1}s",
            self.expected,
            self.produced,
            self.consumed,
            self.remaining,
            self.idle_timeouts(),
            self.elapsed.as_secs_f64()
        )
    }
}
