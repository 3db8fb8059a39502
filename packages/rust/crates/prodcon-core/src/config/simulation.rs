//! Simulation parameters and validation.

use std::time::Duration;

use tokio::sync::Semaphore;

use crate::error::{Result, SimError};

/// Time units a worker waits for a permit before concluding no work is coming.
pub const DEFAULT_IDLE_TIMEOUT_UNITS: u32 = 20;
/// Wall-clock length of one time unit.
pub const DEFAULT_TIME_UNIT: Duration = Duration::from_secs(1);
/// Upper bound (inclusive) of a job's simulated duration, in time units.
pub const DEFAULT_MAX_JOB_DURATION: u32 = 10;
/// Upper bound (inclusive) of a producer's think time, in time units.
pub const DEFAULT_MAX_THINK_TIME: u32 = 5;

/// Timing knobs shared by every worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Wall-clock length of one time unit.
    pub time_unit: Duration,
    /// Bounded permit wait, in time units.
    pub idle_timeout_units: u32,
    /// Job durations are drawn from `[1, max_job_duration]`.
    pub max_job_duration: u32,
    /// Think times are drawn from `[1, max_think_time]`; 0 disables the pause.
    pub max_think_time: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            time_unit: DEFAULT_TIME_UNIT,
            idle_timeout_units: DEFAULT_IDLE_TIMEOUT_UNITS,
            max_job_duration: DEFAULT_MAX_JOB_DURATION,
            max_think_time: DEFAULT_MAX_THINK_TIME,
        }
    }
}

impl TimingConfig {
    /// Wall-clock length of `count` time units.
    #[must_use]
    pub fn units(&self, count: u32) -> Duration {
        self.time_unit.saturating_mul(count)
    }

    /// Bounded permit wait as a duration.
    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        self.units(self.idle_timeout_units)
    }
}

/// Full configuration of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of queue slots (`C`).
    pub queue_capacity: usize,
    /// Jobs each producer generates.
    pub jobs_per_producer: u64,
    /// Producer worker count.
    pub num_producers: usize,
    /// Consumer worker count.
    pub num_consumers: usize,
    /// Shared timing knobs.
    pub timing: TimingConfig,
    /// Base seed for reproducible durations; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Config with default timing and no fixed seed.
    #[must_use]
    pub fn new(
        queue_capacity: usize,
        jobs_per_producer: u64,
        num_producers: usize,
        num_consumers: usize,
    ) -> Self {
        Self {
            queue_capacity,
            jobs_per_producer,
            num_producers,
            num_consumers,
            timing: TimingConfig::default(),
            seed: None,
        }
    }

    /// Replace the timing knobs.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Fix the base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Initial value of the shared remaining-to-consume counter.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] when the product overflows `u64`.
    pub fn total_jobs(&self) -> Result<u64> {
        u64::try_from(self.num_producers)
            .ok()
            .and_then(|producers| producers.checked_mul(self.jobs_per_producer))
            .ok_or_else(|| {
                SimError::InvalidConfig(format!(
                    "{} producers x {} jobs overflows the job counter",
                    self.num_producers, self.jobs_per_producer
                ))
            })
    }

    /// Check every invariant the synchronization core relies on.
    ///
    /// Worker and job counts may be zero; the queue may not.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(SimError::InvalidConfig(
                "queue capacity must be greater than zero".to_string(),
            ));
        }
        if self.queue_capacity > Semaphore::MAX_PERMITS {
            return Err(SimError::InvalidConfig(format!(
                "queue capacity {} exceeds the permit limit {}",
                self.queue_capacity,
                Semaphore::MAX_PERMITS
            )));
        }
        self.total_jobs()?;
        if self.timing.time_unit.is_zero() {
            return Err(SimError::InvalidConfig(
                "time unit must be longer than zero".to_string(),
            ));
        }
        if self.timing.idle_timeout_units == 0 {
            return Err(SimError::InvalidConfig(
                "idle timeout must be at least one time unit".to_string(),
            ));
        }
        if self.timing.max_job_duration == 0 {
            return Err(SimError::InvalidConfig(
                "max job duration must be at least one time unit".to_string(),
            ));
        }
        Ok(())
    }
}
