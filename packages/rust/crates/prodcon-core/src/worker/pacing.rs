//! Random job durations and think times.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::TimingConfig;

/// Per-worker random source for job durations and think times.
#[derive(Debug, Clone)]
pub struct Pacing {
    rng: StdRng,
    timing: TimingConfig,
}

impl Pacing {
    /// Seeded from `seed + stream` when a base seed is given, else from entropy.
    ///
    /// `stream` is usually the worker id, so workers sharing a base seed
    /// still draw different sequences.
    #[must_use]
    pub fn new(timing: TimingConfig, seed: Option<u64>, stream: usize) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream_offset(stream))),
            None => StdRng::from_entropy(),
        };
        Self { rng, timing }
    }

    /// Job duration in time units, uniform over `[1, max_job_duration]`.
    pub fn job_duration(&mut self) -> u32 {
        self.rng.gen_range(1..=self.timing.max_job_duration.max(1))
    }

    /// Pause before the next production, uniform over `[1, max_think_time]`
    /// units; zero when think time is disabled.
    pub fn think_time(&mut self) -> Duration {
        if self.timing.max_think_time == 0 {
            return Duration::ZERO;
        }
        let units = self.rng.gen_range(1..=self.timing.max_think_time);
        self.timing.units(units)
    }

    /// Timing knobs this pacing draws from.
    #[must_use]
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }
}

// Streams beyond u64 cannot occur on supported targets; fold them anyway.
fn stream_offset(stream: usize) -> u64 {
    u64::try_from(stream).unwrap_or(u64::MAX)
}
