//! Single job stored in the circular queue.

use serde::{Deserialize, Serialize};

/// Slot index a job was stored at. Recycles every `capacity` jobs.
pub type JobId = usize;

/// One timed job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Job {
    /// Slot index the job was enqueued at.
    pub id: JobId,
    /// Process-wide sequence number; unique per job, unlike `id`.
    pub serial: u64,
    /// Simulated execution time in time units.
    pub duration: u32,
}

impl Job {
    /// Build a job from its slot, serial, and duration.
    #[must_use]
    pub fn new(id: JobId, serial: u64, duration: u32) -> Self {
        Self {
            id,
            serial,
            duration,
        }
    }
}
