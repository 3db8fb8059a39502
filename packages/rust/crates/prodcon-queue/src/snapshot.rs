//! Point-in-time view of a circular queue.

use std::fmt;

use serde::Serialize;

use crate::Job;

/// Cursors and live jobs captured from a `CircularQueue`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueueSnapshot {
    /// Number of slots.
    pub capacity: usize,
    /// Slot of the oldest job.
    pub front: usize,
    /// Slot of the newest job.
    pub end: usize,
    /// Live jobs, oldest to newest.
    pub jobs: Vec<Job>,
}

impl QueueSnapshot {
    /// Number of live jobs in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// True when the snapshot holds no job.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl fmt::Display for QueueSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Start index: {}     End index: {}", self.front, self.end)?;
        if self.jobs.is_empty() {
            return write!(f, "\nCQ is empty");
        }
        for job in &self.jobs {
            write!(f, "\nIndex: {} - Value: {{{},{}}}", job.id, job.id, job.duration)?;
        }
        Ok(())
    }
}
