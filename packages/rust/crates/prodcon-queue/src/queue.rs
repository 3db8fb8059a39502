//! Circular queue: bounded ring of `Job` slots with `front`/`end` cursors.

use crate::{Job, JobId, QueueError, QueueSnapshot};

/// Fixed-capacity FIFO of jobs. O(1) enqueue and dequeue.
///
/// `front == end` means either one stored job or none; `empty`
/// disambiguates the two, which is what makes a single-slot queue work.
#[derive(Debug)]
pub struct CircularQueue {
    slots: Box<[Option<Job>]>,
    front: usize,
    end: usize,
    empty: bool,
}

impl CircularQueue {
    /// Create an empty queue with `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::ZeroCapacity`] when `capacity` is zero, or
    /// [`QueueError::Alloc`] when the slot storage cannot be allocated.
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::ZeroCapacity);
        }
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| QueueError::Alloc { capacity })?;
        slots.resize(capacity, None);
        Ok(Self {
            slots: slots.into_boxed_slice(),
            front: 0,
            end: 0,
            empty: true,
        })
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of jobs currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.empty {
            0
        } else {
            (self.end + self.capacity() - self.front) % self.capacity() + 1
        }
    }

    /// True when no job is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// True when every slot holds a job.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Slot of the oldest job (meaningless while empty).
    #[must_use]
    pub fn front(&self) -> JobId {
        self.front
    }

    /// Slot of the newest job (meaningless while empty).
    #[must_use]
    pub fn end(&self) -> JobId {
        self.end
    }

    /// Store a job and return it; its id is the slot it landed in.
    ///
    /// The very first insert into an empty queue reuses the current `end`
    /// slot; every later insert advances `end` by one (mod capacity).
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Full`] when every slot is occupied.
    pub fn enqueue(&mut self, duration: u32, serial: u64) -> Result<Job, QueueError> {
        if self.is_full() {
            return Err(QueueError::Full {
                capacity: self.capacity(),
            });
        }
        if self.empty {
            self.empty = false;
        } else {
            self.end = (self.end + 1) % self.capacity();
        }
        let job = Job::new(self.end, serial, duration);
        self.slots[self.end] = Some(job);
        Ok(job)
    }

    /// Remove and return the oldest job, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<Job> {
        if self.empty {
            return None;
        }
        let job = self.slots[self.front].take();
        if self.front == self.end {
            self.empty = true;
        } else {
            self.front = (self.front + 1) % self.capacity();
        }
        job
    }

    /// Stored jobs, oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Job> + '_ {
        let capacity = self.capacity();
        (0..self.len())
            .filter_map(move |offset| self.slots[(self.front + offset) % capacity].as_ref())
    }

    /// Copy of the cursors and live jobs for logging and assertions.
    #[must_use]
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            capacity: self.capacity(),
            front: self.front,
            end: self.end,
            jobs: self.iter().copied().collect(),
        }
    }
}
