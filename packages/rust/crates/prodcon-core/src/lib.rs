//! prodcon-core - bounded-buffer producer/consumer core
//!
//! - Synchronization core: free-slot and filled-slot permits plus a queue lock
//! - Worker lifecycle: producers with a fixed quota, consumers that drain the
//!   shared remaining-to-consume counter
//! - Idle shutdown: a permit wait that exceeds the idle timeout stops the worker
//! - Simulation driver: spawns workers, joins them, reports totals

mod config;
mod error;
mod simulation;
mod sync;
mod worker;

pub use config::{
    DEFAULT_IDLE_TIMEOUT_UNITS, DEFAULT_MAX_JOB_DURATION, DEFAULT_MAX_THINK_TIME,
    DEFAULT_TIME_UNIT, SimulationConfig, SimulationSettings, TimingConfig, load_settings,
};
pub use error::{Result, SimError};
pub use simulation::{Simulation, SimulationReport};
pub use sync::{Dequeued, SlotCounts, SyncCore};
pub use worker::{
    Consumer, ConsumerOutcome, Pacing, Producer, ProducerOutcome, WorkerOutcome, WorkerState,
};

pub use prodcon_events::{
    ConsoleSink, DoneReason, EventKind, EventSink, NullSink, OutputFormat, RecordingSink,
    SimEvent, WorkerId,
};
pub use prodcon_queue::{Job, JobId, QueueError, QueueSnapshot};
