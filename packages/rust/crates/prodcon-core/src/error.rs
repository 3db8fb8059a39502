//! Error types for simulation setup and execution.
//!
//! A permit wait that times out is not an error: it is how workers learn
//! that no more work is coming, and surfaces as `Ok(None)`.

use std::path::PathBuf;

use prodcon_queue::QueueError;
use thiserror::Error;

/// Simulation-level errors.
#[derive(Error, Debug)]
pub enum SimError {
    /// Rejected configuration; reported before any worker starts.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Settings file could not be read.
    #[error("Failed to read settings file {path:?}: {source}")]
    SettingsIo {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Settings file is not valid YAML for `SimulationSettings`.
    #[error("Failed to parse settings file {path:?}: {source}")]
    SettingsParse {
        /// File that was requested.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// The queue refused an operation its permit should have allowed.
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// A filled-slot permit was granted but the queue held no job.
    #[error("Filled-slot permit granted for consumer {0} but the queue was empty")]
    EmptyUnderPermit(usize),

    /// A worker task panicked or was cancelled.
    #[error("Worker task failed: {0}")]
    WorkerJoin(String),
}

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;
