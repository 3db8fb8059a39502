//! Config namespace: simulation parameters and settings file loading.

mod settings;
mod simulation;

pub use settings::{SimulationSettings, load_settings};
pub use simulation::{
    DEFAULT_IDLE_TIMEOUT_UNITS, DEFAULT_MAX_JOB_DURATION, DEFAULT_MAX_THINK_TIME,
    DEFAULT_TIME_UNIT, SimulationConfig, TimingConfig,
};
