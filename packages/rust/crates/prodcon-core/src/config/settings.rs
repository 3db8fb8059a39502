//! Optional YAML settings file for timing knobs and seed.
//!
//! Precedence when building a config: CLI flag > settings file > defaults.
//!
//! ```yaml
//! time_unit_ms: 250
//! idle_timeout_units: 20
//! max_job_duration: 10
//! max_think_time: 5
//! seed: 42
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::config::SimulationConfig;
use crate::error::{Result, SimError};

/// Overrides loaded from a settings file; every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSettings {
    /// Length of one time unit in milliseconds.
    pub time_unit_ms: Option<u64>,
    /// Bounded permit wait, in time units.
    pub idle_timeout_units: Option<u32>,
    /// Longest job duration, in time units.
    pub max_job_duration: Option<u32>,
    /// Longest producer think time, in time units.
    pub max_think_time: Option<u32>,
    /// Base seed for reproducible runs.
    pub seed: Option<u64>,
}

impl SimulationSettings {
    /// Parse settings from YAML text. Empty text yields no overrides.
    ///
    /// # Errors
    ///
    /// Returns the YAML error for malformed input or unknown keys.
    pub fn from_yaml_str(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Field-wise merge; values set in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            time_unit_ms: overrides.time_unit_ms.or(self.time_unit_ms),
            idle_timeout_units: overrides.idle_timeout_units.or(self.idle_timeout_units),
            max_job_duration: overrides.max_job_duration.or(self.max_job_duration),
            max_think_time: overrides.max_think_time.or(self.max_think_time),
            seed: overrides.seed.or(self.seed),
        }
    }

    /// Write every set field into `config`.
    pub fn apply(&self, config: &mut SimulationConfig) {
        if let Some(ms) = self.time_unit_ms {
            config.timing.time_unit = Duration::from_millis(ms);
        }
        if let Some(units) = self.idle_timeout_units {
            config.timing.idle_timeout_units = units;
        }
        if let Some(max) = self.max_job_duration {
            config.timing.max_job_duration = max;
        }
        if let Some(max) = self.max_think_time {
            config.timing.max_think_time = max;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
    }
}

/// Read and parse a settings file.
///
/// # Errors
///
/// Returns [`SimError::SettingsIo`] or [`SimError::SettingsParse`].
pub fn load_settings(path: &Path) -> Result<SimulationSettings> {
    let text = std::fs::read_to_string(path).map_err(|source| SimError::SettingsIo {
        path: path.to_path_buf(),
        source,
    })?;
    let settings =
        SimulationSettings::from_yaml_str(&text).map_err(|source| SimError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), ?settings, "loaded simulation settings");
    Ok(settings)
}
