use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use prodcon_core::{OutputFormat, SimulationSettings};

#[derive(Debug, Parser)]
#[command(name = "prodcon")]
#[command(about = "Bounded-buffer producer/consumer simulation over a circular job queue.")]
pub(crate) struct Cli {
    /// Number of queue slots (must be greater than zero)
    pub(crate) queue_capacity: usize,

    /// Jobs each producer generates
    pub(crate) jobs_per_producer: u64,

    /// Number of producer workers
    pub(crate) producers: usize,

    /// Number of consumer workers
    pub(crate) consumers: usize,

    /// YAML file with timing overrides and seed
    #[arg(long)]
    pub(crate) settings: Option<PathBuf>,

    /// Permit wait, in time units, before a worker gives up (default: 20)
    #[arg(long)]
    pub(crate) idle_timeout: Option<u32>,

    /// Length of one time unit in milliseconds (default: 1000)
    #[arg(long)]
    pub(crate) time_unit_ms: Option<u64>,

    /// Longest job duration, in time units (default: 10)
    #[arg(long)]
    pub(crate) max_job_duration: Option<u32>,

    /// Longest producer think time, in time units; 0 disables it (default: 5)
    #[arg(long)]
    pub(crate) max_think_time: Option<u32>,

    /// Seed for reproducible job durations
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Event output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub(crate) format: Format,

    /// Suppress per-event output; print only the summary
    #[arg(long, short)]
    pub(crate) quiet: bool,

    /// Debug logs on stderr (RUST_LOG overrides)
    #[arg(long, short)]
    pub(crate) verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => Self::Text,
            Format::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Flag values as settings, so they can be layered over a settings file.
    pub(crate) fn overrides(&self) -> SimulationSettings {
        SimulationSettings {
            time_unit_ms: self.time_unit_ms,
            idle_timeout_units: self.idle_timeout,
            max_job_duration: self.max_job_duration,
            max_think_time: self.max_think_time,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_counts() {
        let cli = Cli::try_parse_from(["prodcon", "3", "2", "2", "2"]).expect("valid args");
        assert_eq!(cli.queue_capacity, 3);
        assert_eq!(cli.jobs_per_producer, 2);
        assert_eq!((cli.producers, cli.consumers), (2, 2));
        assert_eq!(cli.format, Format::Text);
        assert_eq!(cli.overrides(), SimulationSettings::default());
    }

    #[test]
    fn rejects_wrong_argument_count() {
        assert!(Cli::try_parse_from(["prodcon", "3", "2", "2"]).is_err());
        assert!(Cli::try_parse_from(["prodcon", "3", "2", "2", "2", "9"]).is_err());
    }

    #[test]
    fn rejects_negative_and_non_numeric_counts() {
        assert!(Cli::try_parse_from(["prodcon", "3", "-2", "2", "2"]).is_err());
        assert!(Cli::try_parse_from(["prodcon", "three", "2", "2", "2"]).is_err());
        assert!(Cli::try_parse_from(["prodcon", "3", "2", "2.5", "2"]).is_err());
    }

    #[test]
    fn timing_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "prodcon",
            "1",
            "4",
            "1",
            "1",
            "--idle-timeout",
            "7",
            "--time-unit-ms",
            "50",
            "--seed",
            "9",
            "--format",
            "json",
        ])
        .expect("valid args");
        let overrides = cli.overrides();
        assert_eq!(overrides.idle_timeout_units, Some(7));
        assert_eq!(overrides.time_unit_ms, Some(50));
        assert_eq!(overrides.seed, Some(9));
        assert_eq!(overrides.max_job_duration, None);
        assert_eq!(OutputFormat::from(cli.format), OutputFormat::Json);
    }
}
