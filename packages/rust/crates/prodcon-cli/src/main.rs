//! prodcon CLI: run one producer/consumer simulation and print its events.
//!
//! Events go to stdout; logs go to stderr. Set `RUST_LOG=prodcon_core=debug`
//! (or `trace` for queue snapshots) to see worker transitions.

mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use prodcon_core::{
    ConsoleSink, EventSink, NullSink, OutputFormat, Simulation, SimulationConfig,
    SimulationReport, SimulationSettings, load_settings,
};

use crate::cli::Cli;

const RULE: &str = "----------------------------------------------------------------------------------------------------------";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else warnings only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "prodcon=debug"
        } else {
            "prodcon=warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = build_config(&cli)?;
    let format = OutputFormat::from(cli.format);
    let sink: Arc<dyn EventSink> = if cli.quiet {
        Arc::new(NullSink)
    } else {
        Arc::new(ConsoleSink::stdout(format))
    };
    let simulation = Simulation::new(config, sink).context("failed to set up the simulation")?;

    if format == OutputFormat::Text {
        print_header(simulation.config());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("prodcon-worker")
        .build()
        .context("failed to start the worker runtime")?;
    let report = runtime
        .block_on(simulation.run())
        .context("simulation aborted")?;

    print_summary(&report, format)?;
    Ok(())
}

/// Defaults, then the settings file, then flags.
fn build_config(cli: &Cli) -> anyhow::Result<SimulationConfig> {
    let file = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => SimulationSettings::default(),
    };
    let mut config = SimulationConfig::new(
        cli.queue_capacity,
        cli.jobs_per_producer,
        cli.producers,
        cli.consumers,
    );
    file.merge(cli.overrides()).apply(&mut config);
    tracing::debug!(?config, "resolved simulation config");
    Ok(config)
}

fn print_header(config: &SimulationConfig) {
    println!("\n{RULE}");
    println!(
        "System with: Queue size: {} | Num. of items prod. per producer: {} | No. Producers: {} | No. of Consumers: {}",
        config.queue_capacity, config.jobs_per_producer, config.num_producers, config.num_consumers
    );
    println!("{RULE}");
}

fn print_summary(report: &SimulationReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{RULE}");
            println!("{report}");
            println!("Simulation finished successfully ..... ");
        }
        OutputFormat::Json => {
            let line = serde_json::to_string(report).context("failed to encode report")?;
            println!("{line}");
        }
    }
    Ok(())
}
