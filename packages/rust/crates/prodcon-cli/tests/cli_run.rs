#![allow(missing_docs)]

use std::process::{Command, Output};

use anyhow::Result;
use serde_json::Value;

fn prodcon(args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_prodcon"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()?)
}

// Millisecond time units with a generous idle timeout keep runs short and stable.
const FAST: [&str; 4] = ["--time-unit-ms", "1", "--idle-timeout", "2000"];

#[test]
fn text_run_prints_header_events_and_footer() -> Result<()> {
    let mut args = vec!["2", "2", "1", "1", "--seed", "4"];
    args.extend(FAST);
    let output = prodcon(&args)?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains(
        "System with: Queue size: 2 | Num. of items prod. per producer: 2 | No. Producers: 1 | No. of Consumers: 1"
    ));
    assert_eq!(stdout.matches("Producer(1): Job id").count(), 2);
    assert_eq!(stdout.matches("completed").count(), 2);
    assert!(stdout.contains("No new jobs coming in"));
    assert!(stdout.contains("Producer(1): I am done producing jobs"));
    assert!(stdout.trim_end().ends_with("Simulation finished successfully ....."));
    Ok(())
}

#[test]
fn json_run_emits_one_object_per_line() -> Result<()> {
    let mut args = vec!["3", "2", "2", "2", "--format", "json", "--seed", "8"];
    args.extend(FAST);
    let output = prodcon(&args)?;
    assert!(output.status.success());

    let lines: Vec<Value> = String::from_utf8(output.stdout)?
        .lines()
        .map(serde_json::from_str::<Value>)
        .collect::<Result<_, _>>()?;
    let completed = lines
        .iter()
        .filter(|line| line["event"] == "job_completed")
        .count();
    assert_eq!(completed, 4);

    let report = lines.last().expect("report line");
    assert_eq!(report["consumed"], 4);
    assert_eq!(report["remaining"], 0);
    Ok(())
}

#[test]
fn quiet_run_without_producers_finishes() -> Result<()> {
    let output = prodcon(&["1", "0", "0", "1", "--quiet"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(!stdout.contains("Consumer(1)"));
    assert!(stdout.contains("Simulation finished successfully"));
    Ok(())
}

#[test]
fn invalid_arguments_exit_non_zero() -> Result<()> {
    for args in [
        &["3", "2", "2"][..],
        &["3", "-2", "2", "2"][..],
        &["x", "2", "2", "2"][..],
        &["0", "2", "2", "2"][..],
    ] {
        let output = prodcon(args)?;
        assert!(!output.status.success(), "{args:?} should fail");
        assert!(output.stdout.is_empty(), "{args:?} started a run");
    }
    Ok(())
}

#[test]
fn settings_file_is_applied() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sim.yaml");
    std::fs::write(&path, "time_unit_ms: 1\nidle_timeout_units: 2000\nmax_job_duration: 1\n")?;
    let path = path.to_string_lossy().into_owned();

    let output = prodcon(&["2", "3", "1", "1", "--format", "json", "--settings", &path])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    for line in stdout.lines().filter(|line| line.contains("job_enqueued")) {
        let event: Value = serde_json::from_str(line)?;
        assert_eq!(event["duration"], 1);
    }

    let broken = dir.path().join("broken.yaml");
    std::fs::write(&broken, "unknown_knob: 1\n")?;
    let broken = broken.to_string_lossy().into_owned();
    let output = prodcon(&["2", "3", "1", "1", "--settings", &broken])?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn oversized_queue_is_reported_not_panicked() -> Result<()> {
    let output = prodcon(&["2305843009213693951", "1", "1", "1"])?;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("cannot allocate"), "{stderr}");
    assert!(!stderr.contains("panicked"), "{stderr}");
    Ok(())
}
