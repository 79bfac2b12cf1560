//! Integration tests for the race and simulate commands

use dbx_lib::cmd::{race, simulate};
use debounce_core::Debouncer;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(dir: &TempDir, interval_ms: i64) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, format!("interval_ms = {}\n", interval_ms)).unwrap();
    path
}

#[test]
fn test_race_single_winner_with_interval() {
    let debouncer = Arc::new(Debouncer::new(Duration::from_secs(10)));
    let report = race::race(debouncer, 16).unwrap();

    assert_eq!(report.expected_executions(), 1);
    assert_eq!(report.winners.len(), 1);
    assert_eq!(report.suppressed, 15);
    assert!(report.is_consistent());
}

#[test]
fn test_race_zero_interval_runs_every_racer() {
    let debouncer = Arc::new(Debouncer::new(Duration::ZERO));
    let report = race::race(debouncer, 8).unwrap();

    assert_eq!(report.expected_executions(), 8);
    assert_eq!(report.winners, (0..8).collect::<Vec<_>>());
    assert_eq!(report.suppressed, 0);
    assert!(report.is_consistent());
}

#[test]
fn test_race_report_detects_extra_executions() {
    let report = race::RaceReport {
        threads: 4,
        interval_ms: 1000,
        winners: vec![0, 2],
        suppressed: 2,
    };
    assert!(!report.is_consistent());
}

#[test]
fn test_race_rejects_zero_threads() {
    let debouncer = Arc::new(Debouncer::new(Duration::from_secs(1)));
    assert!(race::race(debouncer, 0).is_err());
}

#[test]
fn test_race_command_both_interval_branches() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, 5000);

    race::run(Some(path.as_path()), None, 8).unwrap();
    race::run(Some(path.as_path()), Some(0), 8).unwrap();
}

#[test]
fn test_race_command_rejects_negative_override() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, 5000);

    assert!(race::run(Some(path.as_path()), Some(-1), 8).is_err());
}

#[test]
fn test_simulate_zero_interval_counts_every_call() {
    let debouncer = Debouncer::new(Duration::ZERO);
    let report = simulate::simulate(&debouncer);

    let counts: Vec<_> = report
        .phases
        .iter()
        .map(|phase| (phase.name, phase.x_runs, phase.y_runs))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("interleaved", 8, 8),
            ("burst on x", 10_008, 8),
            ("single call on y", 10_008, 9),
        ]
    );
    assert_eq!(report.stats.accepted, 10_017);
    assert_eq!(report.stats.suppressed, 0);
}

#[test]
fn test_simulate_command_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, 0);

    simulate::run(Some(path.as_path()), None, true).unwrap();
}
