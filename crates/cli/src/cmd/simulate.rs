//! Reference debounce timeline against the wall clock
//!
//! Two actions, x and y:
//! 1. interleaved calls every 50ms for 800ms
//! 2. after x's window has closed, a burst of 10 000 calls on x
//! 3. a single call on y

use crate::settings;
use anyhow::Result;
use debounce_core::{Action, DebounceStats, Debouncer};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::sleep;
use std::time::{Duration, Instant};
use tracing::info;

const STEP: Duration = Duration::from_millis(50);
const ROUNDS: usize = 8;
const SETTLE: Duration = Duration::from_millis(200);
const BURST: usize = 10_000;

#[derive(Debug, Serialize)]
pub struct PhaseReport {
    pub name: &'static str,
    pub elapsed_ms: u64,
    pub x_runs: usize,
    pub y_runs: usize,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub interval_ms: u64,
    pub phases: Vec<PhaseReport>,
    pub stats: DebounceStats,
}

pub fn run(config_path: Option<&Path>, interval_ms: Option<i64>, json: bool) -> Result<()> {
    let config = settings::load(config_path, interval_ms)?;
    let debouncer = Debouncer::from_config(&config)?;
    info!(interval_ms = config.interval_ms, "starting simulation");

    let report = simulate(&debouncer);
    debouncer.shutdown();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn counter() -> (Action<impl Fn()>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let action = Action::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (action, count)
}

pub fn simulate(debouncer: &Debouncer) -> SimulationReport {
    let (x, x_runs) = counter();
    let (y, y_runs) = counter();
    let started = Instant::now();
    let mut phases = Vec::new();

    let mut record = |name: &'static str| {
        phases.push(PhaseReport {
            name,
            elapsed_ms: started.elapsed().as_millis() as u64,
            x_runs: x_runs.load(Ordering::SeqCst),
            y_runs: y_runs.load(Ordering::SeqCst),
        });
    };

    for _ in 0..ROUNDS {
        sleep(STEP);
        debouncer.call(&x);
        sleep(STEP);
        debouncer.call(&y);
    }
    sleep(SETTLE);
    record("interleaved");

    sleep(debouncer.interval());
    for _ in 0..BURST {
        debouncer.call(&x);
    }
    record("burst on x");

    debouncer.call(&y);
    record("single call on y");

    SimulationReport {
        interval_ms: debouncer.interval().as_millis() as u64,
        phases,
        stats: debouncer.stats(),
    }
}

fn print_report(report: &SimulationReport) {
    println!("{}", "Debounce Simulation".bold());
    println!("{}: {}ms\n", "Interval".dimmed(), report.interval_ms);

    for phase in &report.phases {
        println!(
            "  {:<20} {} {}  {} {}  {}",
            phase.name.cyan(),
            "x =".dimmed(),
            phase.x_runs,
            "y =".dimmed(),
            phase.y_runs,
            format!("(+{}ms)", phase.elapsed_ms).dimmed()
        );
    }

    println!();
    println!("{}", "Stats".bold());
    println!("  accepted:   {}", report.stats.accepted.to_string().green());
    println!("  suppressed: {}", report.stats.suppressed.to_string().yellow());
    println!("  tracked:    {}", report.stats.tracked);
}
