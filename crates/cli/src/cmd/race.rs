//! Many threads, one action, one window

use crate::settings;
use anyhow::{Context, Result};
use debounce_core::{ActionId, Debouncer, Outcome};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;
use tracing::info;

/// What happened when every racer called the same action at once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceReport {
    pub threads: usize,
    pub interval_ms: u64,
    /// Racer indices whose call ran the action
    pub winners: Vec<usize>,
    pub suppressed: usize,
}

impl RaceReport {
    /// Executions the debouncer allows; a zero interval lets every racer run
    pub fn expected_executions(&self) -> usize {
        if self.interval_ms == 0 {
            self.threads
        } else {
            1
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.winners.len() == self.expected_executions()
    }
}

pub fn run(config_path: Option<&Path>, interval_ms: Option<i64>, threads: usize) -> Result<()> {
    let config = settings::load(config_path, interval_ms)?;
    let debouncer = Arc::new(Debouncer::from_config(&config)?);

    let report = race(debouncer.clone(), threads)?;
    debouncer.shutdown();

    println!("{}", "Debounce Race".bold());
    println!("  threads:    {}", report.threads);
    println!("  interval:   {}ms", report.interval_ms);
    println!("  suppressed: {}", report.suppressed.to_string().yellow());

    if report.is_consistent() {
        println!("  executed:   {}", report.winners.len().to_string().green());
        if let [winner] = report.winners.as_slice() {
            println!("  winner:     racer-{}", winner);
        }
        Ok(())
    } else {
        println!("  executed:   {}", report.winners.len().to_string().red());
        anyhow::bail!(
            "expected {} execution(s), got {}",
            report.expected_executions(),
            report.winners.len()
        )
    }
}

/// Release `threads` racers behind a barrier onto one action identity
pub fn race(debouncer: Arc<Debouncer>, threads: usize) -> Result<RaceReport> {
    if threads == 0 {
        anyhow::bail!("--threads must be at least 1");
    }

    let winners = Arc::new(Mutex::new(Vec::new()));
    let barrier = Arc::new(Barrier::new(threads));

    // Every racer calls the same identity
    let id = ActionId::next();
    let interval_ms = debouncer.interval().as_millis() as u64;
    info!(threads, %id, interval_ms, "starting race");

    let racers = (0..threads)
        .map(|index| {
            let debouncer = debouncer.clone();
            let winners = winners.clone();
            let barrier = barrier.clone();
            thread::Builder::new()
                .name(format!("racer-{}", index))
                .spawn(move || {
                    barrier.wait();
                    debouncer.call_with(id, || winners.lock().push(index))
                })
                .context("Failed to spawn racer thread")
        })
        .collect::<Result<Vec<_>>>()?;

    let mut suppressed = 0usize;
    for racer in racers {
        match racer.join() {
            Ok(Outcome::Executed(())) => {}
            Ok(_) => suppressed += 1,
            Err(_) => anyhow::bail!("racer thread panicked"),
        }
    }

    let mut winners = winners.lock().clone();
    winners.sort_unstable();

    Ok(RaceReport {
        threads,
        interval_ms,
        winners,
        suppressed,
    })
}
