//! Multi-threaded debouncing against real threads and the wall clock

use debounce_core::{Action, ActionId, Debouncer, ManualClock, Outcome};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

fn counting_action() -> (Action<impl Fn() + Send + Sync>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let action = Action::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (action, count)
}

#[test]
fn test_race_exactly_one_execution() {
    const THREADS: usize = 32;

    for _ in 0..20 {
        let debouncer = Arc::new(Debouncer::new(Duration::from_secs(10)));
        let (action, count) = counting_action();
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let debouncer = debouncer.clone();
                let action = action.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    debouncer.call(&action).is_executed()
                })
            })
            .collect();

        let executed = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ran| ran)
            .count();

        assert_eq!(executed, 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(debouncer.tracked_actions(), 1);
    }
}

#[test]
fn test_concurrent_first_sight_creates_one_tracker_per_action() {
    const THREADS: usize = 16;
    const ACTIONS: usize = 64;

    let debouncer = Arc::new(Debouncer::new(Duration::from_secs(10)));
    let ids: Arc<Vec<ActionId>> = Arc::new((0..ACTIONS).map(|_| ActionId::next()).collect());
    let ran = Arc::new(Mutex::new(Vec::new()));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let debouncer = debouncer.clone();
            let ids = ids.clone();
            let ran = ran.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                // Each thread walks the ids from a different starting point
                for i in 0..ACTIONS {
                    let id = ids[(i + t * 7) % ACTIONS];
                    let ran = ran.clone();
                    debouncer.call_with(id, move || ran.lock().push(id));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let mut ran = ran.lock().clone();
    ran.sort();
    let mut expected = (*ids).clone();
    expected.sort();

    assert_eq!(ran, expected);
    assert_eq!(debouncer.tracked_actions(), ACTIONS);

    let stats = debouncer.stats();
    assert_eq!(stats.accepted, ACTIONS as u64);
    assert_eq!(stats.suppressed, ((THREADS - 1) * ACTIONS) as u64);
}

#[test]
fn test_contended_windows_with_manual_clock() {
    const THREADS: usize = 8;
    const WINDOWS: u64 = 50;

    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let debouncer = Arc::new(Debouncer::with_clock(Duration::from_millis(100), clock.clone()));
    let (action, count) = counting_action();

    for _ in 0..WINDOWS {
        let barrier = Arc::new(Barrier::new(THREADS));
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let debouncer = debouncer.clone();
                let action = action.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..100 {
                        debouncer.call(&action);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        clock.advance_millis(101);
    }

    assert_eq!(count.load(Ordering::SeqCst), WINDOWS as usize);
}

#[test]
fn test_purge_during_calls_never_double_executes() {
    const THREADS: usize = 8;

    let debouncer = Arc::new(Debouncer::new(Duration::from_secs(10)));
    let (action, count) = counting_action();
    let barrier = Arc::new(Barrier::new(THREADS + 1));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let debouncer = debouncer.clone();
            let action = action.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..1000 {
                    debouncer.call(&action);
                }
            })
        })
        .collect();

    barrier.wait();
    for _ in 0..1000 {
        debouncer.purge_expired();
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

/// Reference timeline with a 1s window and real sleeps
#[test]
fn test_wall_clock_scenario() {
    let debouncer = Debouncer::from_millis(1000).unwrap();
    let (x, x_count) = counting_action();
    let (y, y_count) = counting_action();

    // Interleave x and y every 50ms for 800ms
    for _ in 0..8 {
        thread::sleep(Duration::from_millis(50));
        debouncer.call(&x);
        thread::sleep(Duration::from_millis(50));
        debouncer.call(&y);
    }
    thread::sleep(Duration::from_millis(200));
    assert_eq!(x_count.load(Ordering::SeqCst), 1);
    assert_eq!(y_count.load(Ordering::SeqCst), 1);

    // Past x's window: a burst runs it exactly once more
    thread::sleep(Duration::from_millis(1000));
    for _ in 0..10_000 {
        debouncer.call(&x);
    }
    assert_eq!(x_count.load(Ordering::SeqCst), 2);
    assert_eq!(y_count.load(Ordering::SeqCst), 1);

    // y is not held back by x's fresh window
    assert!(matches!(debouncer.call(&y), Outcome::Executed(())));
    assert_eq!(x_count.load(Ordering::SeqCst), 2);
    assert_eq!(y_count.load(Ordering::SeqCst), 2);

    debouncer.shutdown();
    assert_eq!(debouncer.call(&y), Outcome::ShutDown);
}
