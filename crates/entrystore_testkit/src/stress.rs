//! Stress tests for EntryStore.
//!
//! These helpers drive one store from several threads at once. Every
//! synchronous operation holds the store's file guard for its whole
//! read-modify-write cycle, so no update may be lost.

use crate::fixtures::{TestEntry, TestEntryStore};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Operations whose effect was observed.
    pub successful_ops: usize,
    /// Operations whose effect was not observed.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }

    /// Prints a summary of the test.
    pub fn print_summary(&self, name: &str) {
        println!("\n=== {} ===", name);
        println!("Total operations: {}", self.total_ops);
        println!("Successful: {}", self.successful_ops);
        println!("Failed: {}", self.failed_ops);
        println!("Duration: {:?}", self.duration);
        println!("Throughput: {:.2} ops/sec", self.ops_per_second);
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of concurrent threads.
    pub threads: usize,
    /// Operations per thread.
    pub ops_per_thread: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            threads: 8,
            ops_per_thread: 25,
        }
    }
}

/// Adds `threads * ops_per_thread` distinct entries from concurrent threads.
///
/// An operation counts as successful if its entry is present afterwards.
pub fn concurrent_adds(store: &TestEntryStore, config: &StressConfig) -> StressTestResult {
    let barrier = Arc::new(Barrier::new(config.threads));
    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let store = store.clone();
            let barrier = Arc::clone(&barrier);
            let per_thread = config.ops_per_thread;
            thread::spawn(move || {
                barrier.wait();
                for i in 0..per_thread {
                    let id = (t * per_thread + i) as u32;
                    store.add_entry(TestEntry::new(id, format!("t{t}-{i}")), false);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("stress thread panicked");
    }

    let duration = start.elapsed();
    let stored = store.get_all();
    let total = config.threads * config.ops_per_thread;
    let successful = (0..total as u32)
        .filter(|id| stored.iter().any(|e| e.id == *id))
        .count();

    StressTestResult::new(successful, total - successful, duration)
}

/// Runs concurrent edits that each increment a counter kept in one entry's name.
///
/// Returns the final counter value, which equals the number of edits when no
/// update was lost.
pub fn concurrent_increments(store: &TestEntryStore, config: &StressConfig) -> usize {
    let key = TestEntry::new(0, "0");
    store.add_entry(key.clone(), true);

    let handles: Vec<_> = (0..config.threads)
        .map(|_| {
            let store = store.clone();
            let key = key.clone();
            let per_thread = config.ops_per_thread;
            thread::spawn(move || {
                for _ in 0..per_thread {
                    store.edit_entry(&key, |e| {
                        let n: usize = e.name.parse().unwrap_or(0);
                        e.name = (n + 1).to_string();
                    });
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("stress thread panicked");
    }

    store
        .find_direct(&key, None)
        .and_then(|e| e.name.parse().ok())
        .unwrap_or(0)
}
