//! Basic worker pool usage example
//!
//! Demonstrates pool creation, job submission, drain waiting, and statistics.
//!
//! Run with: cargo run --example basic_usage

use std::thread;
use std::time::Duration;
use workpool::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Workpool - Basic Usage Example ===\n");

    // Workers are spawned immediately on construction.
    let pool = ThreadPool::with_workers(4)?;
    println!("1. Created pool with {} workers", pool.size());

    println!("\n2. Submitting jobs:");
    for i in 0..10 {
        pool.execute(move || {
            println!(
                "  Job {} executing on {:?}",
                i,
                thread::current().name().unwrap_or("unnamed")
            );
            thread::sleep(Duration::from_millis(50));
            Ok(())
        })?;
    }
    println!("   Submitted 10 jobs, {} still queued", pool.remaining_count());

    println!("\n3. Waiting for drain...");
    pool.wait_for_drain();
    println!("   Jobs in flight: {}", pool.jobs_in_flight());

    println!("\n4. Per-worker statistics:");
    for (i, stat) in pool.get_stats().iter().enumerate() {
        println!(
            "   Worker {}: {} processed, {} failed, {} panicked",
            i,
            stat.get_jobs_processed(),
            stat.get_jobs_failed(),
            stat.get_jobs_panicked()
        );
    }
    println!("   Total processed: {}", pool.total_jobs_processed());

    println!("\n5. Shutting down");
    pool.shutdown()?;
    println!("   Finished: {}", pool.is_finished());

    Ok(())
}
