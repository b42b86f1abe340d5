//! Worker thread implementation

use crate::core::{BoxedJob, PoolError, Result};
use crate::queue::JobQueue;
use log::{debug, error, warn};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Statistics for a worker thread
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total number of jobs that completed successfully
    pub jobs_processed: AtomicU64,
    /// Total number of jobs that returned an error
    pub jobs_failed: AtomicU64,
    /// Total number of jobs that panicked
    pub jobs_panicked: AtomicU64,
}

impl WorkerStats {
    /// Create new worker statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment jobs processed counter
    pub fn increment_processed(&self) {
        self.jobs_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment jobs failed counter
    pub fn increment_failed(&self) {
        self.jobs_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment jobs panicked counter
    pub fn increment_panicked(&self) {
        self.jobs_panicked.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total jobs processed
    pub fn get_jobs_processed(&self) -> u64 {
        self.jobs_processed.load(Ordering::Relaxed)
    }

    /// Get total jobs failed
    pub fn get_jobs_failed(&self) -> u64 {
        self.jobs_failed.load(Ordering::Relaxed)
    }

    /// Get total jobs panicked
    pub fn get_jobs_panicked(&self) -> u64 {
        self.jobs_panicked.load(Ordering::Relaxed)
    }
}

/// A persistent worker thread running the pull-and-execute loop
#[derive(Debug)]
pub struct Worker {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Spawn a new worker serving the given queue.
    ///
    /// The thread is named `{name_prefix}-{id}` and runs until the queue
    /// signals shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Spawn`] if the OS refuses to create the thread.
    pub fn spawn(id: usize, queue: Arc<JobQueue>, name_prefix: &str) -> Result<Self> {
        let stats = Arc::new(WorkerStats::new());
        let stats_clone = Arc::clone(&stats);

        let thread = thread::Builder::new()
            .name(format!("{}-{}", name_prefix, id))
            .spawn(move || {
                Self::run(id, queue, stats_clone);
            })
            .map_err(|e| {
                let message = e.to_string();
                PoolError::spawn_with_source(id, message, e)
            })?;

        Ok(Self {
            id,
            thread: Some(thread),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get worker statistics
    pub fn stats(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    /// Join the worker thread
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Join`] if the worker thread itself panicked.
    pub fn join(mut self) -> Result<()> {
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| PoolError::join(self.id, "Worker panicked"))?;
        }
        Ok(())
    }

    /// Main worker loop: pull jobs until shutdown begins, then exit.
    ///
    /// Accounting happens only for jobs actually handed out, so jobs dropped
    /// by a non-draining shutdown never touch the in-flight counter from
    /// this side.
    fn run(id: usize, queue: Arc<JobQueue>, stats: Arc<WorkerStats>) {
        debug!("worker {} started", id);

        while let Some(mut job) = queue.next_job() {
            Self::execute_job(id, &mut job, &stats);
            queue.finish_job();
        }

        debug!(
            "worker {} shutting down ({} processed, {} failed, {} panicked)",
            id,
            stats.get_jobs_processed(),
            stats.get_jobs_failed(),
            stats.get_jobs_panicked()
        );
    }

    /// Execute a single job outside any lock, with panic protection.
    ///
    /// A job error or panic is logged and counted here; neither reaches the
    /// submitter and neither kills the worker thread.
    fn execute_job(id: usize, job: &mut BoxedJob, stats: &WorkerStats) {
        let panic_result = catch_unwind(AssertUnwindSafe(|| job.execute()));

        match panic_result {
            Ok(Ok(())) => {
                stats.increment_processed();
            }
            Ok(Err(e)) => {
                warn!("worker {}: job '{}' failed: {}", id, job.job_type(), e);
                stats.increment_failed();
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                error!("worker {}: job panicked: {}", id, panic_msg);
                stats.increment_panicked();
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Normal teardown consumes the worker via join(); this path only
        // runs when a worker is discarded mid-error. The queue's shutdown
        // flag is already set by then, so the thread exits on its own.
        if let Some(thread) = self.thread.take() {
            const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

            let start = std::time::Instant::now();
            while !thread.is_finished() {
                if start.elapsed() >= JOIN_TIMEOUT {
                    warn!(
                        "worker {} did not finish within {}s during drop; thread may be leaked",
                        self.id,
                        JOIN_TIMEOUT.as_secs()
                    );
                    return;
                }
                thread::sleep(Duration::from_millis(10));
            }

            if let Err(panic_info) = thread.join() {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                error!("worker {} panicked during shutdown: {}", self.id, panic_msg);
            }
        }
    }
}
