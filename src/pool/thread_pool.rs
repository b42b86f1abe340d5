//! Thread pool implementation

use crate::core::{ClosureJob, Job, PoolError, Result};
use crate::pool::worker::{Worker, WorkerStats};
use crate::queue::JobQueue;
use log::error;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Configuration for the thread pool
#[derive(Clone, Debug)]
pub struct ThreadPoolConfig {
    /// Number of worker threads (0 = number of CPUs)
    pub num_workers: usize,
    /// Thread name prefix
    pub thread_name_prefix: String,
}

impl Default for ThreadPoolConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
            thread_name_prefix: "worker".to_string(),
        }
    }
}

impl ThreadPoolConfig {
    /// Create a new configuration with the specified number of workers
    #[must_use]
    pub fn new(num_workers: usize) -> Self {
        Self {
            num_workers: if num_workers == 0 {
                num_cpus::get()
            } else {
                num_workers
            },
            ..Default::default()
        }
    }

    /// Set thread name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if the worker count is zero.
    pub fn validate(&self) -> Result<()> {
        if self.num_workers == 0 {
            return Err(PoolError::invalid_config(
                "num_workers",
                "Number of workers must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// A fixed-capacity pool of worker threads serving a FIFO job queue.
///
/// Workers are spawned once at construction and live until shutdown; the
/// worker count never changes afterwards.
///
/// # Shutdown Mechanism
///
/// [`shutdown`](Self::shutdown) first waits for the in-flight counter to
/// reach zero, then flips the shutdown flag, wakes every worker, and joins
/// them all. [`shutdown_with(false)`](Self::shutdown_with) skips the drain:
/// each worker finishes its current job and exits, and jobs still queued at
/// that moment are discarded unexecuted. Either form is a no-op once the
/// pool has finished shutting down, and dropping the pool runs the draining
/// form automatically.
pub struct ThreadPool {
    config: ThreadPoolConfig,
    queue: Arc<JobQueue>,
    workers: Mutex<Vec<Worker>>,
    finished: AtomicBool,
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("config", &self.config)
            .field("queue", &self.queue)
            .field("finished", &self.finished.load(Ordering::Relaxed))
            .finish()
    }
}

impl ThreadPool {
    /// Create a pool with one worker per CPU
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Spawn`] if a worker thread cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(ThreadPoolConfig::default())
    }

    /// Create a pool with the specified number of workers
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] for a zero worker count and
    /// [`PoolError::Spawn`] if a worker thread cannot be created.
    pub fn with_workers(num_workers: usize) -> Result<Self> {
        Self::with_config(ThreadPoolConfig {
            num_workers,
            ..Default::default()
        })
    }

    /// Create a pool with a custom configuration
    ///
    /// All worker threads are spawned before this returns. If any spawn
    /// fails, the workers already spawned are shut down and joined, so no
    /// partial pool is left running.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] for an invalid configuration and
    /// [`PoolError::Spawn`] if a worker thread cannot be created.
    pub fn with_config(config: ThreadPoolConfig) -> Result<Self> {
        config.validate()?;

        let queue = Arc::new(JobQueue::new());

        let mut workers = Vec::with_capacity(config.num_workers);
        for id in 0..config.num_workers {
            match Worker::spawn(id, Arc::clone(&queue), &config.thread_name_prefix) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    queue.begin_shutdown();
                    for worker in workers {
                        let _ = worker.join();
                    }
                    return Err(e);
                }
            }
        }

        Ok(Self {
            config,
            queue,
            workers: Mutex::new(workers),
            finished: AtomicBool::new(false),
        })
    }

    /// Submit a job to the pool
    ///
    /// Appends the job at the tail of the queue and wakes one idle worker.
    /// Never blocks the caller beyond the queue lock; the queue is
    /// unbounded. Safe to call concurrently from any number of threads.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ShuttingDown`] once shutdown has begun.
    pub fn submit<J: Job + 'static>(&self, job: J) -> Result<()> {
        if self.queue.push(Box::new(job)) {
            Ok(())
        } else {
            Err(PoolError::shutting_down(&self.config.thread_name_prefix))
        }
    }

    /// Submit a closure as a job
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ShuttingDown`] once shutdown has begun.
    pub fn execute<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        self.submit(ClosureJob::new(f))
    }

    /// Get the fixed number of worker threads
    pub fn size(&self) -> usize {
        self.config.num_workers
    }

    /// Get the number of jobs waiting in the queue
    ///
    /// Excludes jobs currently executing. The value is a best-effort
    /// snapshot: it may change before the caller can act on it and must not
    /// be used for synchronization. Use [`wait_for_drain`](Self::wait_for_drain)
    /// to synchronize with job completion.
    pub fn remaining_count(&self) -> usize {
        self.queue.len()
    }

    /// Get the number of jobs submitted but not yet finished
    ///
    /// Counts queued jobs plus jobs currently executing. Best-effort
    /// snapshot, like [`remaining_count`](Self::remaining_count).
    pub fn jobs_in_flight(&self) -> usize {
        self.queue.in_flight()
    }

    /// Block until every submitted job has finished executing
    ///
    /// Returns immediately if nothing is outstanding. Does not stop or
    /// otherwise affect the workers; may be called repeatedly, and
    /// concurrently with submission, in which case it returns once the
    /// in-flight count is observed at zero.
    pub fn wait_for_drain(&self) {
        self.queue.wait_for_drain();
    }

    /// Shut down the pool after draining all queued jobs
    ///
    /// Equivalent to `shutdown_with(true)`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Join`] if a worker thread panicked.
    pub fn shutdown(&self) -> Result<()> {
        self.shutdown_with(true)
    }

    /// Shut down the pool, optionally draining queued jobs first
    ///
    /// With `wait_for_drain` set, blocks until the in-flight count reaches
    /// zero before stopping the workers, so every submitted job runs.
    /// Without it, workers stop after their current job and any job still
    /// queued is discarded unexecuted.
    ///
    /// Once the shutdown flag is set, further submissions are rejected.
    /// After the first completed call this is a no-op; concurrent callers
    /// block until the joins finish and then return `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Join`] if a worker thread panicked.
    pub fn shutdown_with(&self, wait_for_drain: bool) -> Result<()> {
        if self.finished.load(Ordering::Acquire) {
            return Ok(());
        }

        if wait_for_drain {
            self.queue.wait_for_drain();
        }

        self.queue.begin_shutdown();

        // Handles are drained under the lock, so a concurrent shutdown call
        // finds an empty vector and cannot double-join.
        let mut workers = self.workers.lock();
        for worker in workers.drain(..) {
            worker.join()?;
        }
        self.finished.store(true, Ordering::Release);

        Ok(())
    }

    /// Whether shutdown has fully completed (all workers joined)
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Get statistics for all workers
    ///
    /// Empty once the pool has been shut down.
    pub fn get_stats(&self) -> Vec<Arc<WorkerStats>> {
        self.workers.lock().iter().map(|w| w.stats()).collect()
    }

    /// Get total jobs completed successfully across all workers
    pub fn total_jobs_processed(&self) -> u64 {
        let workers = self.workers.lock();
        workers.iter().map(|w| w.stats().get_jobs_processed()).sum()
    }

    /// Get total jobs that returned an error across all workers
    pub fn total_jobs_failed(&self) -> u64 {
        let workers = self.workers.lock();
        workers.iter().map(|w| w.stats().get_jobs_failed()).sum()
    }

    /// Get total jobs that panicked across all workers
    pub fn total_jobs_panicked(&self) -> u64 {
        let workers = self.workers.lock();
        workers.iter().map(|w| w.stats().get_jobs_panicked()).sum()
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        if !self.finished.load(Ordering::Acquire) {
            if let Err(e) = self.shutdown() {
                error!(
                    "failed to shut down pool '{}' during drop: {}",
                    self.config.thread_name_prefix, e
                );
            }
        }
    }
}
