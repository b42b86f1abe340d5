//! Shared job queue and synchronization state.
//!
//! One [`JobQueue`] is shared between the pool handle and every worker. It
//! holds the pending jobs, the in-flight accounting, and the shutdown flag
//! under a single mutex, with two condition variables tying them together:
//! one wakes idle workers when a job arrives (or shutdown begins), the other
//! wakes drain waiters when the in-flight count reaches zero.
//!
//! All waits are predicate-checked loops, so spurious wakeups and
//! signal-before-wait races are harmless.

use crate::core::BoxedJob;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

struct QueueState {
    /// Pending jobs in FIFO order, unbounded.
    pending: VecDeque<BoxedJob>,
    /// Jobs submitted but not yet finished: queued plus currently executing.
    in_flight: usize,
    /// Once set, workers stop dispatching and exit after their current job.
    shutting_down: bool,
}

/// Unbounded FIFO job queue with in-flight accounting and drain signaling.
pub struct JobQueue {
    state: Mutex<QueueState>,
    job_available: Condvar,
    drained: Condvar,
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl JobQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                pending: VecDeque::new(),
                in_flight: 0,
                shutting_down: false,
            }),
            job_available: Condvar::new(),
            drained: Condvar::new(),
        }
    }

    /// Append a job at the tail and wake one idle worker.
    ///
    /// Returns `false` without enqueueing if shutdown has already begun.
    /// Never blocks beyond the queue lock.
    pub fn push(&self, job: BoxedJob) -> bool {
        let mut state = self.state.lock();
        if state.shutting_down {
            return false;
        }
        state.pending.push_back(job);
        state.in_flight += 1;
        self.job_available.notify_one();
        true
    }

    /// Take the job at the head, blocking while the queue is empty.
    ///
    /// Returns `None` once shutdown has begun. The shutdown check comes
    /// before the pop, so jobs still queued at that point are never handed
    /// out; they are discarded when the queue is dropped.
    pub fn next_job(&self) -> Option<BoxedJob> {
        let mut state = self.state.lock();
        loop {
            if state.shutting_down {
                return None;
            }
            if let Some(job) = state.pending.pop_front() {
                return Some(job);
            }
            self.job_available.wait(&mut state);
        }
    }

    /// Account for one finished job and wake drain waiters at zero.
    ///
    /// Called by a worker after executing each job it dispatched. The
    /// in-flight count is only decremented for jobs actually handed out by
    /// [`next_job`](Self::next_job), so it never underflows.
    pub fn finish_job(&self) {
        let mut state = self.state.lock();
        debug_assert!(state.in_flight > 0, "finish_job without a dispatched job");
        state.in_flight -= 1;
        if state.in_flight == 0 {
            self.drained.notify_all();
        }
    }

    /// Block the caller until the in-flight count reaches zero.
    ///
    /// Returns immediately if nothing is outstanding. Waiters re-check the
    /// predicate on every wakeup.
    pub fn wait_for_drain(&self) {
        let mut state = self.state.lock();
        while state.in_flight > 0 {
            self.drained.wait(&mut state);
        }
    }

    /// Flip the shutdown flag and wake every waiting worker.
    ///
    /// Workers blocked in [`next_job`](Self::next_job) observe the flag and
    /// return `None`; workers mid-job observe it after finishing.
    pub fn begin_shutdown(&self) {
        let mut state = self.state.lock();
        state.shutting_down = true;
        self.job_available.notify_all();
    }

    /// Whether shutdown has begun.
    pub fn is_shutting_down(&self) -> bool {
        self.state.lock().shutting_down
    }

    /// Number of jobs waiting in the queue, excluding jobs currently
    /// executing. Best-effort snapshot; stale by the time it is returned.
    pub fn len(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Whether the queue holds no pending jobs. Best-effort snapshot.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Jobs submitted but not yet finished: queued plus executing.
    /// Best-effort snapshot.
    pub fn in_flight(&self) -> usize {
        self.state.lock().in_flight
    }
}

impl std::fmt::Debug for JobQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("JobQueue")
            .field("pending", &state.pending.len())
            .field("in_flight", &state.in_flight)
            .field("shutting_down", &state.shutting_down)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ClosureJob;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn noop_job() -> BoxedJob {
        Box::new(ClosureJob::new(|| Ok(())))
    }

    #[test]
    fn test_push_and_pop_fifo() {
        let queue = JobQueue::new();
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        for i in 0..5 {
            let order = Arc::clone(&order);
            assert!(queue.push(Box::new(ClosureJob::new(move || {
                order.lock().push(i);
                Ok(())
            }))));
        }
        assert_eq!(queue.len(), 5);
        assert_eq!(queue.in_flight(), 5);

        for _ in 0..5 {
            let mut job = queue.next_job().expect("job should be available");
            job.execute().unwrap();
            queue.finish_job();
        }

        assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
        assert_eq!(queue.in_flight(), 0);
    }

    #[test]
    fn test_push_rejected_after_shutdown() {
        let queue = JobQueue::new();
        assert!(queue.push(noop_job()));
        assert!(!queue.is_shutting_down());
        queue.begin_shutdown();
        assert!(queue.is_shutting_down());
        assert!(!queue.push(noop_job()));
        // The job accepted before shutdown stays queued but is never
        // handed out.
        assert_eq!(queue.len(), 1);
        assert!(queue.next_job().is_none());
    }

    #[test]
    fn test_next_job_wakes_on_shutdown() {
        let queue = Arc::new(JobQueue::new());
        let waiter = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.next_job().is_none())
        };

        // Give the waiter time to block on the empty queue.
        thread::sleep(Duration::from_millis(50));
        queue.begin_shutdown();
        assert!(waiter.join().unwrap());
    }

    #[test]
    fn test_wait_for_drain_returns_immediately_when_idle() {
        let queue = JobQueue::new();
        queue.wait_for_drain();
        assert_eq!(queue.in_flight(), 0);
    }

    #[test]
    fn test_wait_for_drain_blocks_until_finished() {
        let queue = Arc::new(JobQueue::new());
        let executed = Arc::new(AtomicUsize::new(0));

        assert!(queue.push(noop_job()));

        let consumer = {
            let queue = Arc::clone(&queue);
            let executed = Arc::clone(&executed);
            thread::spawn(move || {
                let mut job = queue.next_job().expect("job should be available");
                thread::sleep(Duration::from_millis(50));
                job.execute().unwrap();
                executed.fetch_add(1, Ordering::Relaxed);
                queue.finish_job();
            })
        };

        queue.wait_for_drain();
        assert_eq!(executed.load(Ordering::Relaxed), 1);
        consumer.join().unwrap();
    }
}
