//! Job trait and related types

use crate::core::error::Result;
use std::fmt;

/// A unit of deferred work executed exactly once by some worker.
///
/// Jobs take no input and produce no output visible to the submitter. A job
/// returning an error is logged and counted by the executing worker but is
/// never propagated back to the caller; a panicking job is caught by the
/// worker and counted likewise (see [`WorkerStats`](crate::pool::WorkerStats)).
pub trait Job: Send {
    /// Execute the job
    ///
    /// # Errors
    ///
    /// Returns an error if the job execution fails. The error is consumed by
    /// the worker, not reported to the submitter.
    fn execute(&mut self) -> Result<()>;

    /// Get the job's type name for logging and statistics
    fn job_type(&self) -> &str {
        "Job"
    }
}

impl fmt::Debug for dyn Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Job({})", self.job_type())
    }
}

/// A boxed job that can be sent across threads
pub type BoxedJob = Box<dyn Job>;

/// Helper to create a job from a closure
pub struct ClosureJob<F>
where
    F: FnOnce() -> Result<()> + Send,
{
    closure: Option<F>,
    name: String,
}

impl<F> ClosureJob<F>
where
    F: FnOnce() -> Result<()> + Send,
{
    /// Create a new closure job
    pub fn new(closure: F) -> Self {
        Self {
            closure: Some(closure),
            name: "ClosureJob".to_string(),
        }
    }

    /// Create a new closure job with a custom name
    pub fn with_name<S: Into<String>>(closure: F, name: S) -> Self {
        Self {
            closure: Some(closure),
            name: name.into(),
        }
    }
}

impl<F> Job for ClosureJob<F>
where
    F: FnOnce() -> Result<()> + Send,
{
    fn execute(&mut self) -> Result<()> {
        match self.closure.take() {
            Some(closure) => closure(),
            None => Err(crate::core::PoolError::other(
                "ClosureJob already executed - cannot execute twice",
            )),
        }
    }

    fn job_type(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_job() {
        let mut job = ClosureJob::new(|| Ok(()));

        assert_eq!(job.job_type(), "ClosureJob");
        assert!(job.execute().is_ok());
    }

    #[test]
    fn test_closure_job_with_name() {
        let job = ClosureJob::with_name(|| Ok(()), "TestJob");
        assert_eq!(job.job_type(), "TestJob");
    }

    #[test]
    fn test_closure_job_runs_once() {
        let mut job = ClosureJob::new(|| Ok(()));
        assert!(job.execute().is_ok());
        assert!(job.execute().is_err());
    }

    #[test]
    fn test_boxed_job_debug() {
        let job: BoxedJob = Box::new(ClosureJob::with_name(|| Ok(()), "Named"));
        assert_eq!(format!("{:?}", job), "Job(Named)");
    }
}
