//! # Workpool
//!
//! A fixed-capacity worker thread pool with a FIFO job queue, synchronous
//! drain waiting, and orderly shutdown.
//!
//! ## Features
//!
//! - **Fixed worker set**: N persistent threads, spawned once at construction
//! - **Unbounded FIFO queue**: submission never blocks beyond the queue lock
//! - **Drain waiting**: block until every submitted job has finished
//! - **Orderly shutdown**: idempotent shutdown that joins every worker, with
//!   an optional drain first
//! - **Panic isolation**: a panicking job is caught and counted; the worker
//!   thread survives
//! - **Automatic cleanup**: dropping the pool shuts it down with a full drain
//!
//! ## Quick Start
//!
//! ```rust
//! use workpool::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // Workers start immediately on construction.
//! let pool = ThreadPool::with_workers(4)?;
//!
//! for i in 0..10 {
//!     pool.execute(move || {
//!         println!("Job {} executing", i);
//!         Ok(())
//!     })?;
//! }
//!
//! // Block until all submitted jobs have finished.
//! pool.wait_for_drain();
//!
//! pool.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use workpool::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let config = ThreadPoolConfig::new(8).with_thread_name_prefix("my-worker");
//! let pool = ThreadPool::with_config(config)?;
//! # pool.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Jobs
//!
//! ```rust
//! use workpool::prelude::*;
//!
//! struct MyJob {
//!     data: String,
//! }
//!
//! impl Job for MyJob {
//!     fn execute(&mut self) -> Result<()> {
//!         println!("Processing: {}", self.data);
//!         Ok(())
//!     }
//!
//!     fn job_type(&self) -> &str {
//!         "MyJob"
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let pool = ThreadPool::with_workers(2)?;
//! pool.submit(MyJob {
//!     data: "test".to_string(),
//! })?;
//! # pool.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Shutdown Semantics
//!
//! `shutdown()` drains the pool before stopping the workers; every submitted
//! job runs. `shutdown_with(false)` stops workers as soon as their current job
//! finishes: jobs still sitting in the queue at that moment are **discarded
//! unexecuted**. "Graceful" here means "finish what is already running", not
//! "finish what is already queued". Use the draining form when every queued
//! job must run.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod pool;
pub mod prelude;
pub mod queue;

pub use crate::core::{BoxedJob, ClosureJob, Job, PoolError, Result};
pub use crate::pool::{ThreadPool, ThreadPoolConfig, WorkerStats};
