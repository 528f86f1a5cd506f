//! # Worker Pool
//!
//! A bounded-concurrency task runner. [`WorkerPool::submit`] runs a batch of
//! tasks with at most `max_concurrency` of them in flight, blocks until all
//! of them have finished and returns their results in submission order.
//! The pool keeps no state between submissions.
//!
//! ```rust
//! use evolve::pool::{work_with, WorkerPool};
//!
//! let pool = WorkerPool::new(2).unwrap();
//! let base = 10;
//! let tasks = (0..5).map(|i| work_with(move || base + i)).collect();
//!
//! assert_eq!(pool.submit(tasks), vec![10, 11, 12, 13, 14]);
//! ```

use std::fmt;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::trace;

use crate::error::{GeneticError, Result, ResultExt};

/// A unit of work accepted by [`WorkerPool::submit`].
pub type Task<'a, R> = Box<dyn FnOnce() -> R + Send + 'a>;

/// Wraps a closure into a [`Task`].
pub fn work_with<'a, R, F>(work: F) -> Task<'a, R>
where
    F: FnOnce() -> R + Send + 'a,
{
    Box::new(work)
}

/// Runs tasks on a dedicated set of worker threads.
pub struct WorkerPool {
    max_concurrency: usize,
    pool: ThreadPool,
}

impl WorkerPool {
    /// Creates a pool that runs at most `max_concurrency` tasks at once.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if `max_concurrency` is zero, or an
    /// error if the worker threads cannot be spawned.
    pub fn new(max_concurrency: usize) -> Result<Self> {
        if max_concurrency == 0 {
            return Err(GeneticError::Configuration(
                "Worker pool concurrency must be at least 1".to_string(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(max_concurrency)
            .thread_name(|index| format!("evolve-worker-{}", index))
            .build()
            .context("Failed to build worker pool")?;

        Ok(Self {
            max_concurrency,
            pool,
        })
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Runs every task and returns the results in input order.
    pub fn submit<'a, R>(&self, tasks: Vec<Task<'a, R>>) -> Vec<R>
    where
        R: Send,
    {
        trace!(tasks = tasks.len(), workers = self.max_concurrency, "submitting tasks");
        self.pool
            .install(|| tasks.into_par_iter().map(|task| task()).collect())
    }

    /// Applies `work` to every item and returns the results in input order.
    pub fn map<I, R, F>(&self, items: &[I], work: F) -> Vec<R>
    where
        I: Sync,
        R: Send,
        F: Fn(&I) -> R + Send + Sync,
    {
        trace!(items = items.len(), workers = self.max_concurrency, "mapping items");
        self.pool
            .install(|| items.par_iter().map(|item| work(item)).collect())
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("max_concurrency", &self.max_concurrency)
            .finish()
    }
}
