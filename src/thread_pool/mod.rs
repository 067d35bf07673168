//! Strategies for running connection handlers off the accept loops.
//!
//! A jks server hands every accepted connection to a [`ThreadPool`] and immediately goes back
//! to accepting. The default, [`NaiveThreadPool`], runs every handler on a thread of its own
//! and puts no cap on the number of handlers running at once.
use crate::Result;

mod naive;

pub use self::naive::NaiveThreadPool;

/// A pool of threads that connection handlers can be spawned onto
pub trait ThreadPool: Send + Sync + 'static {
    /// creates a new pool sized for `threads` threads
    fn new(threads: u32) -> Result<Self>
    where
        Self: Sized;

    /// runs `job` on a thread of the pool. The job is detached from the caller; a job that
    /// panics only takes down its own thread.
    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static;
}
