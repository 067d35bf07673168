use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use tracing::error;

use super::ThreadPool;
use crate::Result;

/// a thread-pool that is not actually a pool. It starts a new, named thread on every spawn
/// request, so the number of running jobs is unbounded
#[derive(Debug, Default)]
pub struct NaiveThreadPool {
    // number of threads spawned so far, used to name them
    spawned: AtomicU64,
}

impl ThreadPool for NaiveThreadPool {
    /// `threads` is ignored, threads are created on demand
    fn new(_threads: u32) -> Result<Self> {
        Ok(NaiveThreadPool::default())
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let n = self.spawned.fetch_add(1, Ordering::Relaxed);
        if let Err(e) = thread::Builder::new()
            .name(format!("jks-handler-{}", n))
            .spawn(job)
        {
            error!("Failed to spawn a handler thread: {}", e);
        }
    }
}
