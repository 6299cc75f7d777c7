//! Worker pool
//!
//! Fixed-size thread pool fed by a shared job queue.

use std::thread;

use crossbeam::channel::{self, Receiver, Sender};

use crate::error::Result;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A thread pool with a shared MPMC job queue.
///
/// The crossbeam channel is used single-producer/multi-consumer: the
/// acceptor thread sends jobs, the workers receive them. A worker that
/// panics while running a job is replaced, so one poisoned request cannot
/// drain the pool.
pub struct WorkerPool {
    tx: Sender<Job>,
}

impl WorkerPool {
    /// Create a pool with the given number of worker threads.
    pub fn new(threads: usize) -> Result<Self> {
        let (tx, rx) = channel::unbounded::<Job>();
        for _ in 0..threads {
            let rx = JobReceiver(rx.clone());
            thread::Builder::new().spawn(move || run_jobs(rx))?;
        }
        Ok(WorkerPool { tx })
    }

    /// Queue a job for the next free worker.
    ///
    /// # Panics
    ///
    /// Panics if every worker has died and could not be respawned, which
    /// only happens once the OS refuses to create threads.
    pub fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.tx
            .send(Box::new(job))
            .expect("worker pool has no live threads");
    }
}

/// Receiving end of the job queue, one clone per worker.
///
/// The `Drop` impl notices when its thread is unwinding from a panicked
/// job and spawns a replacement worker around a fresh clone.
#[derive(Clone)]
struct JobReceiver(Receiver<Job>);

impl Drop for JobReceiver {
    fn drop(&mut self) {
        if thread::panicking() {
            tracing::debug!("worker panicked, spawning a replacement");
            let rx = self.clone();
            if let Err(e) = thread::Builder::new().spawn(move || run_jobs(rx)) {
                tracing::error!("Failed to spawn replacement worker: {}", e);
            }
        }
    }
}

/// Run jobs until the sending side (the pool) is dropped.
fn run_jobs(rx: JobReceiver) {
    while let Ok(job) = rx.0.recv() {
        job();
    }
    tracing::debug!("worker exiting, pool was dropped");
}
