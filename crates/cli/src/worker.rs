//! Long-lived worker threads.
//!
//! A worker executes submitted jobs one at a time on the same named OS thread,
//! so thread-scoped state set by one job is still there for the next.

use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result, anyhow};
use tracing::debug;

type Job = Box<dyn FnOnce() + Send + 'static>;

pub struct Worker {
  name: String,
  jobs: Option<Sender<Job>>,
  handle: Option<JoinHandle<()>>,
}

impl Worker {
  pub fn spawn(name: impl Into<String>) -> Result<Self> {
    let name = name.into();
    let (jobs, queue) = mpsc::channel::<Job>();

    let handle = thread::Builder::new()
      .name(name.clone())
      .spawn(move || {
        for job in queue {
          job();
        }
      })
      .with_context(|| format!("Failed to spawn worker thread '{}'", name))?;

    debug!(worker = %name, "spawned worker");
    Ok(Self {
      name,
      jobs: Some(jobs),
      handle: Some(handle),
    })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Run `job` on the worker thread and wait for its result.
  pub fn run<F, R>(&self, job: F) -> Result<R>
  where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
  {
    let (reply, result) = mpsc::sync_channel(1);
    let job: Job = Box::new(move || {
      // The caller may have given up waiting; nothing to report then.
      let _ = reply.send(job());
    });

    self
      .jobs
      .as_ref()
      .and_then(|jobs| jobs.send(job).ok())
      .ok_or_else(|| anyhow!("Worker '{}' is no longer accepting jobs", self.name))?;

    result
      .recv()
      .map_err(|_| anyhow!("Worker '{}' panicked while running a job", self.name))
  }
}

impl Drop for Worker {
  fn drop(&mut self) {
    // Closing the queue ends the worker loop.
    self.jobs.take();
    if let Some(handle) = self.handle.take() {
      let _ = handle.join();
    }
    debug!(worker = %self.name, "stopped worker");
  }
}
