//! Demo command implementation.
//!
//! Opens two runspaces and two worker threads, writes every store from one
//! (runspace, thread) pair and shows what every pair observes, before and
//! after `scope.reset_all()`.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use runscope_lib::runspace::Runspace;
use runscope_lib::stores::{self, StoreSnapshot};

use crate::output::{print_info, print_json, print_snapshots, print_success, symbols};
use crate::worker::Worker;

const DEMO_VALUE: &str = "set-by-runspace-1-on-worker-1";

#[derive(Serialize)]
struct DemoReport {
  value: &'static str,
  after_set: Vec<StoreSnapshot>,
  after_reset: Vec<StoreSnapshot>,
}

pub fn cmd_demo(json: bool) -> Result<()> {
  let runspaces = [
    Runspace::open().context("Failed to open runspace")?,
    Runspace::open().context("Failed to open runspace")?,
  ];
  let workers = [Worker::spawn("worker-1")?, Worker::spawn("worker-2")?];

  eval_on(
    &workers[0],
    &runspaces[0],
    format!(
      "scope.static.set('{v}') scope.runspace.set('{v}') scope.thread.set('{v}')",
      v = DEMO_VALUE
    ),
  )?;
  let after_set = observe(&runspaces, &workers)?;

  eval_on(&workers[0], &runspaces[0], "scope.reset_all()".to_string())?;
  let after_reset = observe(&runspaces, &workers)?;

  let report = DemoReport {
    value: DEMO_VALUE,
    after_set,
    after_reset,
  };

  if json {
    return print_json(&report);
  }

  print_info(&format!(
    "Set every store to '{}' from runspace {} on {}",
    report.value,
    runspaces[0].id(),
    workers[0].name()
  ));
  print_snapshots(&report.after_set);
  println!();
  print_info(&format!(
    "{} scope.reset_all() from runspace {} on {}",
    symbols::ARROW,
    runspaces[0].id(),
    workers[0].name()
  ));
  print_snapshots(&report.after_reset);
  println!();
  print_success("Static is shared by everyone, runspace follows the runspace, thread follows the thread");

  Ok(())
}

fn eval_on(worker: &Worker, runspace: &Arc<Runspace>, source: String) -> Result<()> {
  let runspace = Arc::clone(runspace);
  let id = runspace.id();
  worker
    .run(move || runspace.eval::<()>(&source))?
    .with_context(|| format!("Script failed in runspace {} on {}", id, worker.name()))
}

/// Read every store from every (runspace, worker) pair, runspace-major.
fn observe(runspaces: &[Arc<Runspace>], workers: &[Worker]) -> Result<Vec<StoreSnapshot>> {
  let mut snapshots = Vec::with_capacity(runspaces.len() * workers.len());
  for runspace in runspaces {
    for worker in workers {
      let runspace = Arc::clone(runspace);
      snapshots.push(worker.run(move || stores::snapshot(&runspace))??);
    }
  }
  Ok(snapshots)
}
