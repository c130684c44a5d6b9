//! Run command implementation.
//!
//! Evaluates one script in every runspace on every worker thread. Runs are
//! sequential and runspace-major, so store values written by one run are
//! visible to later runs exactly as their scope allows.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, bail};
use mlua::prelude::*;
use serde::Serialize;

use runscope_lib::runspace::Runspace;

use crate::output::{print_error, print_json};
use crate::worker::Worker;

pub struct RunOptions {
  pub file: Option<PathBuf>,
  pub code: Option<String>,
  pub runspaces: usize,
  pub threads: usize,
}

enum Script {
  File(PathBuf),
  Inline(String),
}

impl Script {
  fn evaluate(&self, runspace: &Runspace) -> LuaResult<serde_json::Value> {
    match self {
      Script::File(path) => {
        let value = runspace.exec_file(path)?;
        runspace.lua().from_value(value)
      }
      Script::Inline(source) => runspace.eval_json(source),
    }
  }
}

#[derive(Debug, Serialize)]
struct RunResult {
  runspace: u64,
  thread: String,
  value: serde_json::Value,
}

pub fn cmd_run(options: RunOptions, json: bool) -> Result<()> {
  let script = match (options.file, options.code) {
    (Some(path), None) => {
      if !path.exists() {
        bail!("Script not found: {}", path.display());
      }
      Script::File(path)
    }
    (None, Some(code)) => Script::Inline(code),
    _ => bail!("Provide either a script file or --eval CODE"),
  };
  let script = Arc::new(script);

  let runspaces = (0..options.runspaces)
    .map(|_| anyhow::Context::context(Runspace::open(), "Failed to open runspace"))
    .collect::<Result<Vec<_>>>()?;
  let workers = (1..=options.threads)
    .map(|i| Worker::spawn(format!("worker-{}", i)))
    .collect::<Result<Vec<_>>>()?;

  let mut results = Vec::with_capacity(runspaces.len() * workers.len());
  for runspace in &runspaces {
    for worker in &workers {
      let job_script = Arc::clone(&script);
      let job_runspace = Arc::clone(runspace);
      let outcome = worker.run(move || job_script.evaluate(&job_runspace))?;

      match outcome {
        Ok(value) => results.push(RunResult {
          runspace: runspace.id(),
          thread: worker.name().to_string(),
          value,
        }),
        Err(err) => {
          print_error(&format!("runspace {} on {}: {}", runspace.id(), worker.name(), err));
          bail!("Script failed in runspace {} on {}", runspace.id(), worker.name());
        }
      }
    }
  }

  if json {
    return print_json(&results);
  }

  for result in &results {
    println!(
      "[runspace {} @ {}] {}",
      result.runspace,
      result.thread,
      serde_json::to_string(&result.value)?
    );
  }

  Ok(())
}
