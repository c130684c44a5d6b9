//! Run command integration tests.

use predicates::prelude::*;
use serde_json::json;

use super::common::{TestEnv, values};

#[test]
fn run_single_runspace_single_thread() {
  let env = TestEnv::from_fixture("counters.lua");
  let results = env.run_json(&[]);

  assert_eq!(results.len(), 1);
  assert_eq!(results[0]["runspace"], 1);
  assert_eq!(results[0]["thread"], "worker-1");
  assert_eq!(
    results[0]["value"],
    json!({
      "runspace": 1,
      "thread": "worker-1",
      "static": "StaticStoreDefault+",
      "runspace_value": "RunspaceStoreDefault+",
      "thread_value": "ThreadLocalStoreDefault+",
    })
  );
}

#[test]
fn each_store_accumulates_within_its_scope() {
  let env = TestEnv::from_fixture("counters.lua");
  let results = env.run_json(&["--runspaces", "2", "--threads", "2"]);
  let values = values(&results);
  assert_eq!(values.len(), 4);

  // Runs are runspace-major: (1, w1), (1, w2), (2, w1), (2, w2).
  let order: Vec<(i64, &str)> = values
    .iter()
    .map(|v| (v["runspace"].as_i64().unwrap(), v["thread"].as_str().unwrap()))
    .collect();
  assert_eq!(order, vec![(1, "worker-1"), (1, "worker-2"), (2, "worker-1"), (2, "worker-2")]);

  // Static: one value for the process, every run appends.
  let statics: Vec<&str> = values.iter().map(|v| v["static"].as_str().unwrap()).collect();
  assert_eq!(
    statics,
    vec![
      "StaticStoreDefault+",
      "StaticStoreDefault++",
      "StaticStoreDefault+++",
      "StaticStoreDefault++++",
    ]
  );

  // Runspace: restarts for the second runspace regardless of thread.
  let runspaces: Vec<&str> = values.iter().map(|v| v["runspace_value"].as_str().unwrap()).collect();
  assert_eq!(
    runspaces,
    vec![
      "RunspaceStoreDefault+",
      "RunspaceStoreDefault++",
      "RunspaceStoreDefault+",
      "RunspaceStoreDefault++",
    ]
  );

  // Thread: follows the worker across runspaces.
  let threads: Vec<&str> = values.iter().map(|v| v["thread_value"].as_str().unwrap()).collect();
  assert_eq!(
    threads,
    vec![
      "ThreadLocalStoreDefault+",
      "ThreadLocalStoreDefault+",
      "ThreadLocalStoreDefault++",
      "ThreadLocalStoreDefault++",
    ]
  );
}

#[test]
fn reset_all_restores_defaults() {
  let env = TestEnv::from_fixture("reset.lua");
  let results = env.run_json(&[]);

  assert_eq!(
    results[0]["value"],
    json!({
      "static": "StaticStoreDefault",
      "runspace": "RunspaceStoreDefault",
      "thread": "ThreadLocalStoreDefault",
    })
  );
}

#[test]
fn scripts_can_require_siblings() {
  let env = TestEnv::from_fixture("require_helper.lua");
  env.write_file("helper.lua", "return { greet = function(name) return 'hello ' .. name end }");

  let results = env.run_json(&[]);
  assert_eq!(results[0]["value"], "hello runscope");
}

#[test]
fn text_output_prefixes_runspace_and_thread() {
  let env = TestEnv::from_source("return scope.runspace.id()");

  env
    .runscope_cmd()
    .arg("run")
    .arg(&env.script_path)
    .args(["--runspaces", "2"])
    .assert()
    .success()
    .stdout(predicate::str::contains("[runspace 1 @ worker-1] 1"))
    .stdout(predicate::str::contains("[runspace 2 @ worker-1] 2"));
}

#[test]
fn set_without_value_reports_usage_error() {
  let env = TestEnv::from_source("scope.static.set()");

  env
    .runscope_cmd()
    .arg("run")
    .arg(&env.script_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("scope.static.set requires a value"));
}

#[test]
fn failure_stops_at_first_failing_run() {
  let env = TestEnv::from_source("if scope.runspace.id() == 2 then error('second runspace') end return 'ok'");

  env
    .runscope_cmd()
    .arg("run")
    .arg(&env.script_path)
    .args(["--runspaces", "3"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("runspace 2 on worker-1"))
    .stderr(predicate::str::contains("second runspace"));
}

#[test]
fn verbose_logs_runspace_lifecycle() {
  let env = TestEnv::from_source("return true");

  env
    .runscope_cmd()
    .arg("--verbose")
    .arg("run")
    .arg(&env.script_path)
    .assert()
    .success()
    .stderr(predicate::str::contains("opened runspace"));
}
