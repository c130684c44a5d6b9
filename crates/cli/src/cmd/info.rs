use anyhow::Result;
use serde::Serialize;

use runscope_lib::config::StoreConfig;
use runscope_lib::consts::{APP_NAME, RUNSPACE_STORE_DEFAULT, STATIC_STORE_DEFAULT, THREAD_LOCAL_STORE_DEFAULT};

use crate::output::{print_info, print_json, print_stat, print_warning};

#[derive(Serialize)]
struct Info {
  version: &'static str,
  defaults: Defaults,
  config: StoreConfig,
}

#[derive(Serialize)]
struct Defaults {
  r#static: &'static str,
  runspace: &'static str,
  thread: &'static str,
}

pub fn cmd_info(json: bool) -> Result<()> {
  let config = StoreConfig::from_env().unwrap_or_else(|err| {
    print_warning(&format!("{}; using defaults", err));
    StoreConfig::default()
  });

  let info = Info {
    version: env!("CARGO_PKG_VERSION"),
    defaults: Defaults {
      r#static: STATIC_STORE_DEFAULT,
      runspace: RUNSPACE_STORE_DEFAULT,
      thread: THREAD_LOCAL_STORE_DEFAULT,
    },
    config,
  };

  if json {
    return print_json(&info);
  }

  print_info(&format!("{} v{}", APP_NAME, info.version));
  println!();
  println!("Defaults:");
  print_stat("Static", info.defaults.r#static);
  print_stat("Runspace", info.defaults.runspace);
  print_stat("Thread", info.defaults.thread);
  println!();
  println!("Config:");
  print_stat("Sweep interval", &info.config.sweep_interval.to_string());

  Ok(())
}
