//! The stores exposed to scripts, and resetting them together.

use std::cell::RefCell;
use std::sync::{Arc, LazyLock};
use std::thread;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::consts::{RUNSPACE_STORE_DEFAULT, STATIC_STORE_DEFAULT, THREAD_LOCAL_STORE_DEFAULT};
use crate::runspace::Runspace;
use crate::store::{ContextScopedStore, GlobalStore, StoreError, ThreadScopedStore};

/// One value for the whole process.
pub static STATIC_STORE: GlobalStore<String> = GlobalStore::new(|| STATIC_STORE_DEFAULT.to_string());

/// One value per live runspace.
pub static RUNSPACE_STORE: LazyLock<ContextScopedStore<Runspace, String>> = LazyLock::new(|| {
  let config = StoreConfig::from_env().unwrap_or_else(|err| {
    warn!(%err, "invalid store configuration, using defaults");
    StoreConfig::default()
  });
  ContextScopedStore::with_config(config, || Ok(RUNSPACE_STORE_DEFAULT.to_string()))
});

thread_local! {
  static THREAD_LOCAL_SLOT: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// One value per OS thread.
pub static THREAD_LOCAL_STORE: ThreadScopedStore<String> =
  ThreadScopedStore::new(&THREAD_LOCAL_SLOT, || THREAD_LOCAL_STORE_DEFAULT.to_string());

/// Reset every store to its default, as seen from `runspace` and the calling thread.
///
/// Each store is reset independently; concurrent readers may observe some
/// stores reset before others.
pub fn reset_all(runspace: &Arc<Runspace>) {
  STATIC_STORE.reset();
  RUNSPACE_STORE.reset(runspace);
  THREAD_LOCAL_STORE.reset();
  debug!(runspace = runspace.id(), thread = %thread_label(), "reset all stores");
}

/// The values of all three stores as seen from one runspace on the calling thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreSnapshot {
  pub runspace: u64,
  pub thread: String,
  pub static_value: String,
  pub runspace_value: String,
  pub thread_value: String,
}

pub fn snapshot(runspace: &Arc<Runspace>) -> Result<StoreSnapshot, StoreError> {
  Ok(StoreSnapshot {
    runspace: runspace.id(),
    thread: thread_label(),
    static_value: STATIC_STORE.get(),
    runspace_value: RUNSPACE_STORE.get_for(runspace)?,
    thread_value: THREAD_LOCAL_STORE.get(),
  })
}

/// Name of the calling thread, or its id if it is unnamed.
pub fn thread_label() -> String {
  let current = thread::current();
  match current.name() {
    Some(name) => name.to_string(),
    None => format!("{:?}", current.id()),
  }
}
