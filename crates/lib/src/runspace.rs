//! Runspaces: the execution contexts the runspace store is keyed by.
//!
//! A runspace owns one Lua VM with the `scope` globals registered. Scripts
//! running inside it resolve "their" runspace through a weak back-reference
//! kept in the VM's app data, so the VM never keeps its runspace alive.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use mlua::prelude::*;
use tracing::debug;

use crate::lua::runtime;
use crate::store::{ContainerResolver, StoreError};

static NEXT_RUNSPACE_ID: AtomicU64 = AtomicU64::new(1);

/// Back-reference from a VM to the runspace that owns it.
struct ActiveRunspace(Weak<Runspace>);

/// An isolated scripting context.
pub struct Runspace {
  id: u64,
  lua: Lua,
}

impl Runspace {
  /// Open a new runspace with a fresh Lua VM.
  pub fn open() -> LuaResult<Arc<Self>> {
    let lua = runtime::create_runtime()?;
    let id = NEXT_RUNSPACE_ID.fetch_add(1, Ordering::Relaxed);

    let runspace = Arc::new_cyclic(|weak| {
      lua.set_app_data(ActiveRunspace(weak.clone()));
      Self { id, lua }
    });

    debug!(id, "opened runspace");
    Ok(runspace)
  }

  /// The runspace a Lua callback is executing in.
  pub fn current(lua: &Lua) -> LuaResult<Arc<Self>> {
    lua
      .current_container()
      .ok_or_else(|| LuaError::external(StoreError::NoCurrentContainer))
  }

  /// Process-unique identifier, assigned in opening order.
  pub fn id(&self) -> u64 {
    self.id
  }

  /// Get access to the raw Lua state.
  pub fn lua(&self) -> &Lua {
    &self.lua
  }

  /// Evaluate a chunk of Lua source in this runspace.
  pub fn eval<R: FromLuaMulti>(&self, source: &str) -> LuaResult<R> {
    self.lua.load(source).set_name(format!("=runspace-{}", self.id)).eval()
  }

  /// Evaluate a chunk and convert its first result to JSON.
  pub fn eval_json(&self, source: &str) -> LuaResult<serde_json::Value> {
    let value: LuaValue = self.eval(source)?;
    self.lua.from_value(value)
  }

  /// Load and execute a Lua file in this runspace.
  pub fn exec_file(&self, path: &Path) -> LuaResult<LuaValue> {
    runtime::load_file(&self.lua, path)
  }
}

impl Drop for Runspace {
  fn drop(&mut self) {
    debug!(id = self.id, "closed runspace");
  }
}

impl std::fmt::Debug for Runspace {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Runspace").field("id", &self.id).finish_non_exhaustive()
  }
}

impl ContainerResolver<Runspace> for Lua {
  fn current_container(&self) -> Option<Arc<Runspace>> {
    self.app_data_ref::<ActiveRunspace>()?.0.upgrade()
  }
}
