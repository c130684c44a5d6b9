//! The `scope` global table.
//!
//! Exposes the three stores to scripts:
//! - `scope.static.get()` / `scope.static.set(v)` - process-wide value
//! - `scope.runspace.get()` / `scope.runspace.set(v)` - value of the current runspace
//! - `scope.runspace.id()` - identifier of the current runspace
//! - `scope.thread.get()` / `scope.thread.set(v)` - value of the calling OS thread
//! - `scope.thread.name()` - name of the calling OS thread
//! - `scope.reset_all()` - restore every store to its default
//! - `scope.defaults` - the default of each store

use mlua::prelude::*;

use crate::consts::{RUNSPACE_STORE_DEFAULT, STATIC_STORE_DEFAULT, THREAD_LOCAL_STORE_DEFAULT};
use crate::runspace::Runspace;
use crate::stores::{self, RUNSPACE_STORE, STATIC_STORE, THREAD_LOCAL_STORE};

/// Register the `scope` global table in the Lua runtime.
pub(crate) fn register_globals(lua: &Lua) -> LuaResult<()> {
  let scope = lua.create_table()?;

  scope.set("static", create_static_table(lua)?)?;
  scope.set("runspace", create_runspace_table(lua)?)?;
  scope.set("thread", create_thread_table(lua)?)?;

  let reset_all = lua.create_function(|lua, ()| {
    let runspace = Runspace::current(lua)?;
    stores::reset_all(&runspace);
    Ok(())
  })?;
  scope.set("reset_all", reset_all)?;

  let defaults = lua.create_table()?;
  defaults.set("static", STATIC_STORE_DEFAULT)?;
  defaults.set("runspace", RUNSPACE_STORE_DEFAULT)?;
  defaults.set("thread", THREAD_LOCAL_STORE_DEFAULT)?;
  scope.set("defaults", defaults)?;

  lua.globals().set("scope", scope)?;

  Ok(())
}

/// Setters take one required positional value.
fn required(call: &str, value: Option<String>) -> LuaResult<String> {
  value.ok_or_else(|| LuaError::external(format!("{} requires a value", call)))
}

fn create_static_table(lua: &Lua) -> LuaResult<LuaTable> {
  let table = lua.create_table()?;

  table.set("get", lua.create_function(|_, ()| Ok(STATIC_STORE.get()))?)?;
  table.set(
    "set",
    lua.create_function(|_, value: Option<String>| {
      STATIC_STORE.set(required("scope.static.set", value)?);
      Ok(())
    })?,
  )?;

  Ok(table)
}

fn create_runspace_table(lua: &Lua) -> LuaResult<LuaTable> {
  let table = lua.create_table()?;

  table.set(
    "get",
    lua.create_function(|lua, ()| RUNSPACE_STORE.get_current(lua).map_err(LuaError::external))?,
  )?;
  table.set(
    "set",
    lua.create_function(|lua, value: Option<String>| {
      let value = required("scope.runspace.set", value)?;
      RUNSPACE_STORE.set(&Runspace::current(lua)?, value);
      Ok(())
    })?,
  )?;
  table.set(
    "id",
    lua.create_function(|lua, ()| Ok(Runspace::current(lua)?.id()))?,
  )?;

  Ok(table)
}

fn create_thread_table(lua: &Lua) -> LuaResult<LuaTable> {
  let table = lua.create_table()?;

  table.set("get", lua.create_function(|_, ()| Ok(THREAD_LOCAL_STORE.get()))?)?;
  table.set(
    "set",
    lua.create_function(|_, value: Option<String>| {
      THREAD_LOCAL_STORE.set(required("scope.thread.set", value)?);
      Ok(())
    })?,
  )?;
  table.set("name", lua.create_function(|_, ()| Ok(stores::thread_label()))?)?;

  Ok(table)
}
