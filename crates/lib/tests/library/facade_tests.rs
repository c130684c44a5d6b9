//! Tests for the `scope` Lua facade and reset coordination.

use std::sync::Arc;

use mlua::prelude::*;
use serial_test::serial;

use runscope_lib::consts::{RUNSPACE_STORE_DEFAULT, STATIC_STORE_DEFAULT, THREAD_LOCAL_STORE_DEFAULT};
use runscope_lib::runspace::Runspace;
use runscope_lib::stores::{self, RUNSPACE_STORE, STATIC_STORE, THREAD_LOCAL_STORE};

use super::common::{on_fresh_thread, read_all};

#[test]
#[serial]
fn static_store_scenario() -> LuaResult<()> {
  on_fresh_thread(|| -> LuaResult<()> {
    let runspace = Runspace::open()?;
    STATIC_STORE.reset();

    let get = || runspace.eval::<String>("return scope.static.get()");
    assert_eq!(get()?, "StaticStoreDefault");
    runspace.eval::<()>("scope.static.set('X')")?;
    assert_eq!(get()?, "X");
    runspace.eval::<()>("scope.reset_all()")?;
    assert_eq!(get()?, "StaticStoreDefault");
    Ok(())
  })
}

#[test]
#[serial]
fn static_writes_are_seen_from_any_thread() -> LuaResult<()> {
  let runspace = Runspace::open()?;
  let writer = Arc::clone(&runspace);
  on_fresh_thread(move || writer.eval::<()>("scope.static.set('everywhere')"))?;

  let reader = Arc::clone(&runspace);
  let seen = on_fresh_thread(move || reader.eval::<String>("return scope.static.get()"))?;
  assert_eq!(seen, "everywhere");

  STATIC_STORE.reset();
  Ok(())
}

#[test]
#[serial]
fn reset_all_is_checked_store_by_store() -> LuaResult<()> {
  on_fresh_thread(|| -> LuaResult<()> {
    let runspace = Runspace::open()?;
    STATIC_STORE.set("a".to_string());
    RUNSPACE_STORE.set(&runspace, "b".to_string());
    THREAD_LOCAL_STORE.set("c".to_string());
    assert_eq!(read_all(&runspace)?, ("a".into(), "b".into(), "c".into()));

    stores::reset_all(&runspace);

    let (s, r, t) = read_all(&runspace)?;
    assert_eq!(s, STATIC_STORE_DEFAULT);
    assert_eq!(r, RUNSPACE_STORE_DEFAULT);
    assert_eq!(t, THREAD_LOCAL_STORE_DEFAULT);
    Ok(())
  })
}

#[test]
fn fresh_thread_sees_thread_default() -> LuaResult<()> {
  let runspace = Runspace::open()?;
  let remote = Arc::clone(&runspace);
  let seen = on_fresh_thread(move || remote.eval::<String>("return scope.thread.get()"))?;
  assert_eq!(seen, THREAD_LOCAL_STORE_DEFAULT);
  Ok(())
}

#[test]
fn host_and_script_share_the_runspace_entry() -> LuaResult<()> {
  let runspace = Runspace::open()?;

  RUNSPACE_STORE.set(&runspace, "from-host".to_string());
  let seen: String = runspace.eval("return scope.runspace.get()")?;
  assert_eq!(seen, "from-host");

  runspace.eval::<()>("scope.runspace.set('from-script')")?;
  assert_eq!(RUNSPACE_STORE.get_for(&runspace).unwrap(), "from-script");
  Ok(())
}
