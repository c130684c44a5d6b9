use std::path::Path;

use mlua::prelude::*;

use crate::lua::globals;

/// Create a new Lua runtime environment with standard settings.
/// Registers the `scope` global table.
/// The `scope.runspace` functions only work once [`Runspace::open`] has bound
/// the VM to its runspace.
///
/// [`Runspace::open`]: crate::runspace::Runspace::open
pub(crate) fn create_runtime() -> LuaResult<Lua> {
  let lua = Lua::new();
  let package_path = lua.globals().get::<LuaTable>("package")?.get::<String>("path")?;
  let new_package_path = format!("./lua/?.lua;./lua/?/init.lua;{}", package_path);
  lua
    .globals()
    .get::<LuaTable>("package")?
    .set("path", new_package_path)?;

  globals::register_globals(&lua)?;

  Ok(lua)
}

/// Load and execute a Lua file at the given path.
/// Sets the `scope.dir` global to the directory of the loaded file.
/// Returns the result of the file execution.
pub(crate) fn load_file(lua: &Lua, path: &Path) -> LuaResult<LuaValue> {
  let canonical_path = path
    .canonicalize()
    .map_err(|e| LuaError::external(format!("cannot canonicalize '{}': {}", path.display(), e)))?;
  let content = std::fs::read_to_string(&canonical_path)
    .map_err(|e| LuaError::external(format!("cannot read '{}': {}", canonical_path.display(), e)))?;

  let scope = lua.globals().get::<LuaTable>("scope")?;
  scope.set(
    "dir",
    canonical_path
      .parent()
      .unwrap_or(Path::new(""))
      .to_string_lossy()
      .to_string(),
  )?;

  lua
    .load(&content)
    .set_name(format!("@{}", canonical_path.display()))
    .eval::<LuaValue>()
}
