//! Lua runtime and the `scope` facade.
//!
//! # Submodules
//!
//! - [`globals`] - The `scope` global table exposing the stores to scripts
//! - [`runtime`] - Low-level Lua VM setup and file loading

pub mod globals;
pub mod runtime;
