//! runscope-lib: Scoped state for host-embedded extensions
//!
//! This crate provides three ways to scope a value exposed to scripts:
//! - `GlobalStore`: one value for the whole process
//! - `ContextScopedStore`: one value per live container (a `Runspace`),
//!   held without keeping the container alive
//! - `ThreadScopedStore`: one value per OS thread
//!
//! The stores are exposed to Lua scripts through the `scope` global table
//! registered in every [`runspace::Runspace`].

pub mod config;
pub mod consts;
mod lua;
pub mod runspace;
pub mod store;
pub mod stores;
