//! Scoped value stores.
//!
//! # Submodules
//!
//! - [`global`] - One value shared by the whole process
//! - [`context`] - One value per live container, keyed by identity
//! - [`thread`] - One value per OS thread

pub mod context;
pub mod global;
pub mod thread;

use thiserror::Error;

pub use context::{ContainerResolver, ContextScopedStore};
pub use global::GlobalStore;
pub use thread::ThreadScopedStore;

/// Boxed error returned by context store factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the scoped stores.
#[derive(Debug, Error)]
pub enum StoreError {
  /// The factory failed while creating the first entry for a container.
  /// Nothing was published; the next access runs the factory again.
  #[error("failed to initialize context entry: {0}")]
  Factory(#[source] BoxError),

  /// The host had no active container to resolve.
  #[error("no current container is active")]
  NoCurrentContainer,
}
