//! Container-scoped store.
//!
//! Associates a lazily created value with the *identity* of an externally
//! owned container (`Arc<C>`) without keeping that container alive.
//!
//! # Identity
//!
//! Entries are keyed by the address of the container's `Arc` allocation and
//! remember the container through a `Weak<C>`. The weak reference never keeps
//! the container's value alive, but it does pin the allocation itself, so the
//! address cannot be handed to a new container while the entry exists. A new
//! container therefore never sees a stale entry of a dropped one.
//!
//! # Initialization
//!
//! First access runs the factory with no lock held. Racing first accesses for
//! the same container may each run the factory, but only the first result to
//! be published is kept and every caller observes that one value. A factory
//! error publishes nothing and the next access starts over.
//!
//! # Reclamation
//!
//! Entries whose container has been dropped are swept every
//! [`StoreConfig::sweep_interval`] inserts, or on demand with
//! [`ContextScopedStore::purge`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use tracing::{debug, trace};

use super::{BoxError, StoreError};
use crate::config::StoreConfig;

/// Resolves the container a caller is currently running in.
///
/// Implemented by the host; the store never discovers containers on its own.
pub trait ContainerResolver<C: ?Sized> {
  fn current_container(&self) -> Option<Arc<C>>;
}

type Factory<T> = Box<dyn Fn() -> Result<T, BoxError> + Send + Sync>;

struct Slot<C: ?Sized, T> {
  container: Weak<C>,
  value: T,
}

impl<C: ?Sized, T> Slot<C, T> {
  fn new(container: &Arc<C>, value: T) -> Self {
    Self {
      container: Arc::downgrade(container),
      value,
    }
  }

  fn is_live(&self) -> bool {
    self.container.strong_count() > 0
  }
}

/// One value per live container.
pub struct ContextScopedStore<C: ?Sized, T> {
  slots: RwLock<HashMap<usize, Slot<C, T>>>,
  factory: Factory<T>,
  sweep_interval: usize,
  inserts_since_sweep: AtomicUsize,
}

fn identity<C: ?Sized>(container: &Arc<C>) -> usize {
  Arc::as_ptr(container) as *const () as usize
}

impl<C: ?Sized, T: Clone> ContextScopedStore<C, T> {
  /// Create a store whose entries start as `factory()`.
  pub fn new<F>(factory: F) -> Self
  where
    F: Fn() -> T + Send + Sync + 'static,
  {
    Self::with_config(StoreConfig::default(), move || Ok(factory()))
  }

  /// Create a store with a fallible factory and explicit tuning.
  pub fn with_config<F>(config: StoreConfig, factory: F) -> Self
  where
    F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
  {
    Self {
      slots: RwLock::new(HashMap::new()),
      factory: Box::new(factory),
      sweep_interval: config.sweep_interval.max(1),
      inserts_since_sweep: AtomicUsize::new(0),
    }
  }

  /// The entry for `container`, created with the store's factory if absent.
  pub fn get_for(&self, container: &Arc<C>) -> Result<T, StoreError> {
    self
      .get_or_init(container, || (self.factory)())
      .map_err(StoreError::Factory)
  }

  /// The entry for the container the host reports as current.
  pub fn get_current<R>(&self, resolver: &R) -> Result<T, StoreError>
  where
    R: ContainerResolver<C> + ?Sized,
  {
    let container = resolver.current_container().ok_or(StoreError::NoCurrentContainer)?;
    self.get_for(&container)
  }

  /// The entry for `container`, created with `factory` if absent.
  ///
  /// `factory` may run even if another caller publishes first; its result is
  /// then dropped and the published value returned instead.
  pub fn get_or_init<F, E>(&self, container: &Arc<C>, factory: F) -> Result<T, E>
  where
    F: FnOnce() -> Result<T, E>,
  {
    let key = identity(container);
    if let Some(slot) = self.read().get(&key) {
      return Ok(slot.value.clone());
    }

    let value = factory()?;

    let mut slots = self.write();
    // `container` is alive, so an entry under its key can only be its own.
    if let Some(slot) = slots.get(&key) {
      trace!(key, "discarding duplicate context entry");
      return Ok(slot.value.clone());
    }
    slots.insert(key, Slot::new(container, value.clone()));
    debug!(key, "initialized context entry");
    self.note_insert(&mut slots);

    Ok(value)
  }

  /// Overwrite the entry for `container`, creating it without the factory.
  pub fn set(&self, container: &Arc<C>, value: T) {
    let mut slots = self.write();
    let previous = slots.insert(identity(container), Slot::new(container, value));
    if previous.is_none() {
      self.note_insert(&mut slots);
    }
  }

  /// Drop the entry for `container`; the next read recomputes it.
  ///
  /// Returns whether an entry existed.
  pub fn reset(&self, container: &Arc<C>) -> bool {
    self.write().remove(&identity(container)).is_some()
  }

  /// Drop every entry whose container no longer exists.
  ///
  /// Returns the number of entries removed.
  pub fn purge(&self) -> usize {
    let mut slots = self.write();
    self.inserts_since_sweep.store(0, Ordering::Relaxed);
    sweep(&mut slots)
  }

  /// Number of entries whose container is still alive.
  pub fn len(&self) -> usize {
    self.read().values().filter(|slot| slot.is_live()).count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn note_insert(&self, slots: &mut HashMap<usize, Slot<C, T>>) {
    let inserts = self.inserts_since_sweep.fetch_add(1, Ordering::Relaxed) + 1;
    if inserts >= self.sweep_interval {
      self.inserts_since_sweep.store(0, Ordering::Relaxed);
      sweep(slots);
    }
  }

  fn read(&self) -> RwLockReadGuard<'_, HashMap<usize, Slot<C, T>>> {
    // Slots are inserted and removed whole, so a poisoned map is still consistent.
    self.slots.read().unwrap_or_else(PoisonError::into_inner)
  }

  fn write(&self) -> RwLockWriteGuard<'_, HashMap<usize, Slot<C, T>>> {
    self.slots.write().unwrap_or_else(PoisonError::into_inner)
  }
}

fn sweep<C: ?Sized, T>(slots: &mut HashMap<usize, Slot<C, T>>) -> usize {
  let before = slots.len();
  slots.retain(|_, slot| slot.is_live());
  let removed = before - slots.len();
  if removed > 0 {
    debug!(removed, remaining = slots.len(), "purged dead context entries");
  }
  removed
}
