//! Process-wide store.

use std::sync::{PoisonError, RwLock};

/// A single value shared by every thread in the process.
///
/// Concurrent writers race with last-write-wins semantics. The default is
/// produced lazily, so a store can be declared as a `static`:
///
/// ```
/// use runscope_lib::store::GlobalStore;
///
/// static GREETING: GlobalStore<String> = GlobalStore::new(|| "hello".to_string());
///
/// assert_eq!(GREETING.get(), "hello");
/// GREETING.set("bye".to_string());
/// assert_eq!(GREETING.get(), "bye");
/// ```
pub struct GlobalStore<T> {
  value: RwLock<Option<T>>,
  default: fn() -> T,
}

impl<T: Clone> GlobalStore<T> {
  pub const fn new(default: fn() -> T) -> Self {
    Self {
      value: RwLock::new(None),
      default,
    }
  }

  /// Current value, or the default if nothing has been set since the last reset.
  pub fn get(&self) -> T {
    // A poisoned cell still holds a complete value; writers never leave it half set.
    let value = self.value.read().unwrap_or_else(PoisonError::into_inner);
    match value.as_ref() {
      Some(value) => value.clone(),
      None => (self.default)(),
    }
  }

  pub fn set(&self, value: T) {
    *self.value.write().unwrap_or_else(PoisonError::into_inner) = Some(value);
  }

  /// Restore the default value.
  pub fn reset(&self) {
    *self.value.write().unwrap_or_else(PoisonError::into_inner) = None;
  }

  /// Whether the store currently reports its default.
  pub fn is_default(&self) -> bool {
    self.value.read().unwrap_or_else(PoisonError::into_inner).is_none()
  }
}
