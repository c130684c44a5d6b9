//! Per-thread store.

use std::cell::RefCell;
use std::thread::LocalKey;

/// One value per OS thread, defaulted on first read.
///
/// The slot itself is declared with `thread_local!` so that each thread owns
/// its value outright and drops it when the thread exits:
///
/// ```
/// use std::cell::RefCell;
/// use runscope_lib::store::ThreadScopedStore;
///
/// thread_local! {
///   static SLOT: RefCell<Option<u32>> = const { RefCell::new(None) };
/// }
/// static COUNTER: ThreadScopedStore<u32> = ThreadScopedStore::new(&SLOT, || 0);
///
/// COUNTER.set(7);
/// assert_eq!(COUNTER.get(), 7);
/// assert_eq!(std::thread::spawn(|| COUNTER.get()).join().unwrap(), 0);
/// ```
pub struct ThreadScopedStore<T: 'static> {
  slot: &'static LocalKey<RefCell<Option<T>>>,
  default: fn() -> T,
}

impl<T: Clone + 'static> ThreadScopedStore<T> {
  pub const fn new(slot: &'static LocalKey<RefCell<Option<T>>>, default: fn() -> T) -> Self {
    Self { slot, default }
  }

  /// The calling thread's value, materializing the default on first access.
  pub fn get(&self) -> T {
    self
      .slot
      .with(|cell| cell.borrow_mut().get_or_insert_with(self.default).clone())
  }

  pub fn set(&self, value: T) {
    self.slot.with(|cell| *cell.borrow_mut() = Some(value));
  }

  /// Restore the default for the calling thread only.
  pub fn reset(&self) {
    self.slot.with(|cell| *cell.borrow_mut() = Some((self.default)()));
  }

  /// Whether the calling thread has materialized a value yet.
  pub fn is_initialized(&self) -> bool {
    self.slot.with(|cell| cell.borrow().is_some())
  }
}
