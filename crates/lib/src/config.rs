//! Store configuration.
//!
//! Configuration is read from the environment only:
//!
//! | Variable                  | Meaning                                         |
//! |---------------------------|-------------------------------------------------|
//! | `RUNSCOPE_SWEEP_INTERVAL` | inserts between sweeps of dead runspace entries |

use serde::Serialize;
use thiserror::Error;

use crate::consts::{DEFAULT_SWEEP_INTERVAL, SWEEP_INTERVAL_ENV};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("RUNSCOPE_SWEEP_INTERVAL must be a positive integer, got '{0}'")]
  InvalidSweepInterval(String),
}

/// Tuning for context-scoped stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreConfig {
  /// Number of inserts after which entries for dropped containers are swept.
  pub sweep_interval: usize,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      sweep_interval: DEFAULT_SWEEP_INTERVAL,
    }
  }
}

impl StoreConfig {
  /// Build the configuration from the environment, falling back to defaults
  /// for unset variables.
  pub fn from_env() -> Result<Self, ConfigError> {
    let mut config = Self::default();

    if let Ok(raw) = std::env::var(SWEEP_INTERVAL_ENV) {
      config.sweep_interval = match raw.trim().parse::<usize>() {
        Ok(interval) if interval > 0 => interval,
        _ => return Err(ConfigError::InvalidSweepInterval(raw)),
      };
    }

    Ok(config)
  }
}
