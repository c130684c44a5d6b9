pub const APP_NAME: &str = "runscope";

/// Default value of the process-wide store.
pub const STATIC_STORE_DEFAULT: &str = "StaticStoreDefault";

/// Default value of the runspace-scoped store.
pub const RUNSPACE_STORE_DEFAULT: &str = "RunspaceStoreDefault";

/// Default value of the thread-scoped store.
pub const THREAD_LOCAL_STORE_DEFAULT: &str = "ThreadLocalStoreDefault";

/// Environment variable overriding how often dead runspace entries are swept.
pub const SWEEP_INTERVAL_ENV: &str = "RUNSCOPE_SWEEP_INTERVAL";

/// Inserts between automatic sweeps when no override is configured.
pub const DEFAULT_SWEEP_INTERVAL: usize = 64;
