//! RAII environment variable guard for test isolation.
//!
//! Mutating the process environment races across test threads, so every
//! mutation happens under a global lock and the original value is restored
//! on drop, panic included. Tests touching the same variable must also be
//! marked `#[serial(servecfg_env)]` — the lock only protects the individual
//! set/restore operations, not whole test bodies.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn acquire_env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Sets or removes an environment variable for the guard's lifetime.
pub struct EnvGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvGuard {
    /// Set `key` to `value`, remembering the prior value.
    pub fn set(key: impl Into<String>, value: impl AsRef<str>) -> Self {
        let _lock = acquire_env_lock();
        let key = key.into();
        let original = env::var_os(&key);
        // Safe under the global lock: no other guard mutates the
        // environment concurrently.
        unsafe { env::set_var(&key, value.as_ref()) };
        Self { key, original }
    }

    /// Remove `key` for the guard's lifetime.
    pub fn unset(key: impl Into<String>) -> Self {
        let _lock = acquire_env_lock();
        let key = key.into();
        let original = env::var_os(&key);
        unsafe { env::remove_var(&key) };
        Self { key, original }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        let _lock = acquire_env_lock();
        match self.original.take() {
            Some(value) => unsafe { env::set_var(&self.key, value) },
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}
