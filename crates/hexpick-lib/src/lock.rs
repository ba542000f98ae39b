//! Cross-process locks keyed by settings file.
//!
//! Every `hexpick` invocation is its own process, so in-memory guards can't
//! serialize writers. Two named locks per settings file are used instead:
//!
//! - the **history lock** is held around load → mutate → save, so concurrent
//!   writers never overwrite each other's changes;
//! - the **pick lock** is held while the pick tool runs, so a second pick
//!   fails fast instead of opening another picker session.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::time::{Duration, Instant};

use single_instance::SingleInstance;

/// How long a writer waits for the history lock.
pub const LOCK_TIMEOUT: Duration = Duration::from_secs(10);

/// Poll interval while waiting for a lock.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// A held named lock. Released on drop.
pub struct NamedLock {
    name: String,
    _instance: SingleInstance,
}

impl std::fmt::Debug for NamedLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedLock").field("name", &self.name).finish()
    }
}

impl NamedLock {
    /// Take the lock if nobody holds it. `Ok(None)` if it is taken.
    pub fn try_acquire(name: &str) -> crate::error::Result<Option<Self>> {
        let instance = SingleInstance::new(name).map_err(|e| {
            crate::HexpickError::Config(format!("Failed to create lock {name}: {e}"))
        })?;
        if !instance.is_single() {
            return Ok(None);
        }
        Ok(Some(NamedLock {
            name: name.to_string(),
            _instance: instance,
        }))
    }

    /// Wait up to `timeout` for the lock.
    pub fn acquire(name: &str, timeout: Duration) -> crate::error::Result<Self> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(lock) = Self::try_acquire(name)? {
                return Ok(lock);
            }
            if Instant::now() >= deadline {
                return Err(crate::HexpickError::Busy(format!(
                    "settings are locked by another hexpick process (waited {timeout:?})"
                )));
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Lock held around every read-modify-write of the settings at `path`.
pub fn acquire_history_lock(path: &Path, timeout: Duration) -> crate::error::Result<NamedLock> {
    let lock = NamedLock::acquire(&lock_name("history", path), timeout)?;
    log::debug!("acquired {}", lock.name());
    Ok(lock)
}

/// Single-flight lock for pick sessions against the settings at `path`.
pub fn acquire_pick_lock(path: &Path) -> crate::error::Result<NamedLock> {
    match NamedLock::try_acquire(&lock_name("pick", path))? {
        Some(lock) => Ok(lock),
        None => Err(crate::HexpickError::Busy(
            "a pick is already in progress".into(),
        )),
    }
}

/// Short, filesystem- and socket-safe lock name for `path`.
fn lock_name(kind: &str, path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut hasher = DefaultHasher::new();
    absolute.hash(&mut hasher);
    format!("hexpick-{kind}-{:016x}", hasher.finish())
}
