//! Per-document write locks.
//!
//! Rating mutations assume a single writer per rateable. When several
//! threads rate the same stored document, each mutation runs while holding
//! the lock for that document's key.

mod error;
mod guard;
mod in_memory;

use std::sync::Arc;

use tracing::debug;

pub use error::LockError;
pub use guard::LockGuard;
pub use in_memory::{InMemoryLock, InMemoryLockManager};

/// A mutual-exclusion primitive that is not tied to a scope.
///
/// `unlock` may run on a different call path than `lock`, which is what
/// lets a lock live in a shared table keyed by document.
pub trait Lock: Send + Sync {
    /// Block until held.
    fn lock(&self) -> Result<(), LockError>;

    /// `Ok(false)` when someone else holds it.
    fn try_lock(&self) -> Result<bool, LockError>;

    /// Releasing a lock that is not held is not an error.
    fn unlock(&self) -> Result<(), LockError>;
}

/// Hands out one lock per key.
pub trait LockManager: Send + Sync {
    type Lock: Lock;

    /// Every call with the same key must yield the same lock.
    fn get_lock(&self, key: &str) -> Result<Arc<Self::Lock>, LockError>;

    /// Block until `key` is held. The guard unlocks on drop.
    fn acquire(&self, key: &str) -> Result<LockGuard<Self::Lock>, LockError> {
        let lock = self.get_lock(key)?;
        lock.lock()?;
        debug!(key, "lock acquired");
        Ok(LockGuard::new(key, lock))
    }
}
