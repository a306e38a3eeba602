use std::sync::Arc;

use tracing::{debug, warn};

use super::{Lock, LockError};

/// Holds a lock until dropped or explicitly released.
pub struct LockGuard<L: Lock> {
    key: String,
    lock: Option<Arc<L>>,
}

impl<L: Lock> LockGuard<L> {
    pub(crate) fn new(key: &str, lock: Arc<L>) -> Self {
        Self {
            key: key.to_string(),
            lock: Some(lock),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Release the lock now, reporting any failure.
    pub fn release(mut self) -> Result<(), LockError> {
        match self.lock.take() {
            Some(lock) => {
                lock.unlock()?;
                debug!(key = %self.key, "lock released");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl<L: Lock> Drop for LockGuard<L> {
    fn drop(&mut self) {
        if let Some(lock) = self.lock.take() {
            if let Err(err) = lock.unlock() {
                warn!(key = %self.key, error = %err, "failed to release lock");
            }
        }
    }
}
