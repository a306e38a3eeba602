use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use super::{Lock, LockError, LockManager};

/// Blocking lock for threads of one process.
#[derive(Default)]
pub struct InMemoryLock {
    held: Mutex<bool>,
    released: Condvar,
}

impl InMemoryLock {
    pub fn new() -> Self {
        Self::default()
    }

    fn held(&self) -> Result<MutexGuard<'_, bool>, LockError> {
        self.held
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))
    }
}

impl Lock for InMemoryLock {
    fn lock(&self) -> Result<(), LockError> {
        let mut held = self
            .released
            .wait_while(self.held()?, |held| *held)
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        *held = true;
        Ok(())
    }

    fn try_lock(&self) -> Result<bool, LockError> {
        let mut held = self.held()?;
        let acquired = !*held;
        *held = true;
        Ok(acquired)
    }

    fn unlock(&self) -> Result<(), LockError> {
        let mut held = self.held()?;
        if std::mem::replace(&mut *held, false) {
            self.released.notify_one();
        }
        Ok(())
    }
}

/// Creates an [`InMemoryLock`] the first time a key is asked for and keeps
/// it for the life of the manager.
#[derive(Default)]
pub struct InMemoryLockManager {
    locks: Mutex<HashMap<String, Arc<InMemoryLock>>>,
}

impl InMemoryLockManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LockManager for InMemoryLockManager {
    type Lock = InMemoryLock;

    fn get_lock(&self, key: &str) -> Result<Arc<InMemoryLock>, LockError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        Ok(Arc::clone(locks.entry(key.to_string()).or_default()))
    }
}
