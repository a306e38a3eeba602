#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LockError {
    /// A thread panicked while holding the primitive behind a lock.
    #[error("lock poisoned: {0}")]
    Poisoned(String),
    #[error("lock release failed: {0}")]
    ReleaseFailed(String),
}
