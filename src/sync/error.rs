use thiserror::Error;

/// Failure of an [`InterruptibleLock`](super::InterruptibleLock) operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum LockError {
    /// A queued acquire was failed because an interrupt took the lock over.
    #[error("failed to acquire lock due to interrupt")]
    Interrupted,
    /// `interrupt` was called while another interrupt was already waiting.
    #[error("an interrupt is already pending on this lock")]
    InterruptPending,
}
