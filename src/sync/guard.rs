use crate::sync::raw::RawLock;
use std::fmt;
use std::sync::Arc;

/// Proof of ownership of a [`Lock`](super::Lock) or
/// [`InterruptibleLock`](super::InterruptibleLock).
///
/// The lock is released by [`release`](LockGuard::release) or on drop,
/// whichever comes first. Ownership goes straight to the oldest waiter
/// (or to a pending interrupt), so nobody can slip in between.
#[must_use = "if unused the lock is released immediately"]
pub struct LockGuard {
    raw: Arc<RawLock>,
    released: bool,
}

impl LockGuard {
    pub(crate) fn new(raw: Arc<RawLock>) -> Self {
        Self {
            raw,
            released: false,
        }
    }

    /// Releases the lock. Calling it again is a no-op.
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.raw.release();
        }
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockGuard")
            .field("released", &self.released)
            .finish()
    }
}
