use crate::core::thread::block_on;
use crate::sync::guard::LockGuard;
use crate::sync::raw::{Attempt, RawLock, Request};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};

/// Fair mutual-exclusion lock.
///
/// Acquirers are served strictly in call order: a release hands ownership
/// directly to the oldest waiter, and a later `acquire` can never overtake
/// it. The lock guards no data of its own; holding a [`LockGuard`] is what
/// grants access to whatever it protects.
///
/// Cloning yields another handle to the same lock.
#[derive(Clone)]
pub struct Lock {
    raw: Arc<RawLock>,
}

impl Lock {
    pub fn new() -> Self {
        Self {
            raw: Arc::new(RawLock::new()),
        }
    }

    /// Waits for ownership.
    ///
    /// Dropping the future before it completes gives up the place in line.
    pub fn acquire(&self) -> Acquiring<'_> {
        Acquiring {
            attempt: Attempt::new(&self.raw, Request::Acquire),
        }
    }

    /// Like [`acquire`](Lock::acquire), parking the current thread.
    pub fn acquire_blocking(&self) -> LockGuard {
        block_on(self.acquire())
    }

    /// Takes the lock if nobody holds it.
    pub fn try_acquire(&self) -> Option<LockGuard> {
        self.raw
            .try_lock()
            .then(|| LockGuard::new(Arc::clone(&self.raw)))
    }

    pub fn is_locked(&self) -> bool {
        self.raw.is_locked()
    }

    /// Number of parked acquirers.
    pub fn queued(&self) -> usize {
        self.raw.queued()
    }
}

impl Default for Lock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Lock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lock").field(&self.raw).finish()
    }
}

/// Future returned by [`Lock::acquire`].
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Acquiring<'a> {
    attempt: Attempt<'a>,
}

impl Future for Acquiring<'_> {
    type Output = LockGuard;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<LockGuard> {
        match ready!(self.get_mut().attempt.poll(cx)) {
            Ok(guard) => Poll::Ready(guard),
            Err(e) => unreachable!("lock without interrupts failed: {e}"),
        }
    }
}

impl fmt::Debug for Acquiring<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Acquiring")
            .field("parked", &self.attempt.is_parked())
            .finish()
    }
}
