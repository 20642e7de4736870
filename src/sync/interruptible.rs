use crate::core::thread::block_on;
use crate::sync::error::LockError;
use crate::sync::guard::LockGuard;
use crate::sync::raw::{Attempt, RawLock, Request};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// A [`Lock`](super::Lock) with one priority take-over slot.
///
/// [`interrupt`](InterruptibleLock::interrupt) claims the next release ahead
/// of every queued acquirer. When that release happens, the queued
/// acquirers fail with [`LockError::Interrupted`] instead of waiting behind
/// the interrupt, and the interrupt caller receives the guard.
///
/// Only one interrupt may wait at a time; a second one fails immediately
/// with [`LockError::InterruptPending`].
#[derive(Clone)]
pub struct InterruptibleLock {
    raw: Arc<RawLock>,
}

impl InterruptibleLock {
    pub fn new() -> Self {
        Self {
            raw: Arc::new(RawLock::new()),
        }
    }

    /// Waits for ownership in FIFO order, unless an interrupt takes over first.
    pub fn acquire(&self) -> InterruptibleAcquiring<'_> {
        InterruptibleAcquiring {
            attempt: Attempt::new(&self.raw, Request::Acquire),
        }
    }

    /// Claims the lock ahead of all queued acquirers.
    ///
    /// Completes at once if the lock is free. Otherwise waits for the current
    /// holder to release.
    pub fn interrupt(&self) -> Interrupting<'_> {
        Interrupting {
            attempt: Attempt::new(&self.raw, Request::Interrupt),
        }
    }

    pub fn acquire_blocking(&self) -> Result<LockGuard, LockError> {
        block_on(self.acquire())
    }

    pub fn interrupt_blocking(&self) -> Result<LockGuard, LockError> {
        block_on(self.interrupt())
    }

    pub fn try_acquire(&self) -> Option<LockGuard> {
        self.raw
            .try_lock()
            .then(|| LockGuard::new(Arc::clone(&self.raw)))
    }

    pub fn is_locked(&self) -> bool {
        self.raw.is_locked()
    }

    pub fn queued(&self) -> usize {
        self.raw.queued()
    }

    pub fn is_interrupt_pending(&self) -> bool {
        self.raw.has_pending_interrupt()
    }
}

impl Default for InterruptibleLock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InterruptibleLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InterruptibleLock").field(&self.raw).finish()
    }
}

/// Future returned by [`InterruptibleLock::acquire`].
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct InterruptibleAcquiring<'a> {
    attempt: Attempt<'a>,
}

impl Future for InterruptibleAcquiring<'_> {
    type Output = Result<LockGuard, LockError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.get_mut().attempt.poll(cx)
    }
}

impl fmt::Debug for InterruptibleAcquiring<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterruptibleAcquiring")
            .field("parked", &self.attempt.is_parked())
            .finish()
    }
}

/// Future returned by [`InterruptibleLock::interrupt`].
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Interrupting<'a> {
    attempt: Attempt<'a>,
}

impl Future for Interrupting<'_> {
    type Output = Result<LockGuard, LockError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.get_mut().attempt.poll(cx)
    }
}

impl fmt::Debug for Interrupting<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interrupting")
            .field("parked", &self.attempt.is_parked())
            .finish()
    }
}
