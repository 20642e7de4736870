use crate::core::slock::SLock;
use crate::core::waiters::{Cancelled, WaiterId, WaiterQueue, Wakeups};
use crate::sync::error::LockError;
use crate::sync::guard::LockGuard;
use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Lock word and wait sets, guarded by the state lock.
///
/// Invariant: `waiters` or `interrupts` non-empty implies `locked`.
struct LockState {
    locked: bool,
    waiters: WaiterQueue<(), Result<(), LockError>>,
    /// At most one entry.
    interrupts: WaiterQueue<(), ()>,
}

impl LockState {
    /// Passes ownership on, or unlocks.
    ///
    /// A pending interrupt wins over every queued acquirer; those are failed
    /// and the interrupt caller is resolved already owning the lock.
    fn release(&mut self, wakeups: &mut Wakeups) {
        debug_assert!(self.locked, "release of an unlocked lock");

        if let Some(interrupt) = self.interrupts.pop() {
            let mut failed = 0usize;
            for parked in self.waiters.drain() {
                self.waiters
                    .resolve(parked.ticket, Err(LockError::Interrupted), wakeups);
                failed += 1;
            }
            self.interrupts.resolve(interrupt.ticket, (), wakeups);
            tracing::debug!(failed, "lock taken over by interrupt");
            return;
        }

        match self.waiters.pop() {
            Some(parked) => self.waiters.resolve(parked.ticket, Ok(()), wakeups),
            None => self.locked = false,
        }
    }
}

/// What a parked lock future is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Request {
    Acquire,
    Interrupt,
}

/// State machine shared by [`Lock`](super::Lock) and
/// [`InterruptibleLock`](super::InterruptibleLock).
///
/// A plain lock simply never issues [`Request::Interrupt`].
pub(crate) struct RawLock {
    state: SLock<LockState>,
}

impl RawLock {
    pub(crate) fn new() -> Self {
        Self {
            state: SLock::new(LockState {
                locked: false,
                waiters: WaiterQueue::new(),
                interrupts: WaiterQueue::new(),
            }),
        }
    }

    /// Takes the lock only if it is free right now.
    pub(crate) fn try_lock(&self) -> bool {
        let mut state = self.state.lock();
        if state.locked {
            false
        } else {
            state.locked = true;
            true
        }
    }

    pub(crate) fn is_locked(&self) -> bool {
        self.state.lock().locked
    }

    /// Number of parked acquirers (interrupt excluded).
    pub(crate) fn queued(&self) -> usize {
        self.state.lock().waiters.len()
    }

    pub(crate) fn has_pending_interrupt(&self) -> bool {
        !self.state.lock().interrupts.is_empty()
    }

    fn poll(
        &self,
        request: Request,
        waiting: &mut Option<WaiterId>,
        cx: &mut Context<'_>,
    ) -> Poll<Result<(), LockError>> {
        let mut state = self.state.lock();

        let poll = match (*waiting, request) {
            (Some(id), Request::Acquire) => state.waiters.poll_resolved(id, cx.waker()),
            (Some(id), Request::Interrupt) => {
                state.interrupts.poll_resolved(id, cx.waker()).map(Ok)
            }
            (None, _) if !state.locked => {
                state.locked = true;
                Poll::Ready(Ok(()))
            }
            (None, Request::Acquire) => {
                *waiting = Some(state.waiters.push((), cx.waker()));
                Poll::Pending
            }
            (None, Request::Interrupt) if !state.interrupts.is_empty() => {
                Poll::Ready(Err(LockError::InterruptPending))
            }
            (None, Request::Interrupt) => {
                *waiting = Some(state.interrupts.push((), cx.waker()));
                Poll::Pending
            }
        };

        if poll.is_ready() {
            *waiting = None;
        }
        poll
    }

    /// Called by a guard, once.
    pub(crate) fn release(&self) {
        let mut wakeups = Wakeups::new();
        self.state.lock().release(&mut wakeups);
        wakeups.wake();
    }

    /// Unlinks a future dropped while parked. If ownership had already been
    /// handed to it, the ownership moves on as if it had been released.
    fn cancel(&self, request: Request, id: WaiterId) {
        let mut wakeups = Wakeups::new();
        let mut state = self.state.lock();

        let owned = match request {
            Request::Acquire => matches!(state.waiters.cancel(id), Cancelled::Resolved(Ok(()))),
            Request::Interrupt => matches!(state.interrupts.cancel(id), Cancelled::Resolved(())),
        };
        if owned {
            state.release(&mut wakeups);
        }

        drop(state);
        wakeups.wake();
    }
}

impl fmt::Debug for RawLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("RawLock")
            .field("locked", &state.locked)
            .field("waiters", &state.waiters.len())
            .field("interrupt_pending", &!state.interrupts.is_empty())
            .finish()
    }
}

/// One acquire or interrupt attempt; the body of every lock future.
///
/// Dropping it while parked withdraws the request.
pub(crate) struct Attempt<'a> {
    raw: &'a Arc<RawLock>,
    request: Request,
    waiting: Option<WaiterId>,
    done: bool,
}

impl<'a> Attempt<'a> {
    pub(crate) fn new(raw: &'a Arc<RawLock>, request: Request) -> Self {
        Self {
            raw,
            request,
            waiting: None,
            done: false,
        }
    }

    pub(crate) fn poll(&mut self, cx: &mut Context<'_>) -> Poll<Result<LockGuard, LockError>> {
        if self.done {
            panic!("lock future polled after completion");
        }

        let poll = self
            .raw
            .poll(self.request, &mut self.waiting, cx)
            .map_ok(|()| LockGuard::new(Arc::clone(self.raw)));
        self.done = poll.is_ready();
        poll
    }

    pub(crate) fn is_parked(&self) -> bool {
        self.waiting.is_some()
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        if let Some(id) = self.waiting.take() {
            self.raw.cancel(self.request, id);
        }
    }
}
