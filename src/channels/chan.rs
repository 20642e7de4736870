use crate::channels::capacity::Capacity;
use crate::channels::error::{RecvError, SendError, TryRecvError, TrySendError};
use crate::core::slock::SLock;
use crate::core::waiters::{Cancelled, Parked, WaiterId, WaiterQueue, Wakeups};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

/// Everything guarded by the channel's lock.
///
/// `senders` and `receivers` are never both non-empty: a sender only parks
/// when no receiver is parked, and the other way round.
struct State<T> {
    buffer: VecDeque<T>,
    senders: WaiterQueue<T, Result<(), SendError<T>>>,
    receivers: WaiterQueue<(), Result<T, RecvError>>,
    closed: bool,
}

impl<T> State<T> {
    /// Non-parking half of a send: hand off, buffer, or refuse.
    fn offer(
        &mut self,
        value: T,
        capacity: Capacity,
        wakeups: &mut Wakeups,
    ) -> Result<(), TrySendError<T>> {
        if self.closed {
            return Err(TrySendError::Closed(value));
        }

        // A parked receiver implies an empty buffer, so skipping it keeps order.
        if let Some(parked) = self.receivers.pop() {
            self.receivers.resolve(parked.ticket, Ok(value), wakeups);
            return Ok(());
        }

        if capacity.has_room(self.buffer.len()) {
            self.buffer.push_back(value);
            Ok(())
        } else {
            Err(TrySendError::Full(value))
        }
    }

    /// Non-parking half of a receive.
    ///
    /// With `direct` set an empty buffer may still be served by a parked
    /// sender, which only happens at rendezvous. Probes leave it unset: a
    /// rendezvous item is never observable without a waiting receive.
    fn take(&mut self, direct: bool, wakeups: &mut Wakeups) -> Result<T, TryRecvError> {
        if let Some(value) = self.buffer.pop_front() {
            // The freed slot goes to the oldest parked sender, no re-check on its side.
            if let Some(Parked { ticket, payload }) = self.senders.pop() {
                self.buffer.push_back(payload);
                self.senders.resolve(ticket, Ok(()), wakeups);
            }
            return Ok(value);
        }

        if direct && let Some(Parked { ticket, payload }) = self.senders.pop() {
            self.senders.resolve(ticket, Ok(()), wakeups);
            return Ok(payload);
        }

        if self.closed {
            Err(TryRecvError::Closed)
        } else {
            Err(TryRecvError::Empty)
        }
    }

    fn close(&mut self, wakeups: &mut Wakeups) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;

        for parked in self.receivers.drain() {
            self.receivers.resolve(parked.ticket, Err(RecvError), wakeups);
        }
        let failed_receivers = wakeups.len();

        for Parked { ticket, payload } in self.senders.drain() {
            self.senders.resolve(ticket, Err(SendError(payload)), wakeups);
        }

        tracing::debug!(
            failed_receivers,
            failed_senders = wakeups.len() - failed_receivers,
            buffered = self.buffer.len(),
            "channel closed"
        );
        true
    }
}

/// Shared core behind a [`Sender`](super::Sender) / [`Receiver`](super::Receiver) pair.
pub(crate) struct Chan<T> {
    state: SLock<State<T>>,
    capacity: Capacity,
    senders: AtomicUsize,
    receivers: AtomicUsize,
}

impl<T> Chan<T> {
    /// Creates the core with one live handle on each side.
    pub(crate) fn new(capacity: Capacity) -> Self {
        let buffer = match capacity.limit() {
            Some(n) => VecDeque::with_capacity(n),
            None => VecDeque::new(),
        };

        Self {
            state: SLock::new(State {
                buffer,
                senders: WaiterQueue::new(),
                receivers: WaiterQueue::new(),
                closed: false,
            }),
            capacity,
            senders: AtomicUsize::new(1),
            receivers: AtomicUsize::new(1),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub(crate) fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        let mut wakeups = Wakeups::new();
        let result = self.state.lock().offer(value, self.capacity, &mut wakeups);
        wakeups.wake();
        result
    }

    pub(crate) fn try_recv(&self) -> Result<T, TryRecvError> {
        let mut wakeups = Wakeups::new();
        let result = self.state.lock().take(false, &mut wakeups);
        wakeups.wake();
        result
    }

    /// Drives a [`Sending`](super::Sending). `value` is taken on the first
    /// poll; `waiting` holds the registration while parked.
    pub(crate) fn poll_send(
        &self,
        value: &mut Option<T>,
        waiting: &mut Option<WaiterId>,
        cx: &mut Context<'_>,
    ) -> Poll<Result<(), SendError<T>>> {
        let mut wakeups = Wakeups::new();
        let mut state = self.state.lock();

        let poll = match *waiting {
            Some(id) => state.senders.poll_resolved(id, cx.waker()),
            None => {
                let Some(item) = value.take() else {
                    panic!("`Sending` polled after completion");
                };

                match state.offer(item, self.capacity, &mut wakeups) {
                    Ok(()) => Poll::Ready(Ok(())),
                    Err(TrySendError::Closed(item)) => Poll::Ready(Err(SendError(item))),
                    Err(TrySendError::Full(item)) => {
                        *waiting = Some(state.senders.push(item, cx.waker()));
                        Poll::Pending
                    }
                }
            }
        };

        drop(state);
        wakeups.wake();

        if poll.is_ready() {
            *waiting = None;
        }
        poll
    }

    /// Drives a [`Receiving`](super::Receiving).
    pub(crate) fn poll_recv(
        &self,
        waiting: &mut Option<WaiterId>,
        cx: &mut Context<'_>,
    ) -> Poll<Result<T, RecvError>> {
        let mut wakeups = Wakeups::new();
        let mut state = self.state.lock();

        let poll = match *waiting {
            Some(id) => state.receivers.poll_resolved(id, cx.waker()),
            None => match state.take(true, &mut wakeups) {
                Ok(value) => Poll::Ready(Ok(value)),
                Err(TryRecvError::Closed) => Poll::Ready(Err(RecvError)),
                Err(TryRecvError::Empty) => {
                    *waiting = Some(state.receivers.push((), cx.waker()));
                    Poll::Pending
                }
            },
        };

        drop(state);
        wakeups.wake();

        if poll.is_ready() {
            *waiting = None;
        }
        poll
    }

    /// Unlinks a sender whose future was dropped while parked.
    pub(crate) fn cancel_send(&self, id: WaiterId) {
        let cancelled = self.state.lock().senders.cancel(id);
        // The undelivered item (if any) is dropped here, outside the lock.
        drop(cancelled);
    }

    /// Unlinks a receiver whose future was dropped while parked.
    ///
    /// A value already handed to it goes to the next parked receiver, or back
    /// to the head of the buffer when there is room. That holds after
    /// `close` too: the channel accepted the value while open, so it stays
    /// receivable like any other buffered item. At rendezvous there is never
    /// room, and the value is dropped even though its sender saw success.
    pub(crate) fn cancel_recv(&self, id: WaiterId) {
        let mut wakeups = Wakeups::new();
        let mut state = self.state.lock();

        let lost = match state.receivers.cancel(id) {
            Cancelled::Resolved(Ok(value)) => {
                if let Some(parked) = state.receivers.pop() {
                    state.receivers.resolve(parked.ticket, Ok(value), &mut wakeups);
                    None
                } else if self.capacity.has_room(state.buffer.len()) {
                    state.buffer.push_front(value);
                    None
                } else {
                    Some(value)
                }
            }
            Cancelled::Queued(()) | Cancelled::Resolved(Err(_)) | Cancelled::Gone => None,
        };

        drop(state);
        wakeups.wake();

        if lost.is_some() {
            tracing::debug!("receive cancelled after hand-off; value dropped");
        }
    }

    pub(crate) fn close(&self) -> bool {
        let mut wakeups = Wakeups::new();
        let closed = self.state.lock().close(&mut wakeups);
        wakeups.wake();
        closed
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Buffered item count. Items held by parked senders are not included.
    pub(crate) fn len(&self) -> usize {
        self.state.lock().buffer.len()
    }

    pub(crate) fn add_sender(&self) {
        self.senders.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_receiver(&self) {
        self.receivers.fetch_add(1, Ordering::Relaxed);
    }

    /// Drops one sender handle; the last one closes the channel.
    pub(crate) fn drop_sender(&self) {
        if self.senders.fetch_sub(1, Ordering::AcqRel) == 1 && self.close() {
            tracing::trace!("last sender dropped");
        }
    }

    /// Drops one receiver handle; the last one closes the channel.
    pub(crate) fn drop_receiver(&self) {
        if self.receivers.fetch_sub(1, Ordering::AcqRel) == 1 && self.close() {
            tracing::trace!("last receiver dropped");
        }
    }
}

impl<T> fmt::Debug for Chan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Chan")
            .field("capacity", &self.capacity)
            .field("buffered", &state.buffer.len())
            .field("parked_senders", &state.senders.len())
            .field("parked_receivers", &state.receivers.len())
            .field("closed", &state.closed)
            .finish()
    }
}
